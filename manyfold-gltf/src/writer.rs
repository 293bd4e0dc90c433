//! Little-endian byte writer shared by buffer packing and GLB framing

/// glTF requires 4-byte alignment for bufferView offsets and GLB chunks
pub const ALIGNMENT: usize = 4;

/// Number of fill bytes needed to bring `len` up to a multiple of `alignment`
pub fn padding_for(len: usize, alignment: usize) -> usize {
    (alignment - (len % alignment)) % alignment
}

/// Growable byte region with typed little-endian writes
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    bytes: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Pad with `fill` up to the next multiple of `alignment`.
    /// Returns the number of bytes written.
    pub fn pad_to_alignment(&mut self, alignment: usize, fill: u8) -> usize {
        let padding = padding_for(self.bytes.len(), alignment);
        self.bytes.extend(std::iter::repeat_n(fill, padding));
        padding
    }
}
