//! Binary payload accumulation with automatic alignment

use crate::schema::ComponentType;
use crate::writer::{ALIGNMENT, BinaryWriter};

/// A numeric type that can be packed into the binary buffer
pub trait Component: Copy {
    const COMPONENT_TYPE: ComponentType;

    fn write_le(self, writer: &mut BinaryWriter);
}

impl Component for u16 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedShort;

    fn write_le(self, writer: &mut BinaryWriter) {
        writer.write_u16(self);
    }
}

impl Component for u32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedInt;

    fn write_le(self, writer: &mut BinaryWriter) {
        writer.write_u32(self);
    }
}

impl Component for f32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float;

    fn write_le(self, writer: &mut BinaryWriter) {
        writer.write_f32(self);
    }
}

/// Byte range written by a single append, before padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// The single growable byte region backing buffer 0.
///
/// Appends are never removed, so every returned [`Span`] stays valid for
/// the lifetime of the accumulator.
#[derive(Debug, Default)]
pub struct BinaryBuffer {
    writer: BinaryWriter,
}

impl BinaryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total length including padding
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        self.writer.as_bytes()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.writer.into_bytes()
    }

    /// Pack `elements` little-endian and zero-pad to the next 4-byte boundary
    pub fn append<T: Component>(&mut self, elements: &[T]) -> Span {
        self.append_with(|w| {
            for &element in elements {
                element.write_le(w);
            }
        })
    }

    /// Append arbitrary records through the writer, then pad once at the end
    pub fn append_with(&mut self, write: impl FnOnce(&mut BinaryWriter)) -> Span {
        let byte_offset = self.writer.len();
        write(&mut self.writer);
        let byte_length = self.writer.len() - byte_offset;
        self.writer.pad_to_alignment(ALIGNMENT, 0);
        Span {
            byte_offset,
            byte_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_u16_pads_to_four() {
        let mut buffer = BinaryBuffer::new();
        let span = buffer.append(&[0u16, 1, 2]);

        assert_eq!(span, Span { byte_offset: 0, byte_length: 6 });
        // 3 indices * 2 bytes = 6 bytes, aligned to 8
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.data(), &[0, 0, 1, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_offsets_follow_padding() {
        let mut buffer = BinaryBuffer::new();
        buffer.append(&[7u16]);
        let span = buffer.append(&[1.0f32, 2.0, 3.0]);

        assert_eq!(span.byte_offset, 4);
        assert_eq!(span.byte_length, 12);
        assert_eq!(buffer.len(), 16);
    }

    #[test]
    fn test_append_with_pads_once() {
        let mut buffer = BinaryBuffer::new();
        let span = buffer.append_with(|w| {
            w.write_u32(1);
            w.write_u16(2);
            w.write_u32(3);
        });

        assert_eq!(span.byte_length, 10);
        assert_eq!(buffer.len(), 12);
    }

    #[test]
    fn test_empty_append() {
        let mut buffer = BinaryBuffer::new();
        let span = buffer.append::<u32>(&[]);
        assert_eq!(span.byte_length, 0);
        assert!(buffer.is_empty());
    }
}
