//! GLB container framing

use crate::error::{ExportError, Result};
use crate::writer::{ALIGNMENT, BinaryWriter, padding_for};

/// `glTF` read as a little-endian u32
pub const GLB_MAGIC: u32 = 0x46546C67;
pub const GLB_VERSION: u32 = 2;
/// `JSON` read as a little-endian u32
pub const CHUNK_JSON: u32 = 0x4E4F534A;
/// `BIN\0` read as a little-endian u32
pub const CHUNK_BIN: u32 = 0x004E4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Total container size for the given unpadded chunk payloads
pub fn glb_len(json_len: usize, bin_len: usize) -> usize {
    HEADER_LEN
        + CHUNK_HEADER_LEN
        + json_len
        + padding_for(json_len, ALIGNMENT)
        + CHUNK_HEADER_LEN
        + bin_len
        + padding_for(bin_len, ALIGNMENT)
}

/// Frame JSON text and binary payload as a two-chunk GLB.
///
/// The JSON chunk is padded with spaces, the BIN chunk with zeros. The BIN
/// chunk is always written, even when the payload is empty. Fails with
/// [`ExportError::GlbTooLarge`] when the container would not fit the u32
/// length fields.
pub fn write_glb(json: &str, bin: &[u8]) -> Result<Vec<u8>> {
    let total_length = glb_len(json.len(), bin.len());
    let header_length = length_field(total_length)?;
    let mut w = BinaryWriter::with_capacity(total_length);

    // Header
    w.write_u32(GLB_MAGIC);
    w.write_u32(GLB_VERSION);
    w.write_u32(header_length);

    write_chunk(&mut w, CHUNK_JSON, json.as_bytes(), b' ')?;
    write_chunk(&mut w, CHUNK_BIN, bin, 0)?;

    debug_assert_eq!(w.len(), total_length);
    Ok(w.into_bytes())
}

fn write_chunk(w: &mut BinaryWriter, chunk_type: u32, payload: &[u8], fill: u8) -> Result<()> {
    let padded_len = payload.len() + padding_for(payload.len(), ALIGNMENT);
    w.write_u32(length_field(padded_len)?);
    w.write_u32(chunk_type);
    w.write_bytes(payload);
    w.pad_to_alignment(ALIGNMENT, fill);
    Ok(())
}

/// GLB lengths are u32 on the wire
fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ExportError::GlbTooLarge(len))
}
