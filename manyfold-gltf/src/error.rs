//! Error types for document encoding and export

use std::io;

/// Schema validation failure raised by the registries and the mesh encoder.
///
/// Validation always runs before anything is pushed, so a failed call leaves
/// the registries exactly as they were.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Component type code outside the glTF set (5120-5126, minus 5124)
    #[error("unknown accessor componentType {0}")]
    UnknownComponentType(u32),

    /// Element type name outside SCALAR/VECn/MATn
    #[error("unknown accessor type {0:?}")]
    UnknownElementType(String),

    /// GPU buffer target outside ARRAY_BUFFER/ELEMENT_ARRAY_BUFFER
    #[error("unknown bufferView target {0}")]
    UnknownTarget(u32),

    /// min or max array does not match the element's component count
    #[error("accessor {field} has {actual} components, {element_type} requires {expected}")]
    BoundsLength {
        field: &'static str,
        element_type: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Vertex position with a NaN or infinite coordinate
    #[error("vertex {vertex} has a non-finite position")]
    NonFiniteVertex { vertex: usize },

    /// Vertex-split displacement with a NaN or infinite component
    #[error("vertex split {split} has a non-finite displacement")]
    NonFiniteDisplacement { split: usize },

    /// A face references a vertex the geometry does not have
    #[error("face {face} references vertex {index} but the geometry has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl From<std::convert::Infallible> for ValidationError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Error returned by an export call
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Export mode name other than `ascii` or `binary`
    #[error("invalid export mode {0:?} (expected \"ascii\" or \"binary\")")]
    InvalidMode(String),

    /// GLB header and chunk lengths are u32
    #[error("GLB container of {0} bytes exceeds the 4 GiB format limit")]
    GlbTooLarge(usize),

    #[error("failed to serialize glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
