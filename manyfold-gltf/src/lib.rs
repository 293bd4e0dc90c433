//! glTF 2.0 exporter for triangle meshes and progressive meshes
//!
//! Converts a [`SceneNode`] graph into a `.gltf` document with an embedded
//! base64 buffer, or a `.glb` binary container:
//! - BinaryBuffer: Pack typed arrays into buffer 0 with 4-byte alignment
//! - BufferViewRegistry / AccessorRegistry: Validated, append-only catalogs
//! - MeshEncoder: Index + position accessors for one mesh
//! - ProgressiveEncoder: Interleaved `MANYFOLD_mesh_progressive` vertex splits
//! - DocumentAssembler: Top-level JSON document
//! - write_glb: GLB header and chunk framing
//!
//! # Example
//!
//! ```no_run
//! use manyfold_gltf::*;
//! use manyfold_gltf::glam::Vec3;
//!
//! let triangle = Geometry::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!     vec![Face::new(0, 1, 2)],
//! );
//! let scene = SceneNode::mesh(triangle).with_name("Triangle");
//!
//! let exporter = Exporter::new();
//! exporter.export(&scene, "triangle.gltf", ExportMode::Ascii)?;
//! exporter.export(&scene, "triangle.glb", ExportMode::Binary)?;
//! # Ok::<(), ExportError>(())
//! ```

pub mod buffer;
pub mod context;
pub mod document;
pub mod error;
pub mod export;
pub mod glb;
pub mod mesh;
pub mod progressive;
pub mod registry;
pub mod scene;
pub mod schema;
pub mod writer;

pub use buffer::{BinaryBuffer, Component, Span};
pub use context::ExportContext;
pub use document::{AssembledDocument, DocumentAssembler};
pub use error::{ExportError, ValidationError};
pub use export::{ExportMode, ExportOptions, Exporter};
pub use glb::write_glb;
pub use mesh::{EncodedMesh, IndexWidth, MeshEncoder};
pub use progressive::{EXTENSION_NAME, EncodedProgressiveMesh, ProgressiveEncoder, SplitAccessors};
pub use registry::{AccessorIndex, AccessorRegistry, Bounds, BufferViewIndex, BufferViewRegistry};
pub use scene::{Aabb, Face, Geometry, MeshKind, ProgressiveMesh, SceneNode, VertexSplit};
pub use schema::{ComponentType, ElementType, Target};
pub use writer::BinaryWriter;

// Re-export the document model for callers that inspect assembled roots
pub use gltf_json as json;
pub use glam;
