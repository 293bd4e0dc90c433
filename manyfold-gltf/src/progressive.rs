//! `MANYFOLD_mesh_progressive` vertex-split streams
//!
//! The base mesh is encoded as usual. Each vertex split is then appended as a
//! 24-byte record, `[vertex, left, right]` as u32 followed by the displacement
//! as 3 x f32, and exposed through two accessors that interleave over the same
//! bytes:
//!
//! ```text
//! offset      +0      +4      +8      +12     +16     +20
//!             vertex  left    right   dx      dy      dz     (x N)
//! view A  --> [.................. stride 24 ..................]
//! view B                              [....... stride 24 .....]
//! ```
//!
//! The extension is only listed in `extensionsUsed`; viewers without it still
//! render the base mesh.

use crate::context::ExportContext;
use crate::error::{Result, ValidationError};
use crate::mesh::{EncodedMesh, MeshEncoder};
use crate::registry::{AccessorIndex, Bounds};
use crate::scene::{ProgressiveMesh, VertexSplit};
use crate::schema::{ComponentType, ElementType, Target};
use gltf_json as json;
use serde_json::json as json_value;

pub const EXTENSION_NAME: &str = "MANYFOLD_mesh_progressive";

/// Bytes per interleaved vertex-split record
pub const SPLIT_STRIDE: usize = 24;

/// Offset of the displacement triple inside a record
const DISPLACEMENT_OFFSET: usize = 12;

/// The two accessors interleaved over the split records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitAccessors {
    pub indices: AccessorIndex,
    pub displacements: AccessorIndex,
}

/// Ids produced by encoding one progressive mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedProgressiveMesh {
    pub base: EncodedMesh,
    /// `None` when the mesh had no splits and was written as a plain mesh
    pub splits: Option<SplitAccessors>,
}

/// Encodes a base mesh followed by its vertex-split stream
pub struct ProgressiveEncoder<'a> {
    mesh: &'a ProgressiveMesh,
}

impl<'a> ProgressiveEncoder<'a> {
    pub fn new(mesh: &'a ProgressiveMesh) -> Self {
        Self { mesh }
    }

    /// Encode the base mesh, then the splits. Displacements are checked for
    /// finite values before the base mesh is written.
    pub fn encode(self, ctx: &mut ExportContext) -> Result<EncodedProgressiveMesh> {
        let splits = &self.mesh.vertex_splits;
        if let Some(split) = splits.iter().position(|s| !s.displacement.is_finite()) {
            return Err(ValidationError::NonFiniteDisplacement { split }.into());
        }

        let base = MeshEncoder::new(&self.mesh.geometry).encode(ctx)?;
        if splits.is_empty() {
            tracing::debug!(node = base.node, "progressive mesh has no vertex splits");
            return Ok(EncodedProgressiveMesh { base, splits: None });
        }

        let span = ctx.buffer.append_with(|w| {
            for split in splits {
                w.write_u32(split.vertex);
                w.write_u32(split.left);
                w.write_u32(split.right);
                w.write_f32(split.displacement.x);
                w.write_f32(split.displacement.y);
                w.write_f32(split.displacement.z);
            }
        });
        ctx.sync_buffer_length();

        let index_view = ctx.buffer_views.register(
            base.buffer,
            span.byte_offset,
            span.byte_length,
            Some(SPLIT_STRIDE),
            Some(Target::ArrayBuffer),
        )?;
        let (min, max) = index_bounds(splits);
        let split_indices = ctx.accessors.register(
            index_view,
            0,
            ComponentType::UnsignedInt,
            splits.len(),
            ElementType::Vec3,
            Some(Bounds::from_u32(&min, &max)),
        )?;

        let displacement_view = ctx.buffer_views.register(
            base.buffer,
            span.byte_offset + DISPLACEMENT_OFFSET,
            span.byte_length - DISPLACEMENT_OFFSET,
            Some(SPLIT_STRIDE),
            Some(Target::ArrayBuffer),
        )?;
        let (min, max) = displacement_bounds(splits);
        let split_displacements = ctx.accessors.register(
            displacement_view,
            0,
            ComponentType::Float,
            splits.len(),
            ElementType::Vec3,
            Some(Bounds::from_f32(&min, &max)),
        )?;

        // MeshEncoder pushed this mesh above
        attach_extension(
            &mut ctx.meshes[base.mesh as usize],
            split_indices,
            split_displacements,
        );
        ctx.use_extension(EXTENSION_NAME);

        tracing::debug!(
            node = base.node,
            splits = splits.len(),
            byte_offset = span.byte_offset,
            "encoded vertex splits"
        );

        Ok(EncodedProgressiveMesh {
            base,
            splits: Some(SplitAccessors {
                indices: split_indices,
                displacements: split_displacements,
            }),
        })
    }
}

fn attach_extension(
    mesh: &mut json::Mesh,
    split_indices: AccessorIndex,
    split_displacements: AccessorIndex,
) {
    let extensions = mesh
        .extensions
        .get_or_insert_with(json::extensions::mesh::Mesh::default);
    extensions.others.insert(
        EXTENSION_NAME.to_string(),
        json_value!({
            "indices": split_indices.0,
            "attributes": { "POSITION": split_displacements.0 },
        }),
    );
}

/// Per-component bounds over (vertex, left, right)
fn index_bounds(splits: &[VertexSplit]) -> ([u32; 3], [u32; 3]) {
    splits.iter().fold(
        ([u32::MAX; 3], [u32::MIN; 3]),
        |(min, max), s| {
            let v = [s.vertex, s.left, s.right];
            (
                std::array::from_fn(|i| min[i].min(v[i])),
                std::array::from_fn(|i| max[i].max(v[i])),
            )
        },
    )
}

/// Per-axis bounds over the displacement vectors
fn displacement_bounds(splits: &[VertexSplit]) -> ([f32; 3], [f32; 3]) {
    let (min, max) = splits.iter().fold(
        (glam::Vec3::splat(f32::MAX), glam::Vec3::splat(f32::MIN)),
        |(min, max), s| (min.min(s.displacement), max.max(s.displacement)),
    );
    (min.to_array(), max.to_array())
}
