//! Static mesh encoding: indices + positions into one primitive

use crate::context::ExportContext;
use crate::error::{Result, ValidationError};
use crate::registry::{AccessorIndex, Bounds};
use crate::scene::Geometry;
use crate::schema::{ComponentType, ElementType, Target};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;

/// Component width used for the index accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// u16 when the largest vertex index (`vertex_count - 1`) fits in 16 bits
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count.saturating_sub(1) <= u16::MAX as usize {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    pub fn component_type(self) -> ComponentType {
        match self {
            IndexWidth::U16 => ComponentType::UnsignedShort,
            IndexWidth::U32 => ComponentType::UnsignedInt,
        }
    }
}

/// Ids produced by encoding one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedMesh {
    pub node: u32,
    pub mesh: u32,
    pub buffer: u32,
    pub indices: AccessorIndex,
    pub positions: AccessorIndex,
}

/// Packs one geometry into the export context
pub struct MeshEncoder<'a> {
    geometry: &'a Geometry,
}

impl<'a> MeshEncoder<'a> {
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Append faces and vertices, register views/accessors, then the mesh and
    /// its node. Positions must be finite and face indices in range; both are
    /// checked before anything is written.
    pub fn encode(self, ctx: &mut ExportContext) -> Result<EncodedMesh> {
        let geometry = self.geometry;
        let vertex_count = geometry.vertices.len();
        validate_vertices(geometry)?;
        validate_faces(geometry)?;

        let buffer = ctx.owning_buffer();
        let width = IndexWidth::for_vertex_count(vertex_count);
        let indices = encode_indices(ctx, buffer, geometry, width)?;
        let positions = encode_positions(ctx, buffer, geometry)?;
        ctx.sync_buffer_length();

        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            positions.as_json_index(),
        );
        let primitive = json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(indices.as_json_index()),
            material: None,
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        };

        let mesh = ctx.meshes.len() as u32;
        ctx.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            primitives: vec![primitive],
            weights: None,
        });

        let node = ctx.nodes.len() as u32;
        ctx.nodes.push(json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(mesh)),
            name: None,
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        });

        tracing::debug!(
            node,
            mesh,
            vertices = vertex_count,
            faces = geometry.faces.len(),
            ?width,
            "encoded mesh"
        );

        Ok(EncodedMesh {
            node,
            mesh,
            buffer,
            indices,
            positions,
        })
    }
}

fn validate_vertices(geometry: &Geometry) -> Result<(), ValidationError> {
    match geometry.vertices.iter().position(|v| !v.is_finite()) {
        Some(vertex) => Err(ValidationError::NonFiniteVertex { vertex }),
        None => Ok(()),
    }
}

fn validate_faces(geometry: &Geometry) -> Result<(), ValidationError> {
    let vertex_count = geometry.vertices.len();
    for (face, f) in geometry.faces.iter().enumerate() {
        if let Some(&index) = f.indices().iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ValidationError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

fn encode_indices(
    ctx: &mut ExportContext,
    buffer: u32,
    geometry: &Geometry,
    width: IndexWidth,
) -> Result<AccessorIndex> {
    let flat = geometry.faces.iter().flat_map(|f| f.indices());
    let span = match width {
        // validate_faces guarantees every index is below vertex_count
        IndexWidth::U16 => ctx.buffer.append(&flat.map(|i| i as u16).collect::<Vec<_>>()),
        IndexWidth::U32 => ctx.buffer.append(&flat.collect::<Vec<_>>()),
    };

    let view = ctx.buffer_views.register(
        buffer,
        span.byte_offset,
        span.byte_length,
        None,
        Some(Target::ElementArrayBuffer),
    )?;
    let max_index = geometry.vertices.len().saturating_sub(1) as u32;
    let accessor = ctx.accessors.register(
        view,
        0,
        width.component_type(),
        geometry.faces.len() * 3,
        ElementType::Scalar,
        Some(Bounds::from_u32(&[0], &[max_index])),
    )?;
    Ok(accessor)
}

fn encode_positions(
    ctx: &mut ExportContext,
    buffer: u32,
    geometry: &Geometry,
) -> Result<AccessorIndex> {
    let flat: Vec<f32> = geometry
        .vertices
        .iter()
        .flat_map(|v| v.to_array())
        .collect();
    let span = ctx.buffer.append(&flat);

    let view = ctx.buffer_views.register(
        buffer,
        span.byte_offset,
        span.byte_length,
        None,
        Some(Target::ArrayBuffer),
    )?;
    let bounds = geometry
        .bounding_box()
        .map(|aabb| Bounds::from_f32(&aabb.min.to_array(), &aabb.max.to_array()));
    let accessor = ctx.accessors.register(
        view,
        0,
        ComponentType::Float,
        geometry.vertices.len(),
        ElementType::Vec3,
        bounds,
    )?;
    Ok(accessor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Face;
    use glam::Vec3;

    fn triangle() -> Geometry {
        Geometry::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::new(0, 1, 2)],
        )
    }

    #[test]
    fn test_index_width_uses_max_vertex_index() {
        assert_eq!(IndexWidth::for_vertex_count(3), IndexWidth::U16);
        assert_eq!(IndexWidth::for_vertex_count(65536), IndexWidth::U16);
        assert_eq!(IndexWidth::for_vertex_count(65537), IndexWidth::U32);
    }

    #[test]
    fn test_triangle_layout() {
        let mut ctx = ExportContext::new();
        let encoded = MeshEncoder::new(&triangle()).encode(&mut ctx).unwrap();

        assert_eq!(encoded.node, 0);
        assert_eq!(encoded.indices, AccessorIndex(0));
        assert_eq!(encoded.positions, AccessorIndex(1));

        let views = ctx.buffer_views.views();
        assert_eq!(views[0].byte_offset.map(|o| o.0), Some(0));
        assert_eq!(views[0].byte_length.0, 6);
        assert_eq!(views[1].byte_offset.map(|o| o.0), Some(8));
        assert_eq!(views[1].byte_length.0, 36);
        assert_eq!(ctx.buffers[0].byte_length.0, 44);
        assert_eq!(ctx.buffer.len(), 44);
    }

    #[test]
    fn test_u32_indices_for_large_meshes() {
        let vertices = vec![Vec3::ZERO; 70_000];
        let geometry = Geometry::new(vertices, vec![Face::new(0, 1, 69_999)]);
        let mut ctx = ExportContext::new();
        MeshEncoder::new(&geometry).encode(&mut ctx).unwrap();

        // 3 u32 indices, already aligned
        assert_eq!(ctx.buffer_views.views()[0].byte_length.0, 12);
        assert_eq!(&ctx.buffer.data()[8..12], &69_999u32.to_le_bytes());
    }

    #[test]
    fn test_out_of_range_face_leaves_context_untouched() {
        let mut geometry = triangle();
        geometry.faces.push(Face::new(0, 2, 3));
        let mut ctx = ExportContext::new();

        let err = MeshEncoder::new(&geometry).encode(&mut ctx).unwrap_err();
        assert!(matches!(
            err,
            crate::ExportError::Validation(ValidationError::FaceIndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            })
        ));
        assert!(ctx.buffer.is_empty());
        assert!(ctx.buffers.is_empty());
        assert!(ctx.accessors.is_empty());
        assert!(ctx.nodes.is_empty());
    }

    #[test]
    fn test_non_finite_vertex_is_rejected() {
        let mut geometry = triangle();
        geometry.vertices[1].x = f32::NAN;
        let mut ctx = ExportContext::new();

        let err = MeshEncoder::new(&geometry).encode(&mut ctx).unwrap_err();
        assert!(matches!(
            err,
            crate::ExportError::Validation(ValidationError::NonFiniteVertex { vertex: 1 })
        ));
        assert!(ctx.buffer.is_empty());
        assert!(ctx.accessors.is_empty());

        geometry.vertices[1] = Vec3::new(1.0, f32::INFINITY, 0.0);
        assert!(MeshEncoder::new(&geometry).encode(&mut ctx).is_err());
        assert!(ctx.buffers.is_empty());
    }
}
