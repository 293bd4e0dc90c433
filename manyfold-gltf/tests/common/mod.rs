//! Shared fixtures and decoding helpers for exporter integration tests

#![allow(dead_code)]

use manyfold_gltf::glam::Vec3;
use manyfold_gltf::{Face, Geometry, ProgressiveMesh, VertexSplit};
use serde_json::Value;

/// The minimal glTF tutorial triangle
pub fn triangle() -> Geometry {
    Geometry::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![Face::new(0, 1, 2)],
    )
}

/// Unit cube centred on the origin, 8 shared vertices and 12 triangles
pub fn unit_cube() -> Geometry {
    let vertices = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -0.5 } else { 0.5 },
                if i & 2 == 0 { -0.5 } else { 0.5 },
                if i & 4 == 0 { -0.5 } else { 0.5 },
            )
        })
        .collect();
    let faces = [
        [0, 2, 1], [1, 2, 3], // -z
        [4, 5, 6], [5, 7, 6], // +z
        [0, 1, 4], [1, 5, 4], // -y
        [2, 6, 3], [3, 6, 7], // +y
        [0, 4, 2], [2, 4, 6], // -x
        [1, 3, 5], [3, 7, 5], // +x
    ]
    .into_iter()
    .map(|[a, b, c]| Face::new(a, b, c))
    .collect();
    Geometry::new(vertices, faces)
}

/// Cube base mesh with `n` synthetic vertex splits
pub fn progressive_cube(n: u32) -> ProgressiveMesh {
    let vertex_splits = (0..n)
        .map(|i| VertexSplit {
            vertex: i % 8,
            left: 8 + i,
            right: (i * 3) % 8,
            displacement: Vec3::new(
                i as f32 * 0.125,
                0.5 - i as f32 * 0.25,
                1.0 / (i as f32 + 1.0),
            ),
        })
        .collect();
    ProgressiveMesh {
        geometry: unit_cube(),
        vertex_splits,
    }
}

pub fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

pub fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

pub fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Split a GLB into its parsed JSON chunk and raw BIN chunk
pub fn split_glb(glb: &[u8]) -> (Value, &[u8]) {
    let json_len = read_u32(glb, 12) as usize;
    let json: Value = serde_json::from_slice(&glb[20..20 + json_len]).expect("JSON chunk");
    let bin_header = 20 + json_len;
    let bin_len = read_u32(glb, bin_header) as usize;
    (json, &glb[bin_header + 8..bin_header + 8 + bin_len])
}

/// Decode every component of an accessor using its declared componentType,
/// count, type and its bufferView's byteOffset/byteStride.
pub fn decode_accessor(json: &Value, bin: &[u8], accessor: usize) -> Vec<f64> {
    let accessor = &json["accessors"][accessor];
    let view = &json["bufferViews"][accessor["bufferView"].as_u64().unwrap() as usize];

    let components = match accessor["type"].as_str().unwrap() {
        "SCALAR" => 1,
        "VEC2" => 2,
        "VEC3" => 3,
        "VEC4" => 4,
        other => panic!("unexpected accessor type {other}"),
    };
    let (size, read): (usize, fn(&[u8], usize) -> f64) =
        match accessor["componentType"].as_u64().unwrap() {
            5123 => (2, |b, o| read_u16(b, o) as f64),
            5125 => (4, |b, o| read_u32(b, o) as f64),
            5126 => (4, |b, o| read_f32(b, o) as f64),
            other => panic!("unexpected componentType {other}"),
        };
    let element_size = size * components;
    let stride = view["byteStride"].as_u64().map_or(element_size, |s| s as usize);
    let base = view["byteOffset"].as_u64().unwrap_or(0) as usize
        + accessor["byteOffset"].as_u64().unwrap_or(0) as usize;
    let count = accessor["count"].as_u64().unwrap() as usize;

    (0..count)
        .flat_map(|i| (0..components).map(move |c| base + i * stride + c * size))
        .map(|offset| read(bin, offset))
        .collect()
}
