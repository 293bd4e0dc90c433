//! Wavefront OBJ loading into exporter geometry

use anyhow::{Context, Result, bail};
use manyfold_gltf::glam::Vec3;
use manyfold_gltf::{Face, Geometry};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load an OBJ file as indexed triangle geometry
pub fn load_obj(input: &Path) -> Result<Geometry> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    let geometry = parse_obj(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ: {:?}", input))?;

    tracing::info!(
        "Loaded OBJ mesh: {} vertices, {} faces",
        geometry.vertices.len(),
        geometry.faces.len()
    );
    Ok(geometry)
}

/// Parse OBJ text.
///
/// Only `v` and `f` statements are read; positions keep their file order so
/// face indices map directly onto them. Polygons are fan-triangulated.
pub fn parse_obj(reader: impl BufRead) -> Result<Geometry> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" if parts.len() >= 4 => {
                let coord = |i: usize| -> Result<f32> {
                    parts[i]
                        .parse()
                        .with_context(|| format!("line {}: invalid coordinate {:?}", line_no + 1, parts[i]))
                };
                vertices.push(Vec3::new(coord(1)?, coord(2)?, coord(3)?));
            }
            "f" if parts.len() >= 4 => {
                let polygon = parts[1..]
                    .iter()
                    .map(|v| resolve_vertex(v, vertices.len()))
                    .collect::<Option<Vec<u32>>>();
                let Some(polygon) = polygon else {
                    bail!("line {}: face references a missing vertex: {}", line_no + 1, line);
                };

                // Fan triangulation for convex polygons
                for i in 1..polygon.len() - 1 {
                    faces.push(Face::new(polygon[0], polygon[i], polygon[i + 1]));
                }
            }
            _ => {}
        }
    }

    if vertices.is_empty() {
        bail!("No vertices found in OBJ file");
    }

    Ok(Geometry::new(vertices, faces))
}

/// Resolve the position part of a face vertex ("v", "v/vt", "v/vt/vn" or
/// "v//vn") to a zero-based index. Negative indices count back from the most
/// recent vertex.
fn resolve_vertex(s: &str, vertex_count: usize) -> Option<u32> {
    let index: i64 = s.split('/').next()?.parse().ok()?;
    let resolved = match index {
        0 => return None,
        i if i > 0 => i - 1, // OBJ indices are 1-based
        i => vertex_count as i64 + i,
    };
    if resolved < 0 || resolved as usize >= vertex_count {
        return None;
    }
    u32::try_from(resolved).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_triangle() {
        let obj = "# triangle\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let geometry = parse_obj(Cursor::new(obj)).unwrap();

        assert_eq!(geometry.vertices.len(), 3);
        assert_eq!(geometry.vertices[1], Vec3::X);
        assert_eq!(geometry.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1/1/1 2/2/1 3/3/1 4/4/1\n";
        let geometry = parse_obj(Cursor::new(obj)).unwrap();

        assert_eq!(
            geometry.faces,
            vec![Face::new(0, 1, 2), Face::new(0, 2, 3)]
        );
    }

    #[test]
    fn test_negative_and_normal_only_indices() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf -3//1 -2//1 -1//1\n";
        let geometry = parse_obj(Cursor::new(obj)).unwrap();
        assert_eq!(geometry.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_missing_vertex_is_an_error() {
        let obj = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        assert!(parse_obj(Cursor::new(obj)).is_err());
    }

    #[test]
    fn test_no_vertices_is_an_error() {
        assert!(parse_obj(Cursor::new("# empty\n")).is_err());
    }

    #[test]
    fn test_resolve_vertex() {
        assert_eq!(resolve_vertex("1", 3), Some(0));
        assert_eq!(resolve_vertex("3/2", 3), Some(2));
        assert_eq!(resolve_vertex("-1", 3), Some(2));
        assert_eq!(resolve_vertex("0", 3), None);
        assert_eq!(resolve_vertex("4", 3), None);
        assert_eq!(resolve_vertex("x", 3), None);
    }
}
