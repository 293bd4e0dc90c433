//! Top-level glTF document assembly

use crate::context::ExportContext;
use crate::export::{ExportMode, ExportOptions};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use gltf_json as json;

/// Prefix of the embedded buffer URI used by `.gltf` output
pub const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// A finished document plus the binary payload it refers to
#[derive(Debug)]
pub struct AssembledDocument {
    pub root: json::Root,
    pub binary: Vec<u8>,
}

/// Composes the JSON root from an export context
pub struct DocumentAssembler<'a> {
    options: &'a ExportOptions,
    mode: ExportMode,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(options: &'a ExportOptions, mode: ExportMode) -> Self {
        Self { options, mode }
    }

    /// Consume the context. In ASCII mode the payload is embedded into the
    /// buffer record as a base64 data URI; in binary mode the buffer record
    /// carries only its byteLength and the payload travels in the GLB BIN chunk.
    pub fn assemble(&self, ctx: ExportContext) -> AssembledDocument {
        let ExportContext {
            buffer,
            buffer_views,
            accessors,
            mut buffers,
            meshes,
            nodes,
            scene_nodes,
            extensions_used,
        } = ctx;
        let binary = buffer.into_data();

        if self.mode == ExportMode::Ascii && !buffers.is_empty() {
            let uri = format!("{DATA_URI_PREFIX}{}", BASE64.encode(&binary));
            for record in &mut buffers {
                record.uri = Some(uri.clone());
            }
        }

        let scene = json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            nodes: scene_nodes.into_iter().map(json::Index::new).collect(),
        };

        let root = json::Root {
            accessors: accessors.into_accessors(),
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(self.options.generator.clone()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers,
            buffer_views: buffer_views.into_views(),
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: extensions_used.into_iter().collect(),
            extras: Default::default(),
            images: Vec::new(),
            materials: Vec::new(),
            meshes,
            nodes,
            samplers: Vec::new(),
            scene: Some(json::Index::new(0)),
            scenes: vec![scene],
            skins: Vec::new(),
            textures: Vec::new(),
        };

        AssembledDocument { root, binary }
    }
}

impl AssembledDocument {
    /// Serialize the JSON document.
    ///
    /// gltf-json omits an empty `scene.nodes`; scenes without renderable
    /// nodes still get an explicit `"nodes": []`.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if self.root.scenes.iter().all(|scene| !scene.nodes.is_empty()) {
            return if pretty {
                json::serialize::to_string_pretty(&self.root)
            } else {
                json::serialize::to_string(&self.root)
            };
        }

        let mut value = serde_json::to_value(&self.root)?;
        if let Some(scenes) = value.get_mut("scenes").and_then(|s| s.as_array_mut()) {
            for scene in scenes.iter_mut().filter_map(|s| s.as_object_mut()) {
                scene
                    .entry("nodes")
                    .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            }
        }
        if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshEncoder;
    use crate::scene::{Face, Geometry};
    use glam::Vec3;

    fn triangle_context() -> ExportContext {
        let geometry = Geometry::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::new(0, 1, 2)],
        );
        let mut ctx = ExportContext::new();
        let encoded = MeshEncoder::new(&geometry).encode(&mut ctx).unwrap();
        ctx.scene_nodes.push(encoded.node);
        ctx
    }

    #[test]
    fn test_ascii_embeds_data_uri() {
        let options = ExportOptions::default();
        let doc = DocumentAssembler::new(&options, ExportMode::Ascii).assemble(triangle_context());

        assert_eq!(
            doc.root.buffers[0].uri.as_deref(),
            Some(
                "data:application/octet-stream;base64,\
                 AAABAAIAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPwAAAAA="
            )
        );
        assert_eq!(doc.binary.len(), 44);
    }

    #[test]
    fn test_binary_has_no_uri() {
        let options = ExportOptions::default();
        let doc = DocumentAssembler::new(&options, ExportMode::Binary).assemble(triangle_context());

        assert!(doc.root.buffers[0].uri.is_none());
        assert_eq!(doc.root.buffers[0].byte_length.0, 44);
    }

    #[test]
    fn test_asset_and_scene() {
        let options = ExportOptions {
            generator: "unit-test".to_string(),
            ..Default::default()
        };
        let doc = DocumentAssembler::new(&options, ExportMode::Ascii).assemble(triangle_context());

        assert_eq!(doc.root.asset.version, "2.0");
        assert_eq!(doc.root.asset.generator.as_deref(), Some("unit-test"));
        assert_eq!(doc.root.scene.map(|s| s.value()), Some(0));
        assert_eq!(doc.root.scenes.len(), 1);
        assert_eq!(doc.root.scenes[0].nodes.len(), 1);
    }

    #[test]
    fn test_empty_context() {
        let options = ExportOptions::default();
        let doc = DocumentAssembler::new(&options, ExportMode::Ascii).assemble(ExportContext::new());

        assert!(doc.root.buffers.is_empty());
        assert!(doc.root.scenes[0].nodes.is_empty());
        assert!(doc.binary.is_empty());
    }

    #[test]
    fn test_empty_scene_keeps_nodes_array() {
        let options = ExportOptions::default();
        let doc = DocumentAssembler::new(&options, ExportMode::Ascii).assemble(ExportContext::new());

        for pretty in [false, true] {
            let text = doc.to_json_string(pretty).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["scenes"], serde_json::json!([{ "nodes": [] }]));
            assert_eq!(value["scene"], 0);
        }
    }
}
