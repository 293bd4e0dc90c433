//! Export entry point

use crate::context::ExportContext;
use crate::document::DocumentAssembler;
use crate::error::{ExportError, Result};
use crate::glb::write_glb;
use crate::mesh::MeshEncoder;
use crate::progressive::ProgressiveEncoder;
use crate::scene::{MeshKind, SceneNode};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_GENERATOR: &str = "Manyfold-GLTF";

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// `.gltf`: JSON with the payload embedded as a base64 data URI
    #[default]
    Ascii,
    /// `.glb`: binary container with JSON and BIN chunks
    Binary,
}

impl ExportMode {
    /// Mode implied by a `.gltf` / `.glb` file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "gltf" => Some(ExportMode::Ascii),
            "glb" => Some(ExportMode::Binary),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportMode::Ascii => "gltf",
            ExportMode::Binary => "glb",
        }
    }
}

impl FromStr for ExportMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascii" => Ok(ExportMode::Ascii),
            "binary" => Ok(ExportMode::Binary),
            other => Err(ExportError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Ascii => f.write_str("ascii"),
            ExportMode::Binary => f.write_str("binary"),
        }
    }
}

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportOptions {
    /// Written to `asset.generator`
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Pretty-print JSON (`.gltf` only; GLB JSON chunks stay compact)
    #[serde(default)]
    pub pretty: bool,
}

fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            pretty: false,
        }
    }
}

/// Converts a scene graph into `.gltf` or `.glb` bytes.
///
/// The exporter itself holds only configuration. Every call builds a fresh
/// [`ExportContext`], so one exporter can be reused for any number of exports.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Encode `root` and write the result to `path` in a single write.
    /// Nothing is written when encoding fails.
    pub fn export(&self, root: &SceneNode, path: impl AsRef<Path>, mode: ExportMode) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.export_to_bytes(root, mode)?;
        std::fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), %mode, bytes = bytes.len(), "wrote glTF");
        Ok(())
    }

    /// Encode `root` into the complete file contents
    pub fn export_to_bytes(&self, root: &SceneNode, mode: ExportMode) -> Result<Vec<u8>> {
        let ctx = self.encode_scene(root)?;
        let document = DocumentAssembler::new(&self.options, mode).assemble(ctx);

        let bytes = match mode {
            ExportMode::Ascii => document.to_json_string(self.options.pretty)?.into_bytes(),
            ExportMode::Binary => {
                let json = document.to_json_string(false)?;
                write_glb(&json, &document.binary)?
            }
        };
        Ok(bytes)
    }

    /// Run the mesh encoders over every renderable node in traversal order
    pub fn encode_scene(&self, root: &SceneNode) -> Result<ExportContext> {
        let mut ctx = ExportContext::new();
        let mut renderable = Vec::new();
        root.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                if mesh.geometry().is_renderable() {
                    renderable.push(mesh);
                } else {
                    tracing::warn!(name = ?node.name, "skipping mesh without vertices or faces");
                }
            }
        });

        for mesh in renderable {
            let node = match mesh {
                MeshKind::Static(geometry) => MeshEncoder::new(geometry).encode(&mut ctx)?.node,
                MeshKind::Progressive(progressive) => {
                    ProgressiveEncoder::new(progressive).encode(&mut ctx)?.base.node
                }
            };
            ctx.scene_nodes.push(node);
        }
        Ok(ctx)
    }
}
