//! manyfold-export - OBJ to glTF 2.0 converter
//!
//! Writes `.gltf` (embedded base64 buffer) or `.glb` files.

use anyhow::{Context, Result};
use clap::Parser;
use manyfold_gltf::{ExportMode, Exporter, SceneNode};
use std::path::PathBuf;

use manyfold_export::{ExportConfig, load_obj, resolve_output};

#[derive(Parser)]
#[command(name = "manyfold-export")]
#[command(about = "Convert OBJ meshes to glTF 2.0")]
#[command(version)]
struct Cli {
    /// Input OBJ file
    input: PathBuf,

    /// Output .gltf or .glb file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output mode (ascii or binary)
    #[arg(short, long)]
    mode: Option<ExportMode>,

    /// Value for asset.generator
    #[arg(long)]
    generator: Option<String>,

    /// Pretty-print JSON (ascii mode)
    #[arg(long)]
    pretty: bool,

    /// Path to an export config TOML file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };

    // Command line flags override the config file
    let mut options = config.options;
    if let Some(generator) = cli.generator {
        options.generator = generator;
    }
    options.pretty |= cli.pretty;

    let (output, mode) = resolve_output(&cli.input, cli.output.as_deref(), cli.mode.or(config.mode));

    let geometry = load_obj(&cli.input)?;
    let mut scene = SceneNode::mesh(geometry);
    if let Some(stem) = cli.input.file_stem().and_then(|s| s.to_str()) {
        scene = scene.with_name(stem);
    }

    Exporter::with_options(options)
        .export(&scene, &output, mode)
        .with_context(|| format!("Failed to export {:?}", output))?;

    tracing::info!("Exported {:?} -> {:?}", cli.input, output);
    Ok(())
}
