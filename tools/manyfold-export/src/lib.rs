//! manyfold-export library
//!
//! OBJ loading, config files and output resolution for the CLI.

pub mod config;
pub mod obj;

pub use config::ExportConfig;
pub use obj::{load_obj, parse_obj};

use manyfold_gltf::ExportMode;
use std::path::{Path, PathBuf};

/// Work out where to write and in which container.
///
/// An explicit mode wins. Otherwise the output extension decides, falling
/// back to ASCII. Without an output path the input path is reused with the
/// mode's extension.
pub fn resolve_output(
    input: &Path,
    output: Option<&Path>,
    mode: Option<ExportMode>,
) -> (PathBuf, ExportMode) {
    let mode = mode
        .or_else(|| output.and_then(ExportMode::from_path))
        .unwrap_or_default();
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(mode.extension()),
    };
    (output, mode)
}
