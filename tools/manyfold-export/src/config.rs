//! Export configuration file (TOML)

use anyhow::{Context, Result};
use manyfold_gltf::{ExportMode, ExportOptions};
use serde::Deserialize;
use std::path::Path;

/// Contents of an export config file.
///
/// ```toml
/// mode = "binary"
/// generator = "my-pipeline"
/// pretty = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Output mode; when absent the output extension decides
    #[serde(default)]
    pub mode: Option<ExportMode>,

    #[serde(flatten)]
    pub options: ExportOptions,
}

impl ExportConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse export config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ExportConfig::parse("").unwrap();
        assert_eq!(config.mode, None);
        assert_eq!(config.options, ExportOptions::default());
    }

    #[test]
    fn test_full_config() {
        let config = ExportConfig::parse(
            r#"
            mode = "binary"
            generator = "pipeline"
            pretty = true
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, Some(ExportMode::Binary));
        assert_eq!(config.options.generator, "pipeline");
        assert!(config.options.pretty);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(ExportConfig::parse("mode = \"fbx\"").is_err());
    }
}
