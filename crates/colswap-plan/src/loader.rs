use std::path::Path;

use serde_json::Value;

use crate::errors::{ConfigError, Result};
use crate::model::SwapConfig;
use crate::validate::{normalize_config_json, validate_config_json};

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load and structurally validate a configuration file.
pub fn load_config(path: &Path) -> Result<SwapConfig> {
    let format = ConfigFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    parse_config_str(&contents, format)
}

/// Parse configuration text in the given format.
pub fn parse_config_str(contents: &str, format: ConfigFormat) -> Result<SwapConfig> {
    let document: Value = match format {
        ConfigFormat::Toml => toml::from_str(contents)?,
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    parse_config(document)
}

/// Check a configuration document against the JSON Schema, then deserialize it.
///
/// Legacy keys are normalized first, so `columns_to_swap` documents pass
/// the same structural checks as `groups` ones.
pub fn parse_config(mut document: Value) -> Result<SwapConfig> {
    let mut report = normalize_config_json(&mut document);
    report.merge(validate_config_json(&document)?);
    if !report.is_ok() {
        return Err(ConfigError::Invalid(report));
    }
    Ok(serde_json::from_value(document)?)
}
