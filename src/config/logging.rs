//! `[logging]` section
//!
//! Deserialized directly: every key is optional and falls back to the value
//! in `Default`.

use serde::Deserialize;
use std::path::PathBuf;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Unrecognized names keep the daily default rather than failing the file
impl From<String> for LogRotation {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level for `storefront` targets; RUST_LOG wins when set
    pub level: String,
    /// JSON log files alongside the log panel / stderr
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. `storefront.2025-01-15`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "storefront".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let section: LoggingConfig = toml::from_str("file_rotation = \"Hourly\"").unwrap();
        assert_eq!(section.file_rotation, LogRotation::Hourly);
        assert_eq!(section.level, "info");
        assert_eq!(section.file_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn unknown_rotation_is_daily() {
        let section: LoggingConfig = toml::from_str("file_rotation = \"weekly\"").unwrap();
        assert_eq!(section.file_rotation, LogRotation::Daily);
    }
}
