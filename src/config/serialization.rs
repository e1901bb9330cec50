//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# storefront configuration

# Backend base URL (env: STOREFRONT_API_URL)
api_url = "{api_url}"

# Where the logged-in identity is kept between runs (env: STOREFRONT_SESSION_FILE)
session_file = "{session_file}"

# Theme: dark, light, nord (env: STOREFRONT_THEME)
theme = "{theme}"

# Demo mode is a runtime flag only: STOREFRONT_DEMO=1 or `storefront --demo`

[recommendations]
count = {rec_count}
method = "{rec_method}"  # collaborative, content

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON log files (in addition to the TUI log panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = escape(&self.api_url),
            session_file = escape(&self.session_file.display().to_string()),
            theme = escape(&self.theme),
            rec_count = self.recommendations.count,
            rec_method = self.recommendations.method.as_str(),
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}

/// Escape a value for a TOML basic string (Windows paths carry backslashes)
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
