//! Configuration for the storefront client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/storefront/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod recommendations;
mod serialization;


pub use logging::{LogRotation, LoggingConfig};
pub use recommendations::{FileRecommendations, Recommendations};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_THEME: &str = "dark";

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_SESSION_FILE: &str = "STOREFRONT_SESSION_FILE";
pub const ENV_THEME: &str = "STOREFRONT_THEME";
pub const ENV_DEMO: &str = "STOREFRONT_DEMO";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL
    pub api_url: String,

    /// Where the logged-in identity is persisted
    pub session_file: PathBuf,

    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    /// Run against the in-process demo backend instead of `api_url`
    pub demo_mode: bool,

    pub recommendations: Recommendations,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            theme: DEFAULT_THEME.to_string(),
            demo_mode: false,
            recommendations: Recommendations::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_session_file() -> PathBuf {
    crate::session::SessionStore::default_path().unwrap_or_else(|| PathBuf::from("session.json"))
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub theme: Option<String>,

    /// Optional [recommendations] section
    pub recommendations: Option<FileRecommendations>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/storefront/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("storefront").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is fatal: the
    /// process prints the problem and exits with status 1.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `storefront config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        // API URL: env > file > default
        let api_url = var(ENV_API_URL)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Session file: env > file > default
        let session_file = var(ENV_SESSION_FILE)
            .or(file.session_file)
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        // Theme: env > file > default
        let theme = var(ENV_THEME)
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Demo mode: env only (runtime flag)
        let demo_mode = var(ENV_DEMO)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            api_url,
            session_file,
            theme,
            demo_mode,
            recommendations: Recommendations::from_file(file.recommendations),
            logging: file.logging.unwrap_or_default(),
        }
    }
}
