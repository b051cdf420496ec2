//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::DevProxyConfig;
use crate::config::validation::ValidationError;

/// Environment flag that forces blank mode at start.
pub const BLANK_ENV: &str = "BLANK";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    /// JSON or TOML syntax or type error.
    Parse(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a config file. `.toml` files are read as TOML, everything else as JSON.
pub fn load_config(path: &Path) -> Result<DevProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Apply the `BLANK=1` override.
pub fn apply_env_overrides(config: &mut DevProxyConfig, blank_env: Option<&str>) {
    if blank_env == Some("1") {
        config.blank_mode = true;
    }
}
