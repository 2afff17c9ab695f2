//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::DeployConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Error type for configuration loading and network resolution.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    UnknownNetwork { name: String, available: Vec<String> },
    InvalidUrl { network: String, error: url::ParseError },
    InvalidPrivateKey { network: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::UnknownNetwork { name, available } => write!(
                f,
                "Unknown network '{}' (configured: {})",
                name,
                available.join(", ")
            ),
            ConfigError::InvalidUrl { network, error } => {
                write!(f, "Invalid RPC URL for network '{}': {}", network, error)
            }
            ConfigError::InvalidPrivateKey { network, reason } => {
                write!(f, "Invalid private key for network '{}': {}", network, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DeployConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration, falling back to built-in defaults.
///
/// A missing file is only tolerated when the path was not named explicitly.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<DeployConfig, ConfigError> {
    if !explicit && !path.exists() {
        tracing::info!(path = %path.display(), "No config file, using built-in networks");
        return Ok(DeployConfig::default());
    }

    let config = load_config(path)?;
    tracing::info!(
        path = %path.display(),
        networks = config.networks.len(),
        "Configuration loaded"
    );
    Ok(config)
}
