//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::order::PAYLOAD_FIELDS;
use crate::core::validation::{DEFAULT_REQUIRED_FIELDS, OrderValidator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Order validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Fields that must be present and non-empty at creation, checked in order
    pub required_fields: Vec<String>,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            required_fields: DEFAULT_REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Signature upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignaturesConfig {
    /// Directory signature images are written to
    pub directory: PathBuf,

    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for SignaturesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("media/signatures"),
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Complete configuration of the order tracker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub server: ServerConfig,
    pub orders: OrdersConfig,
    pub signatures: SignaturesConfig,
}

impl TrackerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileNotFound {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Create the default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = &self.orders.required_fields;

        for (index, field) in required.iter().enumerate() {
            if !PAYLOAD_FIELDS.contains(&field.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "orders.required_fields".to_string(),
                    message: format!("unknown order field '{}'", field),
                });
            }
            if required[..index].contains(field) {
                return Err(ConfigError::InvalidValue {
                    field: "orders.required_fields".to_string(),
                    message: format!("'{}' is listed twice", field),
                });
            }
        }

        if self.signatures.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "signatures.max_upload_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Build the order validator described by this configuration
    pub fn validator(&self) -> OrderValidator {
        OrderValidator::new(self.orders.required_fields.clone())
    }
}
