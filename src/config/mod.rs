//! Configuration loading and management
//!
//! The service reads one YAML document. Every key has a default, so an
//! empty file (or no file at all) yields a working development setup.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! auth:
//!   jwt_secret: change-me
//!   token_ttl_hours: 24
//! pagination:
//!   page_size: 10
//! media:
//!   root: ./media
//! cors:
//!   allow_any_origin: false
//! ```

use crate::core::error::{BookshelfResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "BOOKSHELF_CONFIG";

const DEV_SECRET: &str = "bookshelf-development-secret";

/// Listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    /// Token lifetime
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_SECRET.to_string(),
            token_ttl_hours: 24,
        }
    }
}

/// List settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Uploaded media settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory avatar paths are resolved against
    pub root: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
        }
    }
}

/// Cross-origin settings for the JSON API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_any_origin: bool,
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub media: MediaConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> BookshelfResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> BookshelfResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `path`, else by `BOOKSHELF_CONFIG`, else defaults
    pub fn load(path: Option<&str>) -> BookshelfResult<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        match path.or(from_env.as_deref()) {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether the signing secret is still the built-in development value
    pub fn uses_development_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_SECRET
    }

    fn validate(&self) -> BookshelfResult<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.jwt_secret".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_hours".to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
