/// Configuration management for Cinetrack
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub database: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_directory = PathBuf::from("./data");
        Self {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 8080,
            },
            storage: StorageConfig {
                database: data_directory.join("cinetrack.sqlite"),
                data_directory,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("CINETRACK_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("CINETRACK_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ApiError::Validation("Invalid port number".to_string()))?;

        let data_directory: PathBuf = env::var("CINETRACK_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let database = env::var("CINETRACK_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("cinetrack.sqlite"));

        let level = env::var("CINETRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let config = Self {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                data_directory,
                database,
            },
            logging: LoggingConfig { level },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.service.hostname.is_empty() {
            return Err(ApiError::Validation("Hostname must not be empty".to_string()));
        }
        if self.service.port == 0 {
            return Err(ApiError::Validation("Port must be non-zero".to_string()));
        }
        Ok(())
    }
}
