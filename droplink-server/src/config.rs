use droplink_core::{DropError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub cloudinary: CloudinaryConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Maximum accepted upload body size in bytes. Absent means unbounded,
    /// matching the original relay; set it to opt into a limit.
    #[serde(default)]
    pub max_upload_bytes: Option<u64>,
}

/// Blob-store credentials. All three values can come from the environment
/// (`DROPLINK__CLOUDINARY__CLOUD_NAME` and friends).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_folder")]
    pub folder: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Optional timeout for blob-store uploads and download fetches.
    /// Absent means unbounded, matching the original relay.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_folder() -> String {
    "shared_files".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_upload_bytes: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(::config::Environment::with_prefix("DROPLINK").separator("__"))
            .build()
            .map_err(|e| DropError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| DropError::Config(e.to_string()))?;

        Ok(config)
    }
}
