//! Configuration management for the allowlist SDK
//!
//! Network constants are loaded from TOML configuration files with
//! environment-variable overrides, falling back to built-in defaults for
//! the known networks.

use alloy_primitives::U256;
use config::{Config as ConfigLoader, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::allowlist::types::{serde_units, DEFAULT_TOTAL_UNITS};
use crate::error::Error;

const ENV_CONFIG_DIR: &str = "ALLOWLIST_CONFIG_DIR";
const ENV_NETWORK: &str = "ALLOWLIST_NETWORK";
const ENV_STORAGE_API_URL: &str = "ALLOWLIST_STORAGE_API_URL";
const ENV_STORAGE_API_TOKEN: &str = "ALLOWLIST_STORAGE_API_TOKEN";
const ENV_IPFS_GATEWAY_HOST: &str = "ALLOWLIST_IPFS_GATEWAY_HOST";

/// Per-network constants for the allow-list flows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConstants {
    /// Network name (e.g. "sepolia")
    pub network_name: String,
    /// Chain ID of the network whose addresses the lists gate
    pub chain_id: u64,
    /// Storage (pinning service) API base URL
    pub storage_api_url: String,
    /// Bearer token for the storage API
    #[serde(default)]
    pub storage_api_token: Option<String>,
    /// Host of the IPFS subdomain gateway used on the inspection path
    pub ipfs_gateway_host: String,
    /// Request timeout for storage calls (seconds)
    pub request_timeout_secs: u64,
    /// Total units one allow list must distribute
    #[serde(with = "serde_units")]
    pub total_units: U256,
}

impl NetworkConstants {
    /// Load network constants from the configuration file
    ///
    /// Scans `$ALLOWLIST_CONFIG_DIR` and the conventional `config/`
    /// locations for a `networks` file, then applies environment
    /// overrides. Known networks fall back to built-in constants when no
    /// file is present.
    pub fn load(network: &str) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let config_dir = env::var(ENV_CONFIG_DIR).unwrap_or_else(|_| "config".to_string());
        let config_paths = vec![
            format!("{}/networks", config_dir),
            "config/networks".to_string(),
            "../config/networks".to_string(),
        ];

        for config_path in &config_paths {
            if let Ok(settings) = ConfigLoader::builder()
                .add_source(File::with_name(config_path))
                .build()
            {
                if let Ok(mut constants) = settings.get::<NetworkConstants>(network) {
                    constants.apply_env_overrides();
                    return Ok(constants);
                }
            }
        }

        match network {
            "sepolia" => {
                let mut constants = Self::default();
                constants.apply_env_overrides();
                Ok(constants)
            }
            _ => Err(ConfigError::NotFound(format!(
                "Network configuration for '{}' not found",
                network
            ))),
        }
    }

    /// Network selected by `$ALLOWLIST_NETWORK`, defaulting to sepolia
    pub fn from_env() -> Result<Self, ConfigError> {
        let network = env::var(ENV_NETWORK).unwrap_or_else(|_| "sepolia".to_string());
        Self::load(&network)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(ENV_STORAGE_API_URL) {
            self.storage_api_url = value;
        }
        if let Ok(value) = env::var(ENV_STORAGE_API_TOKEN) {
            self.storage_api_token = Some(value);
        }
        if let Ok(value) = env::var(ENV_IPFS_GATEWAY_HOST) {
            self.ipfs_gateway_host = value;
        }
    }
}

impl Default for NetworkConstants {
    fn default() -> Self {
        Self {
            network_name: "sepolia".to_string(),
            chain_id: 11155111,
            storage_api_url: "https://api.web3.storage".to_string(),
            storage_api_token: None,
            ipfs_gateway_host: "dweb.link".to_string(),
            request_timeout_secs: 30,
            total_units: DEFAULT_TOTAL_UNITS,
        }
    }
}

/// Complete SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistConfig {
    /// Active network configuration
    pub network: NetworkConstants,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            network: NetworkConstants::default(),
        }
    }
}

impl AllowlistConfig {
    /// Configuration for a named network
    pub fn for_network(network: &str) -> Result<Self, Error> {
        let network = NetworkConstants::load(network)
            .map_err(|e| Error::Config(format!("Failed to load network config: {}", e)))?;
        Ok(Self { network })
    }

    /// Load configuration from a TOML file
    pub fn load(path: &PathBuf) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let config: AllowlistConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &PathBuf) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("allowlist-sdk");
        path.push("config.toml");
        path
    }
}
