//! CLI configuration file loading
//!
//! A single YAML file carries the bridge connection settings and the
//! optional local screening policy.

use serde::{Deserialize, Serialize};
use std::path::Path;
use wardlink_core::RetrievalError;
use wardlink_egress::bridge::BridgeConfig;
use wardlink_egress::client::HttpClientConfig;
use wardlink_retrieval::RetrievalPolicy;

/// On-disk CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardlinkConfig {
    #[serde(default)]
    pub bridge: BridgeSettings,

    #[serde(default)]
    pub policy: RetrievalPolicy,
}

/// Bridge section of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Base URL of the compliance bridge
    pub base_url: String,

    /// API key; omit to connect unauthenticated
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout override in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Retry budget override for transient errors
    #[serde(default)]
    pub max_retries: Option<u32>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787".to_string(),
            api_key: None,
            timeout_secs: None,
            max_retries: None,
        }
    }
}

impl WardlinkConfig {
    /// Read and parse the config file
    pub fn load(path: &Path) -> Result<Self, RetrievalError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        serde_yaml::from_str(&contents)
            .map_err(|e| RetrievalError::Config(format!("Invalid YAML: {}", e)))
    }

    /// Assemble the egress connector configuration
    pub fn bridge_config(&self) -> BridgeConfig {
        let mut client_config = HttpClientConfig::default();
        if let Some(timeout_secs) = self.bridge.timeout_secs {
            client_config.timeout_secs = timeout_secs;
        }
        if let Some(max_retries) = self.bridge.max_retries {
            client_config.max_retries = max_retries;
        }

        let mut config =
            BridgeConfig::new(&self.bridge.base_url).with_client_config(client_config);
        if let Some(api_key) = &self.bridge.api_key {
            config = config.with_api_key(api_key);
        }
        config
    }
}
