// ABOUTME: Per-network settings: RPC endpoint, signer, gas, and explorer.
// ABOUTME: Resolves env-backed values into concrete settings at startup.

use super::EnvValue;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: EnvValue,

    #[serde(default)]
    pub chain_id: Option<u64>,

    #[serde(default)]
    pub private_key: Option<EnvValue>,

    /// Fixed gas price in wei. Queried from the node when absent.
    #[serde(default)]
    pub gas_price: Option<u64>,

    #[serde(default)]
    pub explorer: Option<ExplorerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    pub api_url: String,

    pub api_key: EnvValue,

    /// Sent as `chainid` for multi-chain explorer APIs.
    #[serde(default)]
    pub chain_id: Option<u64>,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    #[serde(default = "default_verify_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(3)
}

fn default_verify_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Network settings with every env reference resolved.
#[derive(Clone)]
pub struct NetworkSettings {
    pub name: String,
    pub rpc_url: Url,
    pub chain_id: Option<u64>,
    pub private_key: Option<String>,
    pub gas_price: Option<u64>,
    pub explorer: Option<ExplorerConfig>,
}

impl std::fmt::Debug for NetworkSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkSettings")
            .field("name", &self.name)
            .field("rpc_url", &self.rpc_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("gas_price", &self.gas_price)
            .finish()
    }
}

impl NetworkConfig {
    pub fn resolve(&self, name: &str) -> Result<NetworkSettings> {
        let rpc = self.rpc_url.resolve()?;
        let rpc_url = Url::parse(&rpc)
            .map_err(|e| Error::InvalidConfig(format!("network {name}: invalid rpc_url: {e}")))?;

        let private_key = self.private_key.as_ref().map(EnvValue::resolve).transpose()?;

        Ok(NetworkSettings {
            name: name.to_string(),
            rpc_url,
            chain_id: self.chain_id,
            private_key,
            gas_price: self.gas_price,
            explorer: self.explorer.clone(),
        })
    }
}

impl NetworkSettings {
    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .ok_or_else(|| Error::MissingSetting {
                network: self.name.clone(),
                setting: "private_key",
            })
    }

    /// Explorer settings with the API key resolved.
    pub fn require_explorer(&self) -> Result<ExplorerSettings> {
        self.explorer
            .as_ref()
            .ok_or_else(|| Error::MissingSetting {
                network: self.name.clone(),
                setting: "explorer",
            })?
            .resolve(&self.name)
    }
}

impl ExplorerConfig {
    pub fn resolve(&self, network: &str) -> Result<ExplorerSettings> {
        let api_url = Url::parse(&self.api_url).map_err(|e| {
            Error::InvalidConfig(format!("network {network}: invalid explorer api_url: {e}"))
        })?;
        Ok(ExplorerSettings {
            api_url,
            api_key: self.api_key.resolve()?,
            chain_id: self.chain_id,
            poll_interval: self.poll_interval,
            timeout: self.timeout,
        })
    }
}

#[derive(Clone)]
pub struct ExplorerSettings {
    pub api_url: Url,
    pub api_key: String,
    pub chain_id: Option<u64>,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl std::fmt::Debug for ExplorerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerSettings")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
