// ABOUTME: Configuration types and parsing for vendeploy.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and network selection.

mod component;
mod deserialize;
mod env_value;
mod init;
mod network;

pub use component::{ArgEntry, ComponentConfig, InitializeConfig};
pub use env_value::EnvValue;
pub use init::init_config;
pub use network::{ExplorerConfig, ExplorerSettings, NetworkConfig, NetworkSettings};

use crate::error::{Error, Result};
use crate::types::Address;
use deserialize::deserialize_components;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "vendeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "vendeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".vendeploy/config.yml";

/// Name under which the `admin` address is available to `address:` arguments.
pub const ADMIN_ADDRESS_NAME: &str = "admin";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project: String,

    #[serde(default)]
    pub default_network: Option<String>,

    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,

    #[serde(default = "default_artifacts_dir")]
    pub artifacts: PathBuf,

    #[serde(default)]
    pub admin: Option<Address>,

    #[serde(default)]
    pub addresses: BTreeMap<String, Address>,

    #[serde(deserialize_with = "deserialize_components")]
    pub components: NonEmpty<ComponentConfig>,

    #[serde(default)]
    pub initialize: Option<InitializeConfig>,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,

    #[serde(default = "default_record_dir")]
    pub record_dir: PathBuf,

    /// Directory the config was loaded from; relative paths resolve against it.
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConfirmationConfig {
    #[serde(default = "default_confirmation_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_confirmation_poll", with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            timeout: default_confirmation_timeout(),
            poll_interval: default_confirmation_poll(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_record_dir() -> PathBuf {
    PathBuf::from("deployments")
}

fn default_confirmation_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_confirmation_poll() -> Duration {
    Duration::from_secs(2)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.admin.is_some() && self.addresses.contains_key(ADMIN_ADDRESS_NAME) {
            return Err(Error::InvalidConfig(format!(
                "`{ADMIN_ADDRESS_NAME}` is set both at the top level and under `addresses`"
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        // `.vendeploy/config.yml` lives one level below the project root
        if config.base_dir.ends_with(".vendeploy") {
            config.base_dir.pop();
        }
        Ok(config)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Select a network: explicit name, then `default_network`, then the only one defined.
    pub fn network(&self, name: Option<&str>) -> Result<(&str, &NetworkConfig)> {
        let name = match name.or(self.default_network.as_deref()) {
            Some(name) => name,
            None => {
                let mut names = self.networks.keys();
                match (names.next(), names.next()) {
                    (None, _) => return Err(Error::NoNetworks),
                    (Some(only), None) => only.as_str(),
                    _ => {
                        return Err(Error::AmbiguousNetwork(
                            self.networks.keys().cloned().collect(),
                        ));
                    }
                }
            }
        };

        self.networks
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| Error::UnknownNetwork(name.to_string()))
    }

    /// Static addresses available to `address:` arguments, including `admin`.
    pub fn named_addresses(&self) -> BTreeMap<String, Address> {
        let mut named = self.addresses.clone();
        if let Some(admin) = self.admin {
            named.insert(ADMIN_ADDRESS_NAME.to_string(), admin);
        }
        named
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.base_dir.join(&self.artifacts)
    }

    pub fn record_dir(&self) -> PathBuf {
        self.base_dir.join(&self.record_dir)
    }
}
