// ABOUTME: Persistent JSON record of a finished deployment, one file per network.
// ABOUTME: Lets verification be retried later with the exact arguments used.

use crate::error::{Error, Result};
use crate::types::Address;
use crate::verify::{VerificationReport, VerificationRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Deployment;
use super::deployment::{DeployedComponent, InitializationReceipt};
use super::state::Done;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub project: String,
    pub network: String,
    pub chain_id: Option<u64>,
    pub deployer: Option<Address>,
    pub deployed_at: DateTime<Utc>,
    pub components: Vec<DeployedComponent>,
    #[serde(default)]
    pub initialization: Option<InitializationReceipt>,
    #[serde(default)]
    pub verification: VerificationReport,
}

impl DeploymentRecord {
    pub fn path(dir: &Path, network: &str) -> PathBuf {
        dir.join(format!("{network}.json"))
    }

    /// Write the record to `<dir>/<network>.json`, creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = Self::path(dir, &self.network);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        tracing::debug!(path = %path.display(), "deployment record written");
        Ok(path)
    }

    pub fn load(dir: &Path, network: &str) -> Result<Self> {
        let path = Self::path(dir, network);
        if !path.exists() {
            return Err(Error::RecordNotFound {
                network: network.to_string(),
                path,
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn verification_requests(&self) -> Vec<VerificationRequest> {
        self.components
            .iter()
            .map(DeployedComponent::verification_request)
            .collect()
    }

    /// Replace the stored verification outcomes with a newer report.
    pub fn with_verification(mut self, report: VerificationReport) -> Self {
        self.verification = report;
        self
    }
}

impl Deployment<Done> {
    pub fn record(
        &self,
        project: &str,
        network: &str,
        chain_id: Option<u64>,
        deployer: Option<Address>,
    ) -> DeploymentRecord {
        DeploymentRecord {
            project: project.to_string(),
            network: network.to_string(),
            chain_id,
            deployer,
            deployed_at: Utc::now(),
            components: self.components().to_vec(),
            initialization: self.initialization().cloned(),
            verification: self.report().clone(),
        }
    }
}
