// ABOUTME: Application-wide error types for vendeploy.
// ABOUTME: Uses thiserror; module errors convert in via #[from].

use crate::artifacts::ArtifactError;
use crate::chain::ProviderError;
use crate::deploy::DeployError;
use crate::plan::PlanError;
use crate::verify::VerificationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("no networks configured")]
    NoNetworks,

    #[error("several networks configured ({}), pass --network or set default_network", .0.join(", "))]
    AmbiguousNetwork(Vec<String>),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("network {network} has no {setting} configured")]
    MissingSetting {
        network: String,
        setting: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("cannot set up source verification: {0}")]
    Verifier(#[from] VerificationError),

    #[error("no deployment record for network {network} at {path}")]
    RecordNotFound { network: String, path: PathBuf },

    #[error("source verification failed for: {}", .failed.join(", "))]
    VerificationIncomplete { failed: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
