// ABOUTME: Error types for deployment state transitions.
// ABOUTME: Any of these is fatal; the run stops where it failed and nothing is rolled back.

use crate::chain::ProviderError;
use crate::plan::PlanError;
use crate::types::{ComponentName, TxHash};

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Static problem with the plan.
    #[error("configuration error: {0}")]
    Configuration(#[from] PlanError),

    #[error("failed to submit {component}: {source}")]
    Submission {
        component: ComponentName,
        source: ProviderError,
    },

    #[error("{component} was not confirmed: {source}")]
    Confirmation {
        component: ComponentName,
        source: ProviderError,
    },

    #[error("receipt for {component} ({tx_hash}) carries no contract address")]
    MissingContractAddress {
        component: ComponentName,
        tx_hash: TxHash,
    },

    #[error("initialization of {target} failed: {source}")]
    Initialization {
        target: ComponentName,
        source: ProviderError,
    },
}

/// Which part of the run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Configuration,
    Deployment,
    Initialization,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Configuration(_) => DeployErrorKind::Configuration,
            DeployError::Submission { .. }
            | DeployError::Confirmation { .. }
            | DeployError::MissingContractAddress { .. } => DeployErrorKind::Deployment,
            DeployError::Initialization { .. } => DeployErrorKind::Initialization,
        }
    }

    /// The component whose deployment failed, if any.
    pub fn component(&self) -> Option<&ComponentName> {
        match self {
            DeployError::Submission { component, .. }
            | DeployError::Confirmation { component, .. }
            | DeployError::MissingContractAddress { component, .. } => Some(component),
            DeployError::Configuration(_) | DeployError::Initialization { .. } => None,
        }
    }

    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            DeployError::Submission { source, .. }
            | DeployError::Confirmation { source, .. }
            | DeployError::Initialization { source, .. } => Some(source),
            _ => None,
        }
    }
}
