// ABOUTME: Chain provider error types with SNAFU pattern.
// ABOUTME: Exposes an error kind so callers can tell funding problems from reverts.

use crate::artifacts::ArtifactError;
use crate::types::TxHash;
use snafu::Snafu;
use std::time::Duration;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    #[snafu(display("{method} request failed: {source}"))]
    Transport {
        method: String,
        source: reqwest::Error,
    },

    #[snafu(display("unexpected {method} response: {source}"))]
    Decode {
        method: String,
        source: serde_json::Error,
    },

    #[snafu(display("{method} returned a malformed quantity: {value}"))]
    InvalidQuantity { method: String, value: String },

    #[snafu(display("{method} failed with code {code}: {message}"))]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[snafu(display("deployer account has insufficient funds: {message}"))]
    InsufficientFunds { message: String },

    #[snafu(display("endpoint reports chain id {actual}, expected {expected}"))]
    ChainMismatch { expected: u64, actual: u64 },

    #[snafu(display("transaction {tx_hash} reverted"))]
    Reverted { tx_hash: TxHash },

    #[snafu(display("transaction {tx_hash} not confirmed after {}s", waited.as_secs()))]
    ConfirmationTimeout { tx_hash: TxHash, waited: Duration },

    #[snafu(display("{source}"))]
    Artifact { source: ArtifactError },

    #[snafu(display("invalid private key: {message}"))]
    InvalidKey { message: String },

    #[snafu(display("failed to sign transaction: {message}"))]
    Signing { message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Endpoint unreachable or returned something that is not JSON-RPC.
    Transport,
    /// Node rejected the request.
    Rejected,
    /// Deployer cannot pay for gas.
    InsufficientFunds,
    /// Endpoint is a different chain than configured.
    WrongChain,
    /// Transaction was mined with a failure status.
    Reverted,
    /// No receipt within the confirmation timeout.
    Timeout,
    /// Compiled artifact missing or unusable.
    Artifact,
    /// Key or signature problem.
    Signing,
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Transport { .. }
            | ProviderError::Decode { .. }
            | ProviderError::InvalidQuantity { .. } => ProviderErrorKind::Transport,
            ProviderError::Rpc { .. } => ProviderErrorKind::Rejected,
            ProviderError::InsufficientFunds { .. } => ProviderErrorKind::InsufficientFunds,
            ProviderError::ChainMismatch { .. } => ProviderErrorKind::WrongChain,
            ProviderError::Reverted { .. } => ProviderErrorKind::Reverted,
            ProviderError::ConfirmationTimeout { .. } => ProviderErrorKind::Timeout,
            ProviderError::Artifact { .. } => ProviderErrorKind::Artifact,
            ProviderError::InvalidKey { .. } | ProviderError::Signing { .. } => {
                ProviderErrorKind::Signing
            }
        }
    }

    /// Hash of the transaction involved, when the failure happened after submission.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            ProviderError::Reverted { tx_hash }
            | ProviderError::ConfirmationTimeout { tx_hash, .. } => Some(*tx_hash),
            _ => None,
        }
    }
}

impl From<ArtifactError> for ProviderError {
    fn from(source: ArtifactError) -> Self {
        ProviderError::Artifact { source }
    }
}
