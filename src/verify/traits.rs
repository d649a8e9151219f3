// ABOUTME: Source verification capability and its request/outcome types.
// ABOUTME: Verification errors are kept apart from deployment errors; they are never fatal.

use crate::types::{Address, ArgValue, ComponentName, encode_args};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One deployed component, with the exact arguments it was constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub component: ComponentName,
    pub address: Address,
    pub constructor_args: Vec<ArgValue>,
}

impl VerificationRequest {
    /// ABI-encoded constructor arguments as bare hex, the form explorers take.
    pub fn encoded_args_hex(&self) -> String {
        hex::encode(encode_args(&self.constructor_args))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("rejected by verification service: {0}")]
    Rejected(String),

    #[error("verification still pending after {waited_secs}s (guid {guid})")]
    Timeout { guid: String, waited_secs: u64 },

    #[error("verification service unreachable: {0}")]
    Transport(String),

    #[error("verification service error: {0}")]
    Api(String),

    #[error("cannot prepare sources: {0}")]
    Source(String),
}

#[async_trait]
pub trait SourceVerifier: Send + Sync {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerifyOutcome, VerificationError>;
}
