// ABOUTME: Runs verification requests concurrently and collects outcomes in plan order.
// ABOUTME: A failed request is recorded and never affects the others.

use super::traits::{SourceVerifier, VerificationError, VerificationRequest, VerifyOutcome};
use crate::types::{Address, ComponentName};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    AlreadyVerified,
    Failed { reason: String },
}

impl From<&Result<VerifyOutcome, VerificationError>> for VerificationStatus {
    fn from(result: &Result<VerifyOutcome, VerificationError>) -> Self {
        match result {
            Ok(VerifyOutcome::Verified) => VerificationStatus::Verified,
            Ok(VerifyOutcome::AlreadyVerified) => VerificationStatus::AlreadyVerified,
            Err(e) => VerificationStatus::Failed {
                reason: e.to_string(),
            },
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::AlreadyVerified => write!(f, "already verified"),
            VerificationStatus::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    pub component: ComponentName,
    pub address: Address,
    #[serde(flatten)]
    pub status: VerificationStatus,
}

impl VerificationEntry {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, VerificationStatus::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            VerificationStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub entries: Vec<VerificationEntry>,
    /// Verification was not attempted for this run.
    #[serde(default)]
    pub skipped: bool,
}

impl VerificationReport {
    pub fn skipped() -> Self {
        Self {
            entries: Vec::new(),
            skipped: true,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerificationEntry> {
        self.entries.iter().filter(|e| e.is_failure())
    }

    pub fn failed_components(&self) -> Vec<String> {
        self.failures().map(|e| e.component.to_string()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Verify every request; the report keeps the order of `requests`.
pub async fn verify_all<V>(verifier: &V, requests: &[VerificationRequest]) -> VerificationReport
where
    V: SourceVerifier + ?Sized,
{
    let results = join_all(requests.iter().map(|request| async move {
        let result = verifier.verify(request).await;
        match &result {
            Ok(outcome) => {
                tracing::info!(component = %request.component, address = %request.address, ?outcome, "verification finished");
            }
            Err(e) => {
                tracing::warn!(component = %request.component, address = %request.address, error = %e, "verification failed");
            }
        }
        VerificationEntry {
            component: request.component.clone(),
            address: request.address,
            status: VerificationStatus::from(&result),
        }
    }))
    .await;

    VerificationReport {
        entries: results,
        skipped: false,
    }
}
