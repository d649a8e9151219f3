// ABOUTME: Drives a planned deployment through every state to Done.
// ABOUTME: Reports the terminal Failed phase when deployment or initialization fails.

use crate::chain::{ChainProvider, ProviderError};
use crate::verify::SourceVerifier;

use super::Deployment;
use super::error::DeployError;
use super::phase::{Progress, RunPhase};
use super::state::{Done, Planned};

/// Deploy, initialize, then verify (when a verifier is given).
///
/// Verification outcomes land in the report of the returned deployment; only
/// deployment and initialization failures are errors.
pub async fn run_deployment<P>(
    deployment: Deployment<Planned>,
    provider: &P,
    verifier: Option<&dyn SourceVerifier>,
    progress: &dyn Progress,
) -> Result<Deployment<Done>, DeployError>
where
    P: ChainProvider + ?Sized,
{
    progress.phase(&RunPhase::Planned {
        total: deployment.plan().len(),
    });

    let result = drive(deployment, provider, verifier, progress).await;
    if let Err(e) = &result {
        match e.provider_error().and_then(ProviderError::tx_hash) {
            Some(hash) => tracing::error!(error = %e, tx = %hash, "deployment failed"),
            None => tracing::error!(error = %e, "deployment failed"),
        }
        progress.phase(&RunPhase::Failed {
            reason: e.to_string(),
        });
    }
    result
}

async fn drive<P>(
    deployment: Deployment<Planned>,
    provider: &P,
    verifier: Option<&dyn SourceVerifier>,
    progress: &dyn Progress,
) -> Result<Deployment<Done>, DeployError>
where
    P: ChainProvider + ?Sized,
{
    let deployed = deployment.deploy_all(provider, progress).await?;
    let initialized = deployed.initialize(provider, progress).await?;

    Ok(match verifier {
        Some(verifier) => initialized.verify(verifier, progress).await,
        None => initialized.skip_verification(progress),
    })
}
