// ABOUTME: Verify command implementation.
// ABOUTME: Re-submits a recorded deployment for source verification with its stored arguments.

use vendeploy::artifacts::ArtifactStore;
use vendeploy::config::Config;
use vendeploy::deploy::{DeploymentRecord, Progress};
use vendeploy::diagnostics::{Diagnostics, Warning};
use vendeploy::error::{Error, Result};
use vendeploy::output::Output;
use vendeploy::verify::{EtherscanVerifier, verify_all};

pub async fn verify(
    config: Config,
    network: Option<String>,
    strict: bool,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    let (network_name, network) = config.network(network.as_deref())?;
    // only the explorer is needed; the RPC endpoint and key may be unset here
    let explorer = network
        .explorer
        .as_ref()
        .ok_or_else(|| Error::MissingSetting {
            network: network_name.to_string(),
            setting: "explorer",
        })?
        .resolve(network_name)?;

    let record_dir = config.record_dir();
    let record = DeploymentRecord::load(&record_dir, network_name)?;
    let verifier = EtherscanVerifier::new(explorer, ArtifactStore::new(config.artifacts_dir()))?;

    let requests = record.verification_requests();
    output.progress(&format!(
        "Verifying {} component(s) deployed to {network_name}",
        requests.len()
    ));

    let report = verify_all(&verifier, &requests).await;
    for entry in &report.entries {
        output.verification(entry);
        if let Some(reason) = entry.failure_reason() {
            diag.warn(Warning::verification_failed(&entry.component, reason));
        }
    }

    let failed = report.failed_components();
    let total = report.entries.len();
    if let Err(e) = record.with_verification(report).save(&record_dir) {
        diag.warn(Warning::record_not_saved(format!(
            "failed to update deployment record: {e}"
        )));
    }

    for warning in diag.warnings() {
        output.warning(warning);
    }

    if strict && !failed.is_empty() {
        return Err(Error::VerificationIncomplete { failed });
    }

    output.success(&format!(
        "Verified {} of {total} component(s)",
        total - failed.len()
    ));
    Ok(())
}
