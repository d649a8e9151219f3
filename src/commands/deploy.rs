// ABOUTME: Deploy command implementation.
// ABOUTME: Resolves settings, runs the deployment state machine, and writes the record.

use vendeploy::artifacts::ArtifactStore;
use vendeploy::chain::{JsonRpcProvider, ProviderSettings};
use vendeploy::config::Config;
use vendeploy::deploy::{Deployment, run_deployment};
use vendeploy::diagnostics::{Diagnostics, Warning};
use vendeploy::error::{Error, Result};
use vendeploy::output::Output;
use vendeploy::plan::DeploymentPlan;
use vendeploy::verify::{EtherscanVerifier, SourceVerifier};

pub struct DeployOptions {
    pub network: Option<String>,
    pub no_verify: bool,
    pub strict_verify: bool,
}

pub async fn deploy(config: Config, options: DeployOptions, mut output: Output) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    // Everything static is checked before the first transaction
    let plan = DeploymentPlan::from_config(&config)?;
    let (network_name, network) = config.network(options.network.as_deref())?;
    let settings = network.resolve(network_name)?;
    let private_key = settings.require_private_key()?.to_string();
    let explorer = if options.no_verify {
        None
    } else {
        Some(settings.require_explorer()?)
    };

    let artifacts = ArtifactStore::new(config.artifacts_dir());
    for spec in plan.components().iter() {
        artifacts.creation_code(&spec.name, &spec.args)?;
    }

    let provider = JsonRpcProvider::connect(
        ProviderSettings {
            rpc_url: settings.rpc_url.clone(),
            chain_id: settings.chain_id,
            private_key,
            gas_price: settings.gas_price,
            confirmation_timeout: config.confirmation.timeout,
            poll_interval: config.confirmation.poll_interval,
        },
        artifacts.clone(),
    )
    .await?;

    let verifier = explorer
        .map(|explorer| EtherscanVerifier::new(explorer, artifacts.clone()))
        .transpose()?;

    output.progress(&format!(
        "Deploying {} to {network_name} (chain {}) from {}",
        config.project,
        provider.chain_id(),
        provider.deployer()
    ));

    let done = run_deployment(
        Deployment::new(plan),
        &provider,
        verifier.as_ref().map(|v| v as &dyn SourceVerifier),
        &output,
    )
    .await?;

    let report = done.report();
    for entry in report.failures() {
        diag.warn(Warning::verification_failed(
            &entry.component,
            entry.failure_reason().unwrap_or_default(),
        ));
    }
    if report.skipped {
        diag.warn(Warning::verification_skipped(
            "source verification skipped; run `vendeploy verify` to verify later",
        ));
    }

    let record = done.record(
        &config.project,
        network_name,
        Some(provider.chain_id()),
        Some(provider.deployer()),
    );
    match record.save(&config.record_dir()) {
        Ok(path) => output.progress(&format!("Deployment record written to {}", path.display())),
        Err(e) => diag.warn(Warning::record_not_saved(format!(
            "failed to save deployment record: {e}"
        ))),
    }

    for warning in diag.warnings() {
        output.warning(warning);
    }

    if options.strict_verify && !report.is_clean() {
        return Err(Error::VerificationIncomplete {
            failed: report.failed_components(),
        });
    }

    output.success(&format!(
        "Deployed {} component(s) to {network_name}",
        done.components().len()
    ));
    Ok(())
}
