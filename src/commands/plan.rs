// ABOUTME: Plan command implementation.
// ABOUTME: Validates the configuration and prints the deployment order without touching the network.

use vendeploy::config::Config;
use vendeploy::error::Result;
use vendeploy::output::Output;
use vendeploy::plan::{DeploymentPlan, PlanArg};

fn describe_args(args: &[PlanArg]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn plan(config: &Config, network: Option<&str>, output: &Output) -> Result<()> {
    let plan = DeploymentPlan::from_config(config)?;

    // an explicit network must exist; otherwise show one only if it is unambiguous
    let network = match network {
        Some(name) => Some(config.network(Some(name))?.0),
        None => config.network(None).ok().map(|(name, _)| name),
    };

    output.progress(&format!(
        "Plan for {}{}:",
        config.project,
        network.map(|n| format!(" on {n}")).unwrap_or_default()
    ));
    for (index, spec) in plan.components().iter().enumerate() {
        output.progress(&format!(
            "  {}. {}({})",
            index + 1,
            spec.name,
            describe_args(&spec.args)
        ));
    }
    if let Some(call) = plan.initialize() {
        output.progress(&format!(
            "  then {}.{}({})",
            call.target,
            call.method.name(),
            describe_args(&call.args)
        ));
    }

    output.success(&format!("Plan is valid: {} component(s)", plan.len()));
    Ok(())
}
