// ABOUTME: Command module aggregator for the vendeploy CLI.
// ABOUTME: Re-exports plan, deploy, and verify command handlers.

mod deploy;
mod plan;
mod verify;

pub use deploy::{DeployOptions, deploy};
pub use plan::plan;
pub use verify::verify;
