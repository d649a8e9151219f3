// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Sequencer, initializer, and verification step, plus progress reporting and the run record.

mod deployment;
mod error;
mod phase;
mod record;
mod runner;
mod state;
mod transitions;

pub use deployment::{DeployedComponent, Deployment, InitializationReceipt};
pub use error::{DeployError, DeployErrorKind};
pub use phase::{Progress, RunPhase, deployed_line};
pub use record::DeploymentRecord;
pub use runner::run_deployment;
pub use state::{DeployedAll, Done, Initialized, Planned};
