// ABOUTME: Deployment state types for the type state pattern.
// ABOUTME: Each state carries exactly the data that exists at that point of a run.

use super::deployment::{DeployedComponent, InitializationReceipt};
use crate::verify::VerificationReport;

/// Plan validated, nothing submitted.
/// Available actions: `deploy_all()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Planned;

/// Every component confirmed on chain.
/// Available actions: `initialize()`
#[derive(Debug, Clone)]
pub struct DeployedAll {
    pub(crate) components: Vec<DeployedComponent>,
}

/// Components wired together.
/// Available actions: `verify()`, `skip_verification()`
#[derive(Debug, Clone)]
pub struct Initialized {
    pub(crate) components: Vec<DeployedComponent>,
    pub(crate) initialization: Option<InitializationReceipt>,
}

/// Run finished; verification outcomes recorded.
#[derive(Debug, Clone)]
pub struct Done {
    pub(crate) components: Vec<DeployedComponent>,
    pub(crate) initialization: Option<InitializationReceipt>,
    pub(crate) report: VerificationReport,
}
