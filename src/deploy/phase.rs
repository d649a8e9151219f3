// ABOUTME: Run phases and the progress sink the orchestrator reports to.
// ABOUTME: Phases mirror the deployment state machine, including the terminal Failed.

use super::deployment::DeployedComponent;
use crate::types::ComponentName;
use crate::verify::VerificationEntry;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RunPhase {
    Planned {
        total: usize,
    },
    Deploying {
        index: usize,
        total: usize,
        component: ComponentName,
    },
    DeployedAll,
    Initializing {
        target: ComponentName,
        method: String,
    },
    Initialized,
    Verifying {
        index: usize,
        total: usize,
        component: ComponentName,
    },
    Done,
    Failed {
        reason: String,
    },
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed { .. })
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Planned { total } => write!(f, "Planned {total} component(s)"),
            RunPhase::Deploying {
                index,
                total,
                component,
            } => write!(f, "Deploying {component} ({}/{total})", index + 1),
            RunPhase::DeployedAll => write!(f, "All components deployed"),
            RunPhase::Initializing { target, method } => {
                write!(f, "Initializing {target} with {method}")
            }
            RunPhase::Initialized => write!(f, "Initialized"),
            RunPhase::Verifying {
                index,
                total,
                component,
            } => write!(f, "Verifying {component} ({}/{total})", index + 1),
            RunPhase::Done => write!(f, "Done"),
            RunPhase::Failed { reason } => write!(f, "Failed: {reason}"),
        }
    }
}

/// Receives progress from a running deployment.
pub trait Progress: Send + Sync {
    fn phase(&self, phase: &RunPhase);

    /// Called once per confirmed component, in deployment order.
    fn deployed(&self, component: &DeployedComponent);

    fn verification(&self, entry: &VerificationEntry);
}

/// The progress line printed for each confirmed component.
pub fn deployed_line(component: &DeployedComponent) -> String {
    format!("{} is deployed to {}", component.name, component.address)
}
