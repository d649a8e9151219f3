// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes and reports deployment progress.

use crate::deploy::{DeployedComponent, Progress, RunPhase, deployed_line};
use crate::diagnostics::Warning;
use crate::verify::{VerificationEntry, VerificationStatus};
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (deployed addresses and final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => emit(&JsonEvent::Success {
                message,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, warning: &Warning) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {}", warning.message),
            OutputMode::Json => emit(&JsonEvent::Warning {
                kind: warning.kind.as_str(),
                message: &warning.message,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent::Error {
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

impl Progress for Output {
    fn phase(&self, phase: &RunPhase) {
        match self.mode {
            OutputMode::Normal => match phase {
                RunPhase::Failed { .. } => {}
                other => println!("==> {other}"),
            },
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent::Phase { phase }),
        }
    }

    fn deployed(&self, component: &DeployedComponent) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", deployed_line(component)),
            OutputMode::Json => emit(&JsonEvent::Deployed {
                component: component.name.as_str(),
                address: component.address.to_string(),
                tx_hash: component.tx_hash.to_string(),
            }),
        }
    }

    fn verification(&self, entry: &VerificationEntry) {
        match self.mode {
            OutputMode::Normal => match &entry.status {
                VerificationStatus::Failed { reason } => {
                    eprintln!("{} verification failed: {reason}", entry.component)
                }
                status => println!("{} {status}", entry.component),
            },
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent::Verification { entry }),
        }
    }
}

fn emit(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Success {
        message: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },
    Error {
        message: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },
    Warning {
        kind: &'static str,
        message: &'a str,
    },
    Phase {
        #[serde(flatten)]
        phase: &'a RunPhase,
    },
    Deployed {
        component: &'a str,
        address: String,
        tx_hash: String,
    },
    Verification {
        #[serde(flatten)]
        entry: &'a VerificationEntry,
    },
}
