// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

/// Collects non-fatal warnings during a run.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = warning.kind.as_str(), "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A component could not be source-verified.
    pub fn verification_failed(component: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self {
            kind: WarningKind::VerificationFailed,
            message: format!("verification of {component} failed: {reason}"),
        }
    }

    /// The deployment record could not be written.
    pub fn record_not_saved(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::RecordNotSaved,
            message: message.into(),
        }
    }

    /// Verification was not attempted.
    pub fn verification_skipped(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::VerificationSkipped,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Explorer rejected or never confirmed a verification.
    VerificationFailed,
    /// Verification was not attempted for this run.
    VerificationSkipped,
    /// Deployment record file could not be written.
    RecordNotSaved,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::VerificationFailed => "verification_failed",
            WarningKind::VerificationSkipped => "verification_skipped",
            WarningKind::RecordNotSaved => "record_not_saved",
        }
    }
}
