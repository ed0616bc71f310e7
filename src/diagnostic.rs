//! Run-level diagnostics.
//!
//! Every per-table or per-column problem that does not abort a run ends up
//! here: unresolvable foreign keys, unmapped native types, suppressed relation
//! warnings, dependency cycles. The analysis report carries them alongside the
//! inferred data.

use serde::{Deserialize, Serialize};

/// A diagnostic message attached to a schema element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level.
    pub severity: Severity,
    /// The element the diagnostic is about (`table`, `table.column`, ...).
    pub subject: String,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Create a new informational diagnostic.
    pub fn info(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something was skipped or degraded.
    Warning,
    /// Something worth knowing that changed nothing.
    Info,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}: {}: {}", level, self.subject, self.message)
    }
}
