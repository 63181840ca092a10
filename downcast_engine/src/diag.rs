//! Informational diagnostics emitted while scanning. None of them are fatal.

use std::fmt;

use crate::{DowncastResult, SourceLocation, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Note => "note",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    fn new(severity: Severity, location: &SourceLocation, message: String) -> Self {
        Self {
            severity,
            location: location.clone(),
            message,
        }
    }
}

/// Compiler-style `file:line:col: severity: message`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.location.file, self.location.line, self.location.column, self.severity, self.message
        )
    }
}

/// Receives diagnostics in the order they are produced.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Discards everything
impl DiagnosticSink for () {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// The diagnostics describing one classified literal.
pub fn diagnostics_for(result: &DowncastResult, threshold: f64) -> Vec<Diagnostic> {
    let loc = &result.location;
    let mode = result.mode;
    let original = format!("{:.6}", result.original);
    let error = format!("{:.6}", result.relative_error);
    let threshold = format!("{threshold:.6}");

    match result.tier {
        Tier::Exact => vec![Diagnostic::new(
            Severity::Warning,
            loc,
            format!("float literal `{original}` can be safely downcast to `__{mode}`"),
        )],
        Tier::SafeWithError => vec![
            Diagnostic::new(
                Severity::Warning,
                loc,
                format!("float literal `{original}` can be downcast to `__{mode}` within acceptable error"),
            ),
            Diagnostic::new(
                Severity::Note,
                loc,
                format!("relative error is {error}, threshold is {threshold}"),
            ),
        ],
        Tier::Unsafe => vec![Diagnostic::new(
            Severity::Note,
            loc,
            format!(
                "converting to `__{mode}` would introduce relative error of {error}, exceeding threshold {threshold}"
            ),
        )],
    }
}
