//! Diagnostics reported by validation
//!
//!     A [`Diagnostic`] is a message anchored at a [`Position`], with a severity and a stable
//!     code taken from the [`ErrorKind`] of the error it came from. Validation turns every
//!     [`ParseError`] it finds into one diagnostic and returns them ordered by start position.

use super::error::{ErrorKind, ParseError};
use super::range::Position;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub position: Position,
    pub severity: DiagnosticSeverity,
    pub code: ErrorKind,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, position: Position, code: ErrorKind) -> Self {
        Self {
            message: message.into(),
            position,
            severity: DiagnosticSeverity::Error,
            code,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::new(err.message(), err.position(), err.kind())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = &self.position;
        if pos.is_multiline() {
            write!(
                f,
                "Line {}-{}, Col {}-{}: {}",
                pos.start_line, pos.end_line, pos.start_col, pos.end_col, self.message
            )
        } else {
            write!(
                f,
                "Line {}, Col {}-{}: {}",
                pos.start_line, pos.start_col, pos.end_col, self.message
            )
        }
    }
}

/// Sort diagnostics by `(start_line, start_col)`; ties keep their order.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.position.sort_key());
}
