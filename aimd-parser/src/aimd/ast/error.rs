//! Error types for parsing and validation

use super::range::Position;
use serde::Serialize;
use std::fmt;

/// Category of a [`ParseError`], also used as the diagnostic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidName,
    DuplicateName,
    InvalidSyntax,
    TypeAnnotation,
    UndefinedReference,
    IncompleteCustomType,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "invalid-name",
            ErrorKind::DuplicateName => "duplicate-name",
            ErrorKind::InvalidSyntax => "invalid-syntax",
            ErrorKind::TypeAnnotation => "type-annotation",
            ErrorKind::UndefinedReference => "undefined-reference",
            ErrorKind::IncompleteCustomType => "incomplete-custom-type",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors raised while turning a document into an AST or checking it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A var, step or check name breaks the naming rules
    #[error("{message} at {position}")]
    InvalidName { message: String, position: Position },

    /// Two declarations normalize to the same name
    #[error("{message} at {position}")]
    DuplicateName { message: String, position: Position },

    /// A payload that doesn't match its directive's grammar
    #[error("{message} at {position}")]
    InvalidSyntax { message: String, position: Position },

    /// A malformed type expression, such as `list[`
    #[error("{message} at {position}")]
    TypeAnnotation { message: String, position: Position },

    /// A `ref_var` or `ref_step` without a matching declaration
    #[error("{message} at {position}")]
    UndefinedReference { message: String, position: Position },

    /// A `list[Custom]` table that declares no subvars
    #[error("{message} at {position}")]
    IncompleteCustomType { message: String, position: Position },
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::InvalidName => ParseError::InvalidName { message, position },
            ErrorKind::DuplicateName => ParseError::DuplicateName { message, position },
            ErrorKind::InvalidSyntax => ParseError::InvalidSyntax { message, position },
            ErrorKind::TypeAnnotation => ParseError::TypeAnnotation { message, position },
            ErrorKind::UndefinedReference => {
                ParseError::UndefinedReference { message, position }
            }
            ErrorKind::IncompleteCustomType => {
                ParseError::IncompleteCustomType { message, position }
            }
        }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::InvalidSyntax, message, position)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidName { .. } => ErrorKind::InvalidName,
            ParseError::DuplicateName { .. } => ErrorKind::DuplicateName,
            ParseError::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            ParseError::TypeAnnotation { .. } => ErrorKind::TypeAnnotation,
            ParseError::UndefinedReference { .. } => ErrorKind::UndefinedReference,
            ParseError::IncompleteCustomType { .. } => ErrorKind::IncompleteCustomType,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::InvalidName { message, .. }
            | ParseError::DuplicateName { message, .. }
            | ParseError::InvalidSyntax { message, .. }
            | ParseError::TypeAnnotation { message, .. }
            | ParseError::UndefinedReference { message, .. }
            | ParseError::IncompleteCustomType { message, .. } => message,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::InvalidName { position, .. }
            | ParseError::DuplicateName { position, .. }
            | ParseError::InvalidSyntax { position, .. }
            | ParseError::TypeAnnotation { position, .. }
            | ParseError::UndefinedReference { position, .. }
            | ParseError::IncompleteCustomType { position, .. } => *position,
        }
    }
}

/// Format source code context around an error position
///
/// Shows 2 lines before the error, the error's first line with a >> marker, and 2 lines after.
pub fn format_source_context(source: &str, position: &Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.start_line.saturating_sub(1);

    let first = error_line.saturating_sub(2);
    let last = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (index, line) in lines.iter().enumerate().take(last).skip(first) {
        let marker = if index == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, index + 1, line));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_appends_position() {
        let err = ParseError::new(
            ErrorKind::InvalidName,
            "Variable name cannot start with underscore: _x",
            Position::new(2, 2, 1, 10),
        );
        assert_eq!(
            err.to_string(),
            "Variable name cannot start with underscore: _x at line 2, col 1-10"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert_eq!(err.kind().code(), "invalid-name");
    }

    #[test]
    fn test_new_round_trips_kind() {
        let kinds = [
            ErrorKind::InvalidName,
            ErrorKind::DuplicateName,
            ErrorKind::InvalidSyntax,
            ErrorKind::TypeAnnotation,
            ErrorKind::UndefinedReference,
            ErrorKind::IncompleteCustomType,
        ];
        for kind in kinds {
            let err = ParseError::new(kind, "m", Position::new(1, 1, 1, 1));
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "m");
        }
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let context = format_source_context(source, &Position::new(4, 4, 1, 10));

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 1"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_format_source_context_at_start() {
        let context = format_source_context("only\nsecond", &Position::new(1, 1, 1, 4));
        assert!(context.starts_with(">>   1 | only"));
        assert!(context.contains("second"));
    }
}
