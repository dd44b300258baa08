//! Naming rules for vars, steps and checks

use crate::aimd::ast::{ErrorKind, ParseError, Position};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

/// What a declared name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    Variable,
    Step,
    Check,
}

impl NameCategory {
    pub fn label(&self) -> &'static str {
        match self {
            NameCategory::Variable => "variable",
            NameCategory::Step => "step",
            NameCategory::Check => "check",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            NameCategory::Variable => "Variable",
            NameCategory::Step => "Step",
            NameCategory::Check => "Check",
        }
    }
}

impl fmt::Display for NameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Names start with a letter and continue with letters, digits or underscores.
pub fn check_name(name: &str, category: NameCategory, position: Position) -> Result<(), ParseError> {
    if NAME.is_match(name) {
        return Ok(());
    }

    let message = if name.starts_with('_') {
        format!("{} name cannot start with underscore: {}", category.title(), name)
    } else {
        format!(
            "Invalid {} name: '{}'. Names must start with a letter and contain only letters, digits and underscores",
            category.label(),
            name
        )
    };
    Err(ParseError::new(ErrorKind::InvalidName, message, position))
}

/// Collapse runs of underscores, so `user__a` and `user_a` compare equal.
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    UNDERSCORE_RUN.replace_all(name, "_")
}
