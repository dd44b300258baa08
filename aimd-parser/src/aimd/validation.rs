//! Validation
//!
//!     Validation answers one question for a whole document: is it valid, and if not, what is
//!     wrong with it. Unlike [parse_document](crate::aimd::parsing::parse_document) it never
//!     stops at the first problem.
//!
//! Policy
//!
//!     Every directive is built on its own, so a malformed payload becomes one diagnostic and
//!     the rest of the document is still checked. On the built document we run:
//!
//!         1. Name legality for vars, subvars, steps and checks.
//!         2. Duplicate detection across vars, steps and checks, comparing names with runs of
//!            underscores collapsed. Only the second and later occurrences are reported.
//!         3. Duplicate subvars within each table.
//!         4. Custom-type completeness: a `list[Custom]` table must declare subvars.
//!         5. Reference resolution for `ref_var` and `ref_step`.
//!
//!     Reference resolution is skipped when any declaring directive failed to build. Its
//!     declaration is missing from the document, and every reference to it would be reported as
//!     undefined on top of the real problem.
//!
//!     Diagnostics come back sorted by start line, then start column.

pub mod checks;
pub mod names;

use crate::aimd::ast::diagnostics::sort_diagnostics;
use crate::aimd::ast::{Diagnostic, Document, ParseError};
use crate::aimd::building::build_document;
use crate::aimd::lexing::tokenize;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Switches for the optional document checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Resolve `ref_var` / `ref_step` targets
    pub check_references: bool,
    /// Require subvars for `list[Custom]` tables
    pub check_custom_types: bool,
    /// Item type names treated like primitives by the custom-type check
    pub extra_scalar_types: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_references: true,
            check_custom_types: true,
            extra_scalar_types: Vec::new(),
        }
    }
}

impl ValidationOptions {
    pub fn is_extra_scalar(&self, type_name: &str) -> bool {
        self.extra_scalar_types.iter().any(|t| t == type_name)
    }
}

/// Validate with the default options.
pub fn validate(source: &str) -> (bool, Vec<Diagnostic>) {
    validate_with_options(source, &ValidationOptions::default())
}

pub fn validate_with_options(
    source: &str,
    options: &ValidationOptions,
) -> (bool, Vec<Diagnostic>) {
    let outcome = build_document(&tokenize(source));
    let declarations_complete = outcome.declarations_complete();
    let doc = &outcome.document;

    let mut errors: Vec<ParseError> = outcome.errors.iter().map(|(_, e)| e.clone()).collect();
    errors.extend(checks::name_errors(doc));
    errors.extend(checks::duplicate_errors(doc));
    errors.extend(checks::subvar_duplicate_errors(doc));

    if options.check_custom_types {
        errors.extend(checks::custom_type_errors(doc, options));
    }
    if options.check_references {
        if declarations_complete {
            errors.extend(checks::reference_errors(doc));
        } else {
            debug!("declarations failed to build, skipping reference resolution");
        }
    }

    let mut diagnostics: Vec<Diagnostic> = errors.into_iter().map(Diagnostic::from).collect();
    sort_diagnostics(&mut diagnostics);
    debug!(diagnostics = diagnostics.len(), "validated document");

    (diagnostics.is_empty(), diagnostics)
}

/// Naming and uniqueness errors of a built document, earliest first
pub(crate) fn strict_errors(doc: &Document) -> Vec<ParseError> {
    let mut errors = checks::name_errors(doc);
    errors.extend(checks::duplicate_errors(doc));
    errors.extend(checks::subvar_duplicate_errors(doc));
    errors.sort_by_key(|e| e.position().sort_key());
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aimd::ast::ErrorKind;

    #[test]
    fn test_empty_document_is_valid() {
        for source in ["", "Just prose, no directives."] {
            let (valid, diagnostics) = validate(source);
            assert!(valid);
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn test_syntax_error_does_not_hide_others() {
        let source = "{{var|a = }}\n{{var|_b}}\n{{var|c}}\n{{var|c}}";
        let (valid, diagnostics) = validate(source);

        assert!(!valid);
        let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorKind::InvalidSyntax,
                ErrorKind::InvalidName,
                ErrorKind::DuplicateName
            ]
        );
        assert_eq!(diagnostics[2].position.start_line, 4);
    }

    #[test]
    fn test_references_skipped_when_declarations_fail() {
        let (_, diagnostics) = validate("{{var|x, oops}}\n{{ref_var|x}}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorKind::InvalidSyntax);
    }

    #[test]
    fn test_reference_errors_when_declarations_complete() {
        let (valid, diagnostics) = validate("{{ref_var|x}}\n{{ref_step|s}}\n{{ref_fig|f}}");
        assert!(!valid);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.code == ErrorKind::UndefinedReference));
    }

    #[test]
    fn test_options_disable_checks() {
        let source = "{{var|people: list[Person]}} {{ref_var|missing}}";
        assert_eq!(validate(source).1.len(), 2);

        let options = ValidationOptions {
            check_references: false,
            check_custom_types: false,
            ..ValidationOptions::default()
        };
        let (valid, diagnostics) = validate_with_options(source, &options);
        assert!(valid);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ValidationOptions =
            serde_json::from_str(r#"{"extra_scalar_types": ["VersionStr"]}"#).unwrap();
        assert!(options.check_references);
        assert!(options.check_custom_types);
        assert!(options.is_extra_scalar("VersionStr"));
    }

    #[test]
    fn test_strict_errors_sorted() {
        let outcome = build_document(&tokenize("{{var|b}}\n{{var|_a}}\n{{var|b}}"));
        let errors = strict_errors(&outcome.document);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind(), ErrorKind::InvalidName);
        assert_eq!(errors[1].kind(), ErrorKind::DuplicateName);
    }
}
