//! Parsing module for the aimd format
//!
//!     This module provides the processing pipeline from source text to AST:
//!         1. Lexing: directives are cut out of the prose. See [lexing](crate::aimd::lexing).
//!         2. Payload parsing: each directive's payload goes through the grammar for its kind.
//!            See [declarations], [directives] and [values].
//!         3. Building: parsed payloads become typed nodes grouped into a
//!            [`Document`]. See [building](crate::aimd::building).
//!
//! Strict Parsing
//!
//!     [`parse_document`] is fail-fast: it returns the earliest payload error in source order,
//!     and only if every payload parsed, the earliest naming or duplicate error. It doesn't
//!     resolve references or check custom types; use [validate](crate::aimd::validation::validate)
//!     for the full set of checks.
//!
//! Terminology
//!
//!     - payload: the text of a directive between `|` and `}}`
//!     - top level: outside string literals and bracket groups; see [scanner]

pub mod declarations;
pub mod directives;
pub(crate) mod scanner;
pub mod types;
pub mod values;

use crate::aimd::ast::{Document, ParseError};
use crate::aimd::building::build_document;
use crate::aimd::lexing::tokenize;
use crate::aimd::validation::strict_errors;
use tracing::debug;

pub use values::parse_value;

/// Parse a document, stopping at the first error.
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    let outcome = build_document(&tokenize(source));

    if let Some((_, err)) = outcome.errors.into_iter().next() {
        debug!(error = %err, "payload error");
        return Err(err);
    }

    match strict_errors(&outcome.document).into_iter().next() {
        Some(err) => {
            debug!(error = %err, "naming error");
            Err(err)
        }
        None => Ok(outcome.document),
    }
}
