//! Testing utilities for AST assertions
//!
//!     This module provides the testing tools for the aimd parser. Parser tests follow two
//!     rules.
//!
//! Rule 1: Prefer Verified Samples for Document Content
//!
//!     Whole-document tests load their source through [Samples](samples::Samples), which
//!     reads the curated files under `aimd-parser/docs/samples/`. Every sample has been checked
//!     by hand against the format, and when the format changes there is one place to update.
//!
//!     ```rust,ignore
//!     use aimd_parser::aimd::testing::Samples;
//!
//!     let doc = Samples::load("experiment_basic")?.parse()?;
//!     let (valid, diagnostics) = Samples::load("invalid_names")?.validate();
//!     ```
//!
//!     Short inline directives are fine for tests that exercise a single payload rule.
//!
//! Rule 2: Use assert_doc for AST Verification
//!
//!     Walking the AST by hand buries what the test checks under matches and indexing. The
//!     fluent API states it directly:
//!
//!     ```rust,ignore
//!     use aimd_parser::aimd::testing::assert_doc;
//!
//!     assert_doc(&doc)
//!         .var_count(2)
//!         .var(0, |v| v.name("age").type_annotation("int").plain())
//!         .var(1, |v| v.name("students").table().subvar_names(&["name", "grade"]))
//!         .step(0, |s| s.name("mix").level(1).check(false));
//!     ```
//!
//!     Failures name the node they were checking, e.g. `vars[1]: Expected name 'students',
//!     found 'student'`.

mod ast_assertions;
pub mod samples;

pub use ast_assertions::{
    assert_doc, CheckAssertion, DeclarationAssertion, DocumentAssertion, StepAssertion,
};
pub use samples::{SampleError, SampleSource, Samples};
