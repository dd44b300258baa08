//! AST building
//!
//! This module turns directive tokens into AST nodes. It follows two layers:
//!
//! 1. Payload parsing - each token's payload goes through the grammar for its
//!    kind (see [parsing](crate::aimd::parsing)).
//! 2. AST creation - parsed fields become nodes; `var` and `var_table`
//!    payloads are classified into plain or table declarations here.
//!
//! Tokens are built independently. A token whose payload fails to parse
//! contributes an error instead of a node, and the rest of the document is
//! still built.

pub mod builders;

pub use builders::{build_document, build_node, classify_declaration, BuildOutcome, Node};
