//! AST definitions for aimd documents
//!
//!     The tree is flat: a [`Document`] owns one ordered collection per directive category and
//!     every node carries the [`Position`] of the directive that produced it. Nodes hold no
//!     references to each other; names are the only links between a reference and its target,
//!     and they are resolved by validation, not here.
//!
//! Declarations
//!
//!     Variables come in two shapes sharing one base record ([`VarNode`]):
//!
//!         - plain: `{{var|age: int = 0, title="Age"}}`
//!         - table: `{{var_table|students, subvars=[name, age: int]}}` or `{{var|scores: list[float]}}`
//!
//!     The shape is a [`Declaration`] variant so code matching on it can't forget one.
//!     Tables add their subvars and the item type of their rows.
//!
//! Values
//!
//!     Defaults and keyword arguments share the closed [`Value`] domain. Constructor calls
//!     such as `Field(ge=0)` are not evaluated; their source text is kept verbatim.

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod nodes;
pub mod range;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use document::Document;
pub use error::{format_source_context, ErrorKind, ParseError};
pub use nodes::{CheckNode, CiteNode, Declaration, RefNode, StepNode, TableNode, VarNode};
pub use range::{Position, SourceLocation};
pub use value::{Kwargs, Value};
