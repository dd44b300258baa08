//! Main module for aimd library functionality

pub mod ast;
pub mod building;
pub mod extraction;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;
pub mod validation;

pub use ast::{
    Declaration, Diagnostic, DiagnosticSeverity, Document, ErrorKind, Kwargs, ParseError,
    Position, Value,
};
pub use extraction::extract_vars;
pub use lexing::tokenize;
pub use parsing::parse_document;
pub use token::{Token, TokenKind};
pub use validation::{validate, validate_with_options, ValidationOptions};
