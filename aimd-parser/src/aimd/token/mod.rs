//! Token types shared by the lexer, the parser and tooling.

pub mod directive;

pub use directive::{Token, TokenKind, CLOSE_MARKER, DIRECTIVE_KEYWORDS, OPEN_MARKER};
