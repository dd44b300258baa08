//! Lexer
//!
//!     Lexing turns a document into the ordered stream of its directives. Prose carries no
//!     meaning for the front end, so it's consumed by the base tokenizer and dropped here.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using logos. See [base_tokenization](base_tokenization). Directives
//!        are recognized as whole tokens: the opening marker and keyword are matched by the
//!        logos regex, and a callback extends the match to the first closing marker. This keeps
//!        the scan linear; there is no backtracking over payload text.
//!
//!     2. Token assembly. Each directive's byte span is converted into a [`Position`] and the
//!        payload is sliced out from between the markers and trimmed. The raw text keeps both
//!        markers and the original whitespace.
//!
//!     3. The stream is closed with one [`TokenKind::End`] token, zero-length, positioned at
//!        the end of the document.
//!
//!     Nothing here validates payloads. A directive with a malformed payload is still a token;
//!     its problems are reported by the parser.
//!
//! [`Position`]: crate::aimd::ast::Position

pub mod base_tokenization;

use crate::aimd::ast::SourceLocation;
use crate::aimd::token::{Token, TokenKind, CLOSE_MARKER, OPEN_MARKER};
use base_tokenization::RawToken;
use tracing::{debug, trace};

/// Tokenize a document into directive tokens followed by one END token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let locations = SourceLocation::new(source);
    let mut tokens = Vec::new();

    for (result, span) in base_tokenization::tokenize(source) {
        match result {
            Ok(RawToken::Directive(kind)) => {
                let raw = &source[span.clone()];
                let payload_start = OPEN_MARKER.len() + kind.keyword().len() + 1;
                let payload = raw[payload_start..raw.len() - CLOSE_MARKER.len()].trim();
                let position = locations.span_to_position(&span);
                trace!(%kind, %position, "directive");

                tokens.push(Token {
                    kind,
                    payload: payload.to_string(),
                    raw: raw.to_string(),
                    position,
                    span,
                });
            }
            Ok(RawToken::Prose | RawToken::Brace) => {}
            Err(()) => {
                trace!(offset = span.start, "unterminated directive left as prose");
            }
        }
    }

    let end = source.len();
    tokens.push(Token::end(locations.span_to_position(&(end..end)), end));
    debug!(directives = tokens.len() - 1, "tokenized document");

    tokens
}
