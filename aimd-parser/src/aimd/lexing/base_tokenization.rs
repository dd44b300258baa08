//! Base tokenization implementation for the aimd lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! Prose is split into runs of text and lone braces, and every directive is
//! matched as a single token from `{{kind|` through the first `}}`.

use crate::aimd::token::{TokenKind, CLOSE_MARKER};
use logos::{Lexer, Logos};

#[derive(Logos, Debug, PartialEq, Clone)]
pub enum RawToken {
    // Opening marker plus a known keyword; the callback extends the match to the closing marker
    #[regex(
        r"\{\{(var_table|var|step|check|ref_var|ref_step|ref_fig|cite)\|",
        close_directive
    )]
    Directive(TokenKind),

    #[regex(r"[^{]+")]
    Prose,

    #[token("{")]
    Brace,
}

/// Extend a directive match to the first closing marker.
///
/// A single `}` not followed by another is payload content. Without a closing
/// marker the opening is rejected and lexing resumes right after it.
fn close_directive(lex: &mut Lexer<'_, RawToken>) -> Option<TokenKind> {
    let opening = lex.slice();
    let kind = TokenKind::from_keyword(&opening[2..opening.len() - 1])?;
    let close = lex.remainder().find(CLOSE_MARKER)?;
    lex.bump(close + CLOSE_MARKER.len());
    Some(kind)
}

/// Tokenize source text with byte spans
///
/// Openings without a closing marker come back as `Err(())` spans covering the
/// opening only; callers treat them as prose.
pub fn tokenize(source: &str) -> Vec<(Result<RawToken, ()>, logos::Span)> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push((result, lexer.span()));
    }

    tokens
}
