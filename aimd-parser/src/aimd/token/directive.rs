//! Directive tokens
//!
//!     A token is one complete directive, `{{kind|payload}}`, plus a terminal [`TokenKind::End`]
//!     marker. Prose between directives produces no tokens. The set of kinds is closed: a
//!     `{{word|` opening whose word isn't listed in [`DIRECTIVE_KEYWORDS`] stays prose.

use crate::aimd::ast::Position;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub const OPEN_MARKER: &str = "{{";
pub const CLOSE_MARKER: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Var,
    VarTable,
    Step,
    Check,
    RefVar,
    RefStep,
    RefFig,
    Cite,
    End,
}

/// Directive keywords and the kind each opens
pub const DIRECTIVE_KEYWORDS: [(&str, TokenKind); 8] = [
    ("var", TokenKind::Var),
    ("var_table", TokenKind::VarTable),
    ("step", TokenKind::Step),
    ("check", TokenKind::Check),
    ("ref_var", TokenKind::RefVar),
    ("ref_step", TokenKind::RefStep),
    ("ref_fig", TokenKind::RefFig),
    ("cite", TokenKind::Cite),
];

impl TokenKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        DIRECTIVE_KEYWORDS
            .iter()
            .find(|(word, _)| *word == keyword)
            .map(|(_, kind)| *kind)
    }

    /// The directive keyword, empty for [`TokenKind::End`]
    pub fn keyword(&self) -> &'static str {
        DIRECTIVE_KEYWORDS
            .iter()
            .find(|(_, kind)| kind == self)
            .map_or("", |(word, _)| word)
    }

    /// Kinds whose payload declares a name
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::Var | TokenKind::VarTable | TokenKind::Step | TokenKind::Check
        )
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            TokenKind::RefVar | TokenKind::RefStep | TokenKind::RefFig | TokenKind::Cite
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::End => write!(f, "END"),
            other => write!(f, "{}", other.keyword().to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Text between `|` and `}}`, trimmed
    pub payload: String,
    /// The directive as written, markers included
    pub raw: String,
    pub position: Position,
    /// Byte range of `raw` in the source
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Token {
    pub fn end(position: Position, offset: usize) -> Self {
        Self {
            kind: TokenKind::End,
            payload: String::new(),
            raw: String::new(),
            position,
            span: offset..offset,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.kind, self.payload, self.position)
    }
}
