//! Quote- and bracket-aware scanning of payload text
//!
//! Payloads are split on commas and searched for `=` and `:` only at the top
//! level: outside string literals and outside `[...]` / `(...)` groups. The
//! scanner is a single pass over the characters with an explicit state and a
//! stack of open brackets.

use crate::aimd::ast::{ParseError, Position};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    Quoted { quote: char, escaped: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Unterminated string literal opened with {quote}")]
    UnterminatedString { quote: char },
    #[error("Unmatched '{found}'")]
    UnmatchedCloser { found: char },
    #[error("Unclosed '{open}'")]
    Unclosed { open: char },
}

impl ScanError {
    /// Report as a syntax error of the directive at `position`
    pub(crate) fn at(self, position: Position) -> ParseError {
        ParseError::syntax(self.to_string(), position)
    }
}

/// Walk `input`, calling `visit` with the byte offset of every top-level character.
fn scan(input: &str, mut visit: impl FnMut(usize, char)) -> Result<(), ScanError> {
    let mut state = ScanState::Code;
    let mut open: Vec<char> = Vec::new();

    for (offset, ch) in input.char_indices() {
        state = match state {
            ScanState::Quoted {
                quote,
                escaped: true,
            } => ScanState::Quoted {
                quote,
                escaped: false,
            },
            ScanState::Quoted {
                quote,
                escaped: false,
            } => match ch {
                '\\' => ScanState::Quoted {
                    quote,
                    escaped: true,
                },
                c if c == quote => ScanState::Code,
                _ => state,
            },
            ScanState::Code => match ch {
                '"' | '\'' => ScanState::Quoted {
                    quote: ch,
                    escaped: false,
                },
                '[' | '(' => {
                    open.push(ch);
                    ScanState::Code
                }
                ']' | ')' => {
                    let expected = if ch == ']' { '[' } else { '(' };
                    if open.pop() != Some(expected) {
                        return Err(ScanError::UnmatchedCloser { found: ch });
                    }
                    ScanState::Code
                }
                _ => {
                    if open.is_empty() {
                        visit(offset, ch);
                    }
                    ScanState::Code
                }
            },
        };
    }

    if let ScanState::Quoted { quote, .. } = state {
        return Err(ScanError::UnterminatedString { quote });
    }
    if let Some(&bracket) = open.last() {
        return Err(ScanError::Unclosed { open: bracket });
    }
    Ok(())
}

/// Check that quotes and brackets in `input` are balanced.
pub(crate) fn check_balanced(input: &str) -> Result<(), ScanError> {
    scan(input, |_, _| {})
}

/// Split on top-level `separator`, trimming each piece.
///
/// One trailing empty piece (`a, b,`) is dropped; other empty pieces are kept
/// so callers can report them.
pub(crate) fn split_top_level(input: &str, separator: char) -> Result<Vec<&str>, ScanError> {
    let mut cuts = Vec::new();
    scan(input, |offset, ch| {
        if ch == separator {
            cuts.push(offset);
        }
    })?;

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        pieces.push(input[start..cut].trim());
        start = cut + separator.len_utf8();
    }
    pieces.push(input[start..].trim());

    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    Ok(pieces)
}

/// Byte offset of the first top-level `target`.
pub(crate) fn find_top_level(input: &str, target: char) -> Result<Option<usize>, ScanError> {
    let mut found = None;
    scan(input, |offset, ch| {
        if ch == target && found.is_none() {
            found = Some(offset);
        }
    })?;
    Ok(found)
}

/// Byte offset of the first top-level assignment `=`, skipping `==`, `<=`, `>=` and `!=`.
pub(crate) fn find_assignment(input: &str) -> Result<Option<usize>, ScanError> {
    let mut found = None;
    scan(input, |offset, ch| {
        if ch != '=' || found.is_some() {
            return;
        }
        let compound_before = input[..offset].ends_with(['=', '<', '>', '!']);
        let compound_after = input[offset + 1..].starts_with('=');
        if !compound_before && !compound_after {
            found = Some(offset);
        }
    })?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(
            split_top_level("name, age , grade", ',').unwrap(),
            vec!["name", "age", "grade"]
        );
    }

    #[test]
    fn test_split_respects_brackets_and_quotes() {
        let input = r#"scores: list[int] = [1, 2], title="a, b", extra=Field(ge=0, le=(1, 2))"#;
        assert_eq!(
            split_top_level(input, ',').unwrap(),
            vec![
                "scores: list[int] = [1, 2]",
                r#"title="a, b""#,
                "extra=Field(ge=0, le=(1, 2))",
            ]
        );
    }

    #[test]
    fn test_split_escaped_quote_stays_in_string() {
        let input = r#"msg="say \"hi, there\"", next=1"#;
        assert_eq!(
            split_top_level(input, ',').unwrap(),
            vec![r#"msg="say \"hi, there\"""#, "next=1"]
        );
    }

    #[test]
    fn test_split_drops_only_trailing_empty() {
        assert_eq!(split_top_level("a, b,", ',').unwrap(), vec!["a", "b"]);
        assert_eq!(split_top_level("a,,b", ',').unwrap(), vec!["a", "", "b"]);
        assert_eq!(split_top_level("", ',').unwrap(), vec![""]);
    }

    #[test]
    fn test_split_multiline_subvars() {
        let input = "students,\n    subvars=[\n        name,\n        age: int,\n    ]";
        let pieces = split_top_level(input, ',').unwrap();
        assert_eq!(pieces.len(), 2);
        assert!(pieces[1].starts_with("subvars=["));
    }

    #[test]
    fn test_unbalanced_inputs() {
        assert_eq!(
            split_top_level("x = \"open", ','),
            Err(ScanError::UnterminatedString { quote: '"' })
        );
        assert_eq!(
            split_top_level("x = [1, 2", ','),
            Err(ScanError::Unclosed { open: '[' })
        );
        assert_eq!(
            split_top_level("x = 1]", ','),
            Err(ScanError::UnmatchedCloser { found: ']' })
        );
        assert_eq!(
            check_balanced("f([1)]"),
            Err(ScanError::UnmatchedCloser { found: ')' })
        );
    }

    #[test]
    fn test_find_top_level_skips_nested() {
        assert_eq!(find_top_level("a: dict[str, int]", ':').unwrap(), Some(1));
        assert_eq!(find_top_level("\"a:b\"", ':').unwrap(), None);
        assert_eq!(find_top_level("f(a:b)", ':').unwrap(), None);
    }

    #[test]
    fn test_find_assignment() {
        assert_eq!(find_assignment("x: int = 3").unwrap(), Some(7));
        assert_eq!(find_assignment("x = \"a=b\"").unwrap(), Some(2));
        assert_eq!(find_assignment("a == b").unwrap(), None);
        assert_eq!(find_assignment("a <= b").unwrap(), None);
        assert_eq!(find_assignment("f(k=v)").unwrap(), None);
    }
}
