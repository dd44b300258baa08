//! Position tracking for directive spans
//!
//!     Tokens carry a byte range into the source. Before a token leaves the lexer that range is
//!     converted into a [`Position`]: four 1-indexed, inclusive coordinates. Columns count
//!     characters, not bytes, so text with multi-byte characters reports the column an editor
//!     would show.
//!
//!     [`SourceLocation`] pre-computes line starts once per document. Each conversion is a
//!     binary search plus a character count over the line prefix.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range as ByteRange;

/// Line and column bounds of a span, all 1-indexed and inclusive.
///
/// `end_line >= start_line`, and on a single line `end_col >= start_col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Position {
    pub fn new(start_line: usize, end_line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start_line,
            end_line,
            start_col,
            end_col,
        }
    }

    /// Key used to order diagnostics and declarations.
    pub fn sort_key(&self) -> (usize, usize) {
        (self.start_line, self.start_col)
    }

    pub fn is_multiline(&self) -> bool {
        self.end_line > self.start_line
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| (self.end_line, self.end_col).cmp(&(other.end_line, other.end_col)))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(
                f,
                "lines {}-{}, col {}-{}",
                self.start_line, self.end_line, self.start_col, self.end_col
            )
        } else {
            write!(
                f,
                "line {}, col {}-{}",
                self.start_line, self.start_col, self.end_col
            )
        }
    }
}

/// Converts byte ranges of one source text into [`Position`]s
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// 0-indexed line containing `byte_offset`
    fn line_index(&self, byte_offset: usize) -> usize {
        self.line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1)
    }

    fn char_count(&self, range: ByteRange<usize>) -> usize {
        let width = range.end - range.start;
        self.source
            .get(range)
            .map_or(width, |text| text.chars().count())
    }

    /// Convert a byte range into a [`Position`].
    ///
    /// Offsets past the end of the source are clamped, so any range over
    /// `0..=source.len()` converts.
    pub fn span_to_position(&self, span: &ByteRange<usize>) -> Position {
        let start = span.start.min(self.source.len());
        let end = span.end.clamp(start, self.source.len());

        let line = self.line_index(start);
        let start_col = self.char_count(self.line_starts[line]..start) + 1;
        let text = self.source.get(start..end).unwrap_or_default();

        match text.rfind('\n') {
            None => {
                let width = text.chars().count();
                let end_col = (start_col + width).saturating_sub(1).max(start_col);
                Position::new(line + 1, line + 1, start_col, end_col)
            }
            Some(last_newline) => {
                let end_line = line + text.matches('\n').count();
                let end_col = text[last_newline + 1..].chars().count();
                Position::new(line + 1, end_line + 1, start_col, end_col)
            }
        }
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_span() {
        let source = "{{var|name}} rest";
        let loc = SourceLocation::new(source);

        assert_eq!(loc.span_to_position(&(0..12)), Position::new(1, 1, 1, 12));
    }

    #[test]
    fn test_span_on_later_line() {
        let source = "intro\n  {{var|x}}\n";
        let loc = SourceLocation::new(source);

        assert_eq!(loc.span_to_position(&(8..17)), Position::new(2, 2, 3, 11));
    }

    #[test]
    fn test_multiline_span_measures_last_line() {
        let source = "{{var_table|t,\n  subvars=[a]}}";
        let loc = SourceLocation::new(source);

        let pos = loc.span_to_position(&(0..source.len()));
        assert_eq!(pos.start_line, 1);
        assert_eq!(pos.end_line, 2);
        assert_eq!(pos.start_col, 1);
        assert_eq!(pos.end_col, 15);
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "préambule {{var|x}}";
        let loc = SourceLocation::new(source);
        let start = source.find("{{").unwrap();

        let pos = loc.span_to_position(&(start..source.len()));
        assert_eq!(pos.start_col, 11);
        assert_eq!(pos.end_col, 19);
    }

    #[test]
    fn test_empty_span_at_end_is_clamped() {
        let source = "line one\nline two";
        let loc = SourceLocation::new(source);

        let pos = loc.span_to_position(&(source.len()..source.len()));
        assert_eq!(pos, Position::new(2, 2, 9, 9));
        assert_eq!(loc.line_count(), 2);
    }

    #[test]
    fn test_empty_source() {
        let loc = SourceLocation::new("");
        assert_eq!(loc.span_to_position(&(0..0)), Position::new(1, 1, 1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 3, 5, 12).to_string(), "line 3, col 5-12");
        assert_eq!(Position::new(3, 5, 1, 2).to_string(), "lines 3-5, col 1-2");
    }

    #[test]
    fn test_ordering_uses_start_first() {
        let early = Position::new(1, 4, 9, 2);
        let later = Position::new(2, 2, 1, 5);
        assert!(early < later);

        let mut positions = vec![later, early];
        positions.sort();
        assert_eq!(positions, vec![early, later]);
    }
}
