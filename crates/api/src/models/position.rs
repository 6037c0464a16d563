use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A source span as reported by the parser: 1-based lines and columns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Translates the parser's 1-based coordinates into a 0-based protocol range.
    pub fn to_range(&self) -> Range {
        Range {
            start_line: self.start_line.saturating_sub(1),
            start_col: self.start_col.saturating_sub(1),
            end_line: self.end_line.saturating_sub(1),
            end_col: self.end_col.saturating_sub(1),
        }
    }

    /// The span collapsed onto its first line.
    pub fn first_line(&self) -> Span {
        Span {
            start_line: self.start_line,
            start_col: self.start_col,
            end_line: self.start_line,
            end_col: self.end_col.max(self.start_col),
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

/// 0-based, half-open range in protocol coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
pub struct Range {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Range {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn contains(&self, line: u32, col: u32) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }
}

/// 0-based cursor position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_translates_to_zero_based() {
        let range = Span::new(3, 8, 3, 17).to_range();
        assert_eq!(range, Range::new(2, 7, 2, 16));
    }

    #[test]
    fn first_line_collapses_multiline_spans() {
        let span = Span::new(4, 1, 9, 2).first_line();
        assert_eq!(span.start_line, 4);
        assert_eq!(span.end_line, 4);
        assert_eq!(span.end_col, 2);
    }

    #[test]
    fn range_contains_is_inclusive_at_the_edges() {
        let range = Range::new(1, 4, 2, 3);
        assert!(range.contains(1, 4));
        assert!(range.contains(2, 3));
        assert!(!range.contains(1, 3));
        assert!(!range.contains(3, 0));
    }
}
