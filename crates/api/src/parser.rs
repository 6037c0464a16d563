use crate::models::{Diagnostic, Range, SyntaxNode};
use serde::{Deserialize, Serialize};

/// Failure reported by the external parser. `line` and `column` are 1-based.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line}, column {column})")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    #[serde(default)]
    pub token: Option<String>,
}

impl SyntaxError {
    /// The single error diagnostic this failure is surfaced as: on `line-1`,
    /// spanning `[column-1, column-1+len(token))`, with a one-character
    /// token when the parser did not name one.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let width = self
            .token
            .as_deref()
            .map(|t| t.chars().map(|c| c.len_utf16() as u32).sum())
            .unwrap_or(1);
        let line = self.line.saturating_sub(1);
        let start = self.column.saturating_sub(1);
        Diagnostic::error(
            self.message.clone(),
            Range::new(line, start, line, start + width),
        )
    }
}

/// Source text to syntax tree.
pub trait QueryParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<SyntaxNode, SyntaxError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn syntax_error_defaults_to_one_character() {
        let err = SyntaxError {
            message: "Unexpected token".into(),
            line: 2,
            column: 5,
            token: None,
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.range, Range::new(1, 4, 1, 5));
    }

    #[test]
    fn syntax_error_spans_the_reported_token() {
        let err = SyntaxError {
            message: "Unexpected token".into(),
            line: 1,
            column: 3,
            token: Some("yield".into()),
        };
        assert_eq!(err.to_diagnostic().range, Range::new(0, 2, 0, 7));
    }
}
