use super::position::{Range, Span};
use serde::{Deserialize, Serialize};

pub const DIAGNOSTIC_SOURCE: &str = "stormscope";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub range: Range,
    pub source: String,
}

impl Diagnostic {
    /// Engine findings are always warnings; errors are reserved for parse failures.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            range: span.to_range(),
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            range,
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }
}
