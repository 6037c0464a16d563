use stormscope_api::models::{self as api, Severity};
use stormscope_core::DocumentState;
use stormscope_core::analysis::{Word, word_at};
use tower_lsp::lsp_types::{self as lsp, Position};

pub fn to_lsp_range(range: api::Range) -> lsp::Range {
    lsp::Range {
        start: Position::new(range.start_line, range.start_col),
        end: Position::new(range.end_line, range.end_col),
    }
}

pub fn to_api_position(position: Position) -> api::Position {
    api::Position::new(position.line, position.character)
}

pub fn to_lsp_diagnostic(diag: &api::Diagnostic) -> lsp::Diagnostic {
    let severity = match diag.severity {
        Severity::Error => lsp::DiagnosticSeverity::ERROR,
        Severity::Warning => lsp::DiagnosticSeverity::WARNING,
    };

    lsp::Diagnostic {
        range: to_lsp_range(diag.range),
        severity: Some(severity),
        source: Some(diag.source.clone()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// The word under `position` in a document.
pub fn word_at_position(doc: &DocumentState, position: Position) -> Option<Word> {
    let line = doc.line(position.line)?;
    word_at(position.line, line, position.character)
}
