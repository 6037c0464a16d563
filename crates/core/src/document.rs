//! Per-document analysis state.
//!
//! Each open document keeps its latest text plus the products of its last
//! successful parse. A parse failure replaces the diagnostics with the syntax
//! error but keeps the previous tree, symbols and highlight candidates, so
//! completion and highlighting keep working while the user is mid-edit.

use crate::analysis::{Analysis, analyze};
use crate::index::IndexSnapshot;
use std::sync::Arc;
use stormscope_api::models::{Diagnostic, SyntaxNode};
use stormscope_api::parser::{QueryParser, SyntaxError};

#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    pub version: i32,
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Last tree that parsed, if any.
    pub tree: Option<Arc<SyntaxNode>>,
    pub analysis: Arc<Analysis>,
}

impl DocumentState {
    pub fn new(text: impl Into<String>, version: i32) -> Self {
        Self {
            version,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Text of a 0-based line, without its terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.text
            .split('\n')
            .nth(line as usize)
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
    }

    /// Replaces the text and re-analyzes it.
    pub fn update(
        &mut self,
        text: impl Into<String>,
        version: i32,
        parser: &dyn QueryParser,
        index: &IndexSnapshot,
    ) {
        self.text = text.into();
        self.version = version;
        let parsed = parser.parse(&self.text);
        self.apply(parsed, index);
    }

    /// Folds a parse result into the state.
    pub fn apply(&mut self, parsed: Result<SyntaxNode, SyntaxError>, index: &IndexSnapshot) {
        match parsed {
            Ok(tree) => {
                let analysis = analyze(&tree, index);
                self.diagnostics = analysis.diagnostics.clone();
                self.tree = Some(Arc::new(tree));
                self.analysis = Arc::new(analysis);
            }
            Err(error) => {
                tracing::debug!("Syntax error at {}:{}: {}", error.line, error.column, error.message);
                self.diagnostics = vec![error.to_diagnostic()];
            }
        }
    }
}
