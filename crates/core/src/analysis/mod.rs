//! Per-document analysis over a parsed query tree.

pub mod completion;
pub mod hover;
pub mod symbols;
pub mod tokens;
pub mod walker;
pub mod word;

pub use completion::{CompletionCandidate, CompletionKind, complete};
pub use hover::{HoverInfo, HoverTarget, hover};
pub use symbols::{SymbolTable, collect_functions, document_symbols};
pub use walker::{HighlightCandidate, TokenHint, WalkOutput, walk};
pub use word::{Word, word_at};

use crate::index::IndexSnapshot;
use stormscope_api::models::{Diagnostic, DocumentSymbol, SyntaxNode};

/// Everything derived from one successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub symbols: SymbolTable,
    /// Declaration diagnostics first, then walk diagnostics in visit order.
    pub diagnostics: Vec<Diagnostic>,
    pub candidates: Vec<HighlightCandidate>,
    pub outline: Vec<DocumentSymbol>,
}

pub fn analyze(root: &SyntaxNode, index: &IndexSnapshot) -> Analysis {
    let (symbols, mut diagnostics) = collect_functions(root);
    let walked = walk(root, index);
    diagnostics.extend(walked.diagnostics);

    Analysis {
        symbols,
        diagnostics,
        candidates: walked.candidates,
        outline: document_symbols(root),
    }
}
