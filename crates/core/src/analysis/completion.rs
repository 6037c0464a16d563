use crate::analysis::symbols::SymbolTable;
use crate::analysis::word::{Word, sigiled};
use crate::index::IndexSnapshot;
use stormscope_api::models::{Position, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Function,
    Property,
    Variable,
    Field,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    pub deprecated: bool,
    /// Range replaced by the label when the item is accepted.
    pub range: Range,
}

impl CompletionCandidate {
    fn new(label: impl Into<String>, kind: CompletionKind, range: Range) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            deprecated: false,
            range,
        }
    }

    fn with_detail(mut self, detail: Option<&str>, deprecated: bool) -> Self {
        self.detail = detail.map(str::to_string);
        self.deprecated = deprecated;
        self
    }
}

/// Candidates for the word at `cursor`, in source order: libraries, then
/// local functions and in-scope parameters for sigiled words; form types,
/// properties, then commands otherwise.
pub fn complete(
    word: &Word,
    cursor: Position,
    symbols: &SymbolTable,
    index: &IndexSnapshot,
) -> Vec<CompletionCandidate> {
    if word.is_sigiled() {
        complete_variable(word, cursor, symbols, index)
    } else {
        complete_name(word, index)
    }
}

fn complete_variable(
    word: &Word,
    cursor: Position,
    symbols: &SymbolTable,
    index: &IndexSnapshot,
) -> Vec<CompletionCandidate> {
    let prefix = word.text.as_str();
    let mut items = Vec::new();

    for (key, lib) in index.libraries.iter().filter(|(k, _)| k.starts_with(prefix)) {
        let kind = if lib.is_callable() {
            CompletionKind::Function
        } else {
            CompletionKind::Property
        };
        items.push(
            CompletionCandidate::new(key.as_str(), kind, word.range)
                .with_detail(lib.doc.as_deref(), lib.deprecated),
        );
    }

    for (name, func) in symbols {
        let label = sigiled(name);
        if label.starts_with(prefix) {
            items.push(CompletionCandidate::new(label, CompletionKind::Function, word.range));
        }

        if !func.contains_line(cursor.line) {
            continue;
        }
        for param in &func.params {
            let label = sigiled(&param.name);
            if label.starts_with(prefix) {
                items.push(CompletionCandidate::new(label, CompletionKind::Variable, word.range));
            }
        }
    }

    items
}

fn complete_name(word: &Word, index: &IndexSnapshot) -> Vec<CompletionCandidate> {
    let prefix = word.text.trim();
    let mut items = Vec::new();

    for (key, form) in index.form_types.iter().filter(|(k, _)| k.starts_with(prefix)) {
        items.push(
            CompletionCandidate::new(key.as_str(), CompletionKind::Field, word.range)
                .with_detail(Some(&form.doc), form.deprecated),
        );
    }

    for (key, prop) in index.properties.iter().filter(|(k, _)| k.starts_with(prefix)) {
        items.push(
            CompletionCandidate::new(key.as_str(), CompletionKind::Property, word.range)
                .with_detail(Some(&prop.doc), prop.deprecated),
        );
    }

    for (key, cmd) in index.commands.iter().filter(|(k, _)| k.starts_with(prefix)) {
        items.push(
            CompletionCandidate::new(key.as_str(), CompletionKind::Function, word.range)
                .with_detail(cmd.doc.as_deref(), cmd.deprecated),
        );
    }

    items
}
