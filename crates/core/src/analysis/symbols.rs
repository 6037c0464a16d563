//! Top-level declarations: the function table and the document outline.
//!
//! Only direct children of the query root are considered. Functions declared
//! inside control structures are not tracked.

use indexmap::IndexMap;
use stormscope_api::models::{
    Diagnostic, DocumentSymbol, FunctionSymbol, NodeKind, Param, Range, SymbolKind, SyntaxNode,
};

/// Function name to declaration, in declaration order.
pub type SymbolTable = IndexMap<String, FunctionSymbol>;

pub fn collect_functions(root: &SyntaxNode) -> (SymbolTable, Vec<Diagnostic>) {
    let mut table = SymbolTable::new();
    let mut diagnostics = Vec::new();

    for kid in root.children.iter().filter(|k| k.is(&NodeKind::Function)) {
        let Some(span) = kid.span else {
            continue;
        };
        let Some(name) = kid.child(0).map(|n| n.text.clone()) else {
            continue;
        };

        if let Some(first) = table.get(&name) {
            diagnostics.push(Diagnostic::warning(
                format!(
                    "function {} is already defined on line {}",
                    name, first.start_line
                ),
                span.first_line(),
            ));
            continue;
        }

        let params = kid.child(1).map(collect_params).unwrap_or_default();
        let body = kid.child(2);

        table.insert(
            name.clone(),
            FunctionSymbol {
                name,
                params,
                body: body.map(|b| b.text.clone()).unwrap_or_default(),
                decl_range: span.to_range(),
                body_range: body.and_then(|b| b.span).map(|s| s.to_range()),
                start_line: span.start_line,
                end_line: span.end_line,
            },
        );
    }

    (table, diagnostics)
}

/// Mandatory parameters come first; keyword-style ones carry their default.
fn collect_params(args: &SyntaxNode) -> Vec<Param> {
    args.children
        .iter()
        .map(|arg| match arg.kind {
            NodeKind::CallKwarg => Param {
                name: arg
                    .child(0)
                    .map(|n| n.text.clone())
                    .unwrap_or_else(|| arg.text.clone()),
                default: arg.child(1).map(|v| default_text(&v.text)),
            },
            _ => Param {
                name: arg.text.clone(),
                default: None,
            },
        })
        .collect()
}

/// A default as written, minus one pair of parentheses wrapping all of it:
/// `(1)` is `1`, `(1) + (2)` stays as is.
fn default_text(text: &str) -> String {
    let text = text.trim();
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text.to_string();
    };

    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return text.to_string();
        }
    }
    if depth == 0 {
        inner.trim().to_string()
    } else {
        text.to_string()
    }
}

/// Flat outline of top-level functions and variable assignments, as whole lines.
pub fn document_symbols(root: &SyntaxNode) -> Vec<DocumentSymbol> {
    root.children
        .iter()
        .filter_map(|kid| {
            let kind = match kid.kind {
                NodeKind::Function => SymbolKind::Function,
                NodeKind::SetVarOper => SymbolKind::Variable,
                _ => return None,
            };
            let span = kid.span?;
            let name = kid.child(0)?.text.clone();
            let range = Range::new(
                span.start_line.saturating_sub(1),
                0,
                span.end_line.saturating_sub(1),
                0,
            );

            Some(DocumentSymbol {
                name,
                kind,
                range,
                selection_range: range,
            })
        })
        .collect()
}
