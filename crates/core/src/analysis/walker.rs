//! Tree walker and diagnostic engine.
//!
//! Visits the tree breadth-first, runs the node-kind rules, and collects
//! diagnostics plus the highlight candidates later resolved by the token
//! encoder.

use crate::analysis::word::sigiled;
use crate::index::IndexSnapshot;
use crate::util::utf16_len;
use std::collections::{BTreeMap, VecDeque};
use stormscope_api::models::{Diagnostic, NodeKind, Span, SyntaxNode};

/// Library paths that spell a JSON literal.
const LITERAL_ALIASES: [&str; 3] = ["lib.null", "lib.false", "lib.true"];

/// Token classification suggested by the walk, refined at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenHint {
    /// A literal spelled as a library path (`$lib.null`).
    Literal,
    /// Something callable.
    Function,
    /// A plain value.
    Property,
    /// A form or property named where it is lifted or created.
    Definition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightCandidate {
    /// 1-based, as reported by the parser.
    pub line: u32,
    pub col: u32,
    /// Width in UTF-16 code units.
    pub length: u32,
    pub text: String,
    pub hint: TokenHint,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    pub diagnostics: Vec<Diagnostic>,
    /// Sorted by `(line, col)`; at most one per position.
    pub candidates: Vec<HighlightCandidate>,
}

pub fn walk(root: &SyntaxNode, index: &IndexSnapshot) -> WalkOutput {
    let mut walker = Walker {
        index,
        diagnostics: Vec::new(),
        candidates: BTreeMap::new(),
    };
    walker.run(root);

    WalkOutput {
        diagnostics: walker.diagnostics,
        candidates: walker.candidates.into_values().collect(),
    }
}

struct Walker<'a> {
    index: &'a IndexSnapshot,
    diagnostics: Vec<Diagnostic>,
    candidates: BTreeMap<(u32, u32), HighlightCandidate>,
}

impl<'a> Walker<'a> {
    fn run(&mut self, root: &SyntaxNode) {
        // (node, whether literal-alias findings are already covered by its parent)
        let mut queue: VecDeque<(&SyntaxNode, bool)> =
            root.children.iter().map(|kid| (kid, false)).collect();

        while let Some((node, covered)) = queue.pop_front() {
            // synthetic nodes have no position to report against
            let Some(span) = node.span else {
                continue;
            };

            let covers_first = self.visit(node, span, covered);

            for (i, kid) in node.children.iter().enumerate() {
                queue.push_back((kid, covers_first && i == 0));
            }
        }
    }

    /// Returns whether the node's first child is already reported on.
    fn visit(&mut self, node: &SyntaxNode, span: Span, covered: bool) -> bool {
        match &node.kind {
            NodeKind::VarDeref => {
                self.visit_deref(node, span, covered);
                false
            }
            NodeKind::FuncCall => {
                self.visit_call(node, span);
                false
            }
            NodeKind::LiftProp | NodeKind::LiftPropBy | NodeKind::EditNodeAdd => {
                if let Some(name) = node.child(0) {
                    self.record(name, span, TokenHint::Definition);
                }
                false
            }
            NodeKind::EditEdgeAdd { incoming } => {
                self.visit_edge(node, span, *incoming);
                false
            }
            NodeKind::Return => self.visit_return(node),
            _ => false,
        }
    }

    fn visit_deref(&mut self, node: &SyntaxNode, span: Span, covered: bool) {
        let text = node.text.as_str();

        if LITERAL_ALIASES.contains(&text) {
            if !covered {
                let literal = text.split('.').nth(1).unwrap_or(text);
                self.warn(
                    format!("Prefer JSON Expression syntax `({literal})` over `${text}`"),
                    span,
                );
            }
            self.record(node, span, TokenHint::Literal);
        } else if let Some(lib) = self.index.library(&sigiled(text)) {
            let hint = if lib.is_callable() {
                TokenHint::Function
            } else {
                TokenHint::Property
            };
            self.record(node, span, hint);
        }
    }

    fn visit_call(&mut self, node: &SyntaxNode, span: Span) {
        let Some(head) = node.child(0) else {
            return;
        };
        let head_span = head.span.unwrap_or(span);
        let name = sigiled(&head.text);

        match name.as_str() {
            "$lib.print" | "$lib.warn" if node.children.len() >= 3 => {
                // kwargs always sit at index 2
                if node.child(2).is_some_and(|kwargs| !kwargs.children.is_empty()) {
                    self.warn("Prefer backtick format strings", head_span);
                }
            }
            "$lib.list" => {
                self.warn(format!("{name} is deprecated. Prefer `([])`."), head_span);
            }
            "$lib.dict" => {
                self.warn(format!("{name} is deprecated. Prefer `({{}})`."), head_span);
            }
            _ => {
                if self.index.library(&name).is_some_and(|lib| lib.deprecated) {
                    self.warn(format!("{name} is deprecated"), head_span);
                }
            }
        }

        if head.text.starts_with("lib.") {
            self.record(head, span, TokenHint::Function);
        }
    }

    fn visit_edge(&mut self, node: &SyntaxNode, span: Span, incoming: bool) {
        let Some(verb) = node.child(0) else {
            return;
        };
        self.record(verb, span, TokenHint::Definition);

        let Some(var) = single_yielded_var(node.child(1)) else {
            return;
        };
        let (verb, var) = (&verb.text, &var.text);

        let message = if incoming {
            format!("Prefer `<({verb})+ ${var}` over `<({verb})+ {{ yield ${var} }}`")
        } else {
            format!("Prefer `+({verb})> ${var}` over `+({verb})> {{ yield ${var} }}`")
        };
        self.warn(message, span);
    }

    fn visit_return(&mut self, node: &SyntaxNode) -> bool {
        let Some(arg) = node.child(0) else {
            return false;
        };
        if arg.text != "lib.null" {
            return false;
        }
        let Some(arg_span) = arg.span else {
            return false;
        };

        self.warn("Prefer `return()` over `return($lib.null)`", arg_span);
        true
    }

    fn warn(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::warning(message, span));
    }

    /// Records `node` as a candidate. The first candidate at a position wins.
    fn record(&mut self, node: &SyntaxNode, fallback: Span, hint: TokenHint) {
        let span = node.span.unwrap_or(fallback);
        let width = if span.is_single_line() && span.end_col > span.start_col {
            span.end_col - span.start_col
        } else {
            utf16_len(&node.text)
        };

        self.candidates
            .entry((span.start_line, span.start_col))
            .or_insert_with(|| HighlightCandidate {
                line: span.start_line,
                col: span.start_col,
                length: width,
                text: node.text.clone(),
                hint,
            });
    }
}

/// `{ yield $var }`: a sub-query whose only statement yields a variable.
fn single_yielded_var(target: Option<&SyntaxNode>) -> Option<&SyntaxNode> {
    let target = target.filter(|t| t.is(&NodeKind::SubQuery))?;
    let query = target.child(0)?;
    let [statement] = query.children.as_slice() else {
        return None;
    };
    if !statement.is(&NodeKind::YieldValu) {
        return None;
    }
    statement.child(0).filter(|v| v.is(&NodeKind::VarValue))
}
