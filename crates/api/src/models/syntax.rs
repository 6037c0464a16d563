use super::position::Span;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Node kinds the analysis engine understands.
///
/// The tree is produced by an external parser. Kinds the engine has no rule
/// for deserialize to [`NodeKind::Unhandled`]: they are still traversed, but
/// never classified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Query,
    VarDeref,
    VarValue,
    FuncCall,
    CallArgs,
    CallKwargs,
    CallKwarg,
    LiftProp,
    LiftPropBy,
    EditNodeAdd,
    EditEdgeAdd {
        #[serde(default)]
        incoming: bool,
    },
    SubQuery,
    YieldValu,
    Return,
    Function,
    FuncArgs,
    SetVarOper,
    Const,
    #[serde(other)]
    Unhandled,
}

/// A node of the parsed query. The engine never mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// `None` for synthetic nodes the parser could not place.
    #[serde(default)]
    pub span: Option<Span>,
    /// Literal source text. Dereference nodes carry their path without the
    /// `$` sigil (`lib.null`).
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Option<Span>, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    pub fn is(&self, kind: &NodeKind) -> bool {
        &self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_deserialize_as_unhandled() {
        let json = r#"{"kind": {"type": "switch_case"}, "text": "switch"}"#;
        let node: SyntaxNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Unhandled);
        assert!(node.span.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn edge_direction_is_read_from_the_tag() {
        let json = r#"{
            "kind": {"type": "edit_edge_add", "incoming": true},
            "span": {"start_line": 1, "start_col": 1, "end_line": 1, "end_col": 20},
            "text": "<(refs)+ { yield $n }"
        }"#;
        let node: SyntaxNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::EditEdgeAdd { incoming: true });
        assert_eq!(node.span.unwrap().end_col, 20);
    }
}
