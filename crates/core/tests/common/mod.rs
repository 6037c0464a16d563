#![allow(dead_code)]

use stormscope_api::models::{NodeKind, Span, SyntaxNode};
use stormscope_api::runtime::ModelDump;
use stormscope_core::IndexSnapshot;

/// Single-line span starting at 1-based `(line, col)` covering `width` columns.
pub fn at(line: u32, col: u32, width: u32) -> Option<Span> {
    Some(Span::new(line, col, line, col + width))
}

pub fn leaf(kind: NodeKind, span: Option<Span>, text: &str) -> SyntaxNode {
    SyntaxNode::new(kind, span, text)
}

pub fn query(children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Query, None, "").with_children(children)
}

/// `$path` with the sigil at `col`; the node covers the path only.
pub fn deref(line: u32, col: u32, path: &str) -> SyntaxNode {
    leaf(NodeKind::VarDeref, at(line, col + 1, path.len() as u32), path)
}

pub fn var(line: u32, col: u32, name: &str) -> SyntaxNode {
    leaf(NodeKind::VarValue, at(line, col, name.len() as u32 + 1), name)
}

/// `$path(args..., kw=val...)`
pub fn call(
    line: u32,
    col: u32,
    path: &str,
    args: Vec<SyntaxNode>,
    kwargs: Vec<SyntaxNode>,
) -> SyntaxNode {
    let width = path.len() as u32 + 3;
    leaf(NodeKind::FuncCall, at(line, col, width), path).with_children(vec![
        deref(line, col, path),
        leaf(NodeKind::CallArgs, at(line, col, width), "").with_children(args),
        leaf(NodeKind::CallKwargs, at(line, col, width), "").with_children(kwargs),
    ])
}

pub fn kwarg(line: u32, col: u32, name: &str, value: &str) -> SyntaxNode {
    let width = (name.len() + value.len() + 1) as u32;
    leaf(NodeKind::CallKwarg, at(line, col, width), "").with_children(vec![
        leaf(NodeKind::Const, at(line, col, name.len() as u32), name),
        leaf(
            NodeKind::Const,
            at(line, col + name.len() as u32 + 1, value.len() as u32),
            value,
        ),
    ])
}

/// `function name(params) { body }` spanning `lines`.
pub fn function(
    lines: (u32, u32),
    name: &str,
    params: Vec<SyntaxNode>,
    body: Vec<SyntaxNode>,
) -> SyntaxNode {
    let (start, end) = lines;
    let span = Some(Span::new(start, 1, end, 2));
    leaf(NodeKind::Function, span, "").with_children(vec![
        leaf(NodeKind::Const, at(start, 10, name.len() as u32), name),
        leaf(NodeKind::FuncArgs, at(start, 10, 1), "").with_children(params),
        leaf(NodeKind::Query, Some(Span::new(start, 20, end, 1)), "{ ... }").with_children(body),
    ])
}

pub fn param(line: u32, name: &str) -> SyntaxNode {
    leaf(NodeKind::Const, at(line, 14, name.len() as u32), name)
}

pub fn set_var(line: u32, name: &str, value: SyntaxNode) -> SyntaxNode {
    leaf(NodeKind::SetVarOper, at(line, 1, 20), "").with_children(vec![
        leaf(NodeKind::Const, at(line, 2, name.len() as u32), name),
        value,
    ])
}

pub fn lift(line: u32, col: u32, prop: &str) -> SyntaxNode {
    leaf(NodeKind::LiftProp, at(line, col, prop.len() as u32), prop).with_children(vec![leaf(
        NodeKind::Const,
        at(line, col, prop.len() as u32),
        prop,
    )])
}

/// `+(verb)> { yield $name }` or the incoming form, with `statements` extra
/// statements after the yield.
pub fn edge_add(line: u32, verb: &str, incoming: bool, yielded: &str, extra: Vec<SyntaxNode>) -> SyntaxNode {
    let mut statements = vec![leaf(NodeKind::YieldValu, at(line, 14, 10), "")
        .with_children(vec![var(line, 20, yielded)])];
    statements.extend(extra);

    leaf(NodeKind::EditEdgeAdd { incoming }, at(line, 1, 30), "").with_children(vec![
        leaf(NodeKind::Const, at(line, 3, verb.len() as u32), verb),
        leaf(NodeKind::SubQuery, at(line, 12, 15), "").with_children(vec![
            leaf(NodeKind::Query, at(line, 13, 13), "").with_children(statements),
        ]),
    ])
}

pub fn model() -> ModelDump {
    serde_json::from_value(serde_json::json!({
        "version": "2.150.0",
        "libraries": [
            {
                "path": [],
                "locals": [
                    {"name": "print", "desc": "Print a message to the runtime.",
                     "type": {"type": "function",
                              "args": [{"name": "mesg", "type": "str", "desc": "The message."}],
                              "returns": {"type": "null"}}},
                    {"name": "list", "desc": "Get a Storm List object.",
                     "type": {"type": "function", "returns": {"type": "list"}},
                     "deprecated": {"eolvers": "v3.0.0"}},
                    {"name": "list2", "desc": "A newer list.",
                     "type": {"type": "function", "returns": {"type": "list"}}},
                    {"name": "dict", "desc": "Get a Storm Dict object.",
                     "type": {"type": "function", "returns": {"type": "dict"}}},
                    {"name": "warn", "desc": "Print a warning.",
                     "type": {"type": "function", "returns": {"type": "null"}}},
                    {"name": "null", "desc": "The null value.", "type": "null"},
                    {"name": "true", "desc": "Boolean true.", "type": "boolean"},
                    {"name": "undocumented", "type": "str"}
                ]
            },
            {
                "path": ["old"],
                "deprecated": true,
                "locals": [
                    {"name": "thing", "desc": "An old thing.",
                     "type": {"type": "function", "returns": {"type": "str"}}}
                ]
            }
        ],
        "types": [
            {"name": "inet:fqdn", "doc": "A Fully Qualified Domain Name (FQDN)."},
            {"name": "inet:ipv4", "doc": "An IPv4 address.", "deprecated": true}
        ],
        "forms": [
            {"name": "inet:fqdn", "props": [
                {"name": "zone", "full": "inet:fqdn:zone", "type": ["inet:fqdn", {}],
                 "doc": "The zone level parent for this FQDN."},
                {"name": "issuffix", "full": "inet:fqdn:issuffix", "type": ["bool", {}],
                 "doc": "True if the FQDN is considered a suffix.", "deprecated": true}
            ]}
        ],
        "commands": [
            {"name": "uniq", "brief": "Filter nodes by their uniq iden values.",
             "help": "Filter nodes by their uniq iden values.\n\nusage: uniq [-h]"}
        ]
    }))
    .expect("fixture model must deserialize")
}

pub fn index() -> IndexSnapshot {
    IndexSnapshot::build(&model(), "2.150.0")
}
