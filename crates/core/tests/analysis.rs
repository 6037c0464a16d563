mod common;

use common::*;
use stormscope_api::models::{NodeKind, Range, Severity, SymbolKind};
use stormscope_core::analysis::tokens::{self, TokenType, modifier};
use stormscope_core::analysis::{TokenHint, analyze, collect_functions, document_symbols, walk};

fn messages(tree: &stormscope_api::models::SyntaxNode) -> Vec<String> {
    walk(tree, &index())
        .diagnostics
        .into_iter()
        .map(|d| d.message)
        .collect()
}

#[test]
fn test_literal_alias_is_flagged() {
    let tree = query(vec![set_var(1, "x", deref(1, 6, "lib.null"))]);
    let out = walk(&tree, &index());

    assert_eq!(out.diagnostics.len(), 1);
    let diag = &out.diagnostics[0];
    assert_eq!(diag.message, "Prefer JSON Expression syntax `(null)` over `$lib.null`");
    assert_eq!(diag.severity, Severity::Warning);
    assert_eq!(diag.range, Range::new(0, 6, 0, 14));

    assert_eq!(out.candidates.len(), 1);
    assert_eq!(out.candidates[0].hint, TokenHint::Literal);
    assert_eq!((out.candidates[0].line, out.candidates[0].col), (1, 7));
}

#[test]
fn test_return_null_reports_once_on_the_argument() {
    let ret = leaf(NodeKind::Return, at(2, 1, 17), "return($lib.null)")
        .with_children(vec![deref(2, 8, "lib.null")]);
    let tree = query(vec![ret]);
    let out = walk(&tree, &index());

    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].message, "Prefer `return()` over `return($lib.null)`");
    assert_eq!(out.diagnostics[0].range, Range::new(1, 8, 1, 16));
}

#[test]
fn test_nested_return_is_still_checked() {
    let ret = leaf(NodeKind::Return, at(2, 5, 17), "").with_children(vec![deref(2, 12, "lib.null")]);
    let tree = query(vec![function((1, 3), "f", vec![], vec![ret])]);

    assert_eq!(messages(&tree), vec!["Prefer `return()` over `return($lib.null)`"]);
}

#[test]
fn test_print_with_kwargs_prefers_format_strings() {
    let tree = query(vec![
        call(1, 1, "lib.print", vec![], vec![kwarg(1, 12, "x", "1")]),
        call(2, 1, "lib.print", vec![var(2, 12, "x")], vec![]),
    ]);
    let out = walk(&tree, &index());

    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].message, "Prefer backtick format strings");
    assert_eq!(out.diagnostics[0].range, Range::new(0, 1, 0, 10));
}

#[test]
fn test_list_and_dict_constructors_are_discouraged() {
    let tree = query(vec![
        call(1, 1, "lib.list", vec![], vec![]),
        call(2, 1, "lib.dict", vec![], vec![]),
    ]);

    assert_eq!(
        messages(&tree),
        vec![
            "$lib.list is deprecated. Prefer `([])`.",
            "$lib.dict is deprecated. Prefer `({})`.",
        ]
    );
}

#[test]
fn test_deprecated_library_call() {
    let tree = query(vec![call(1, 1, "lib.old.thing", vec![], vec![])]);
    assert_eq!(messages(&tree), vec!["$lib.old.thing is deprecated"]);
}

#[test]
fn test_edge_shorthand_suggestions() {
    let tree = query(vec![
        edge_add(1, "refs", false, "n", vec![]),
        edge_add(2, "refs", true, "n", vec![]),
    ]);

    assert_eq!(
        messages(&tree),
        vec![
            "Prefer `+(refs)> $n` over `+(refs)> { yield $n }`",
            "Prefer `<(refs)+ $n` over `<(refs)+ { yield $n }`",
        ]
    );
}

#[test]
fn test_edge_with_more_statements_is_left_alone() {
    let extra = call(1, 25, "lib.print", vec![var(1, 36, "n")], vec![]);
    let tree = query(vec![edge_add(1, "refs", false, "n", vec![extra])]);
    assert!(messages(&tree).is_empty());
}

#[test]
fn test_nodes_without_position_are_skipped_with_their_subtree() {
    let synthetic = leaf(NodeKind::SubQuery, None, "").with_children(vec![deref(1, 1, "lib.null")]);
    let tree = query(vec![synthetic]);
    let out = walk(&tree, &index());
    assert!(out.diagnostics.is_empty());
    assert!(out.candidates.is_empty());
}

#[test]
fn test_duplicate_function_keeps_the_first() {
    let tree = query(vec![
        function(
            (1, 3),
            "foo",
            vec![param(1, "a"), kwarg(1, 17, "b", "1")],
            vec![],
        ),
        function((4, 4), "foo", vec![param(4, "c")], vec![]),
    ]);

    let (symbols, diagnostics) = collect_functions(&tree);
    assert_eq!(symbols.len(), 1);
    let foo = &symbols["foo"];
    assert_eq!(foo.signature(), "function foo(a, b=1)");
    assert_eq!((foo.start_line, foo.end_line), (1, 3));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "function foo is already defined on line 1");
    assert_eq!(diagnostics[0].range, Range::new(3, 0, 3, 1));
}

#[test]
fn test_parenthesized_default_is_unwrapped() {
    let tree = query(vec![
        function(
            (1, 1),
            "foo",
            vec![param(1, "a"), kwarg(1, 17, "b", "(1)")],
            vec![],
        ),
        function((2, 2), "foo", vec![param(2, "c")], vec![]),
    ]);

    let (symbols, diagnostics) = collect_functions(&tree);
    let params: Vec<(&str, Option<&str>)> = symbols["foo"]
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.default.as_deref()))
        .collect();
    assert_eq!(params, vec![("a", None), ("b", Some("1"))]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "function foo is already defined on line 1");
}

#[test]
fn test_call_head_keeps_its_function_hint() {
    // the head is recorded by the call before its dereference node is visited
    let tree = query(vec![
        call(1, 1, "lib.true", vec![], vec![]),
        call(2, 1, "lib.undocumented", vec![], vec![]),
    ]);
    let out = walk(&tree, &index());

    let hints: Vec<(u32, u32, TokenHint)> = out
        .candidates
        .iter()
        .map(|c| (c.line, c.col, c.hint))
        .collect();
    assert_eq!(
        hints,
        vec![(1, 2, TokenHint::Function), (2, 2, TokenHint::Function)]
    );
}

#[test]
fn test_outline_lists_functions_and_assignments() {
    let tree = query(vec![
        set_var(1, "x", var(1, 6, "y")),
        function((2, 5), "foo", vec![], vec![]),
        call(6, 1, "lib.print", vec![], vec![]),
    ]);

    let outline = document_symbols(&tree);
    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0].name, "x");
    assert_eq!(outline[0].kind, SymbolKind::Variable);
    assert_eq!(outline[1].name, "foo");
    assert_eq!(outline[1].kind, SymbolKind::Function);
    assert_eq!(outline[1].range, Range::new(1, 0, 4, 0));
}

#[test]
fn test_analysis_is_deterministic() {
    let tree = query(vec![
        function((1, 2), "foo", vec![], vec![call(2, 5, "lib.list", vec![], vec![])]),
        function((3, 3), "foo", vec![], vec![]),
        set_var(4, "x", deref(4, 6, "lib.true")),
        lift(5, 1, "inet:fqdn:zone"),
        edge_add(6, "refs", false, "n", vec![]),
    ]);
    let index = index();

    let first = analyze(&tree, &index);
    let second = analyze(&tree, &index);
    assert_eq!(first, second);
    assert_eq!(
        tokens::encode(&first.candidates, &index),
        tokens::encode(&second.candidates, &index)
    );
    // declaration findings come first
    assert!(first.diagnostics[0].message.starts_with("function foo"));
}

#[test]
fn test_tokens_decode_to_the_sorted_candidates() {
    let tree = query(vec![
        lift(3, 1, "inet:fqdn"),
        call(1, 1, "lib.print", vec![], vec![]),
        call(1, 20, "lib.list", vec![], vec![]),
    ]);
    let index = index();
    let out = walk(&tree, &index);

    let resolved = tokens::resolve(&out.candidates, &index);
    assert_eq!(tokens::decode(&tokens::encode(&out.candidates, &index)), resolved);

    let positions: Vec<(u32, u32)> = resolved.iter().map(|t| (t.line, t.col)).collect();
    assert_eq!(positions, vec![(0, 1), (0, 20), (2, 0)]);
}

#[test]
fn test_token_classification() {
    let tree = query(vec![
        call(1, 1, "lib.list", vec![], vec![]),
        call(2, 1, "lib.nope", vec![], vec![]),
        lift(3, 1, "inet:ipv4"),
        lift(4, 1, "inet:fqdn:issuffix"),
        lift(5, 1, "inet:nope"),
        set_var(6, "x", deref(6, 6, "lib.undocumented")),
    ]);
    let index = index();
    let resolved = tokens::resolve(&walk(&tree, &index).candidates, &index);
    let classes: Vec<(u32, u32)> = resolved.iter().map(|t| (t.token_type, t.modifiers)).collect();

    assert_eq!(
        classes,
        vec![
            // deprecated library function, whatever the call site looks like
            (TokenType::Function as u32, modifier::DEFAULT_LIBRARY | modifier::DEPRECATED),
            // unknown library path
            (TokenType::Function as u32, modifier::DEPRECATED),
            // deprecated form
            (TokenType::Property as u32, modifier::DEPRECATED),
            // deprecated property
            (TokenType::Property as u32, modifier::DEPRECATED),
            // unknown names are fine where they are being defined
            (TokenType::Property as u32, 0),
            // library value
            (TokenType::Property as u32, modifier::DEFAULT_LIBRARY),
        ]
    );
}
