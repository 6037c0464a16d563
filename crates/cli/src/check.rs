use crate::IndexArgs;
use std::path::Path;
use stormscope_api::models::{Diagnostic, Severity, SyntaxNode};
use stormscope_api::parser::QueryParser;
use stormscope_core::analysis::tokens::{self, TOKEN_MODIFIERS, TOKEN_TYPES};
use stormscope_core::analysis::{HighlightCandidate, analyze};
use stormscope_core::{CommandParser, IndexSnapshot, index::source::UNKNOWN_VERSION};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DiagnosticRow {
    #[tabled(rename = "Line")]
    line: u32,
    #[tabled(rename = "Col")]
    col: u32,
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Line")]
    line: u32,
    #[tabled(rename = "Col")]
    col: u32,
    #[tabled(rename = "Len")]
    length: u32,
    #[tabled(rename = "Type")]
    token_type: &'static str,
    #[tabled(rename = "Modifiers")]
    modifiers: String,
}

pub fn run(
    file: &Path,
    index_args: &IndexArgs,
    parser_cmd: Option<&str>,
    show_tokens: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = match index_args.source().load() {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!("Checking without metadata: {}", e);
            IndexSnapshot::empty(UNKNOWN_VERSION)
        }
    };

    let text = std::fs::read_to_string(file)?;
    let tree: SyntaxNode = match parser_cmd {
        Some(cmd) => match CommandParser::new(cmd)?.parse(&text) {
            Ok(tree) => tree,
            Err(e) => {
                print_diagnostics(&[e.to_diagnostic()]);
                return Ok(());
            }
        },
        None => serde_json::from_str(&text)?,
    };

    let analysis = analyze(&tree, &index);
    print_diagnostics(&analysis.diagnostics);

    if show_tokens {
        print_tokens(&analysis.candidates, &index);
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("No problems found.");
        return;
    }

    let rows = diagnostics.iter().map(|d| DiagnosticRow {
        line: d.range.start_line + 1,
        col: d.range.start_col + 1,
        severity: match d.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        },
        message: d.message.clone(),
    });
    println!("{}", Table::new(rows));
}

fn print_tokens(candidates: &[HighlightCandidate], index: &IndexSnapshot) {
    let decoded = tokens::decode(&tokens::encode(candidates, index));
    let rows = decoded.into_iter().map(|t| TokenRow {
        line: t.line + 1,
        col: t.col + 1,
        length: t.length,
        token_type: TOKEN_TYPES.get(t.token_type as usize).copied().unwrap_or("?"),
        modifiers: modifier_names(t.modifiers),
    });
    println!("{}", Table::new(rows));
}

fn modifier_names(bits: u32) -> String {
    TOKEN_MODIFIERS
        .iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",")
}
