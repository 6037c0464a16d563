//! Hover documentation for the word under the cursor.

use crate::analysis::symbols::SymbolTable;
use crate::analysis::word::{RELPROP_MARKER, SIGIL, Word};
use crate::index::IndexSnapshot;
use stormscope_api::models::{
    CommandEntry, FormTypeEntry, FunctionSymbol, LibraryEntry, MetadataEntry, PropertyEntry,
    Range, Signature,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverTarget<'a> {
    Entry(MetadataEntry<'a>),
    Function(&'a FunctionSymbol),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo<'a> {
    /// The looked-up word, relative property marker removed.
    pub word: String,
    pub range: Range,
    pub target: HoverTarget<'a>,
}

/// Finds what `name` refers to. Libraries are only consulted for sigiled
/// names; every other section is keyed by the bare name.
pub fn resolve<'a>(
    name: &str,
    symbols: &'a SymbolTable,
    index: &'a IndexSnapshot,
) -> Option<HoverTarget<'a>> {
    if name.starts_with(SIGIL) {
        if let Some(lib) = index.library(name) {
            return Some(HoverTarget::Entry(MetadataEntry::Library(lib)));
        }
    }

    let bare = name.trim_start_matches(SIGIL).trim_start_matches(RELPROP_MARKER);

    index
        .property(bare)
        .map(MetadataEntry::Property)
        .or_else(|| index.form_type(bare).map(MetadataEntry::FormType))
        .or_else(|| index.command(bare).map(MetadataEntry::Command))
        .map(HoverTarget::Entry)
        .or_else(|| symbols.get(bare).map(HoverTarget::Function))
}

/// Hover for `word`, or `None` when nothing documented matches.
///
/// Index entries without documentation text produce no hover. A function
/// declared in the document has no documentation of its own, so its hover
/// is its signature.
pub fn hover<'a>(
    word: &Word,
    symbols: &'a SymbolTable,
    index: &'a IndexSnapshot,
) -> Option<HoverInfo<'a>> {
    let name = word
        .text
        .strip_prefix(RELPROP_MARKER)
        .unwrap_or(&word.text);

    let target = resolve(name, symbols, index)?;
    if let HoverTarget::Entry(entry) = target {
        entry.doc()?;
    }

    Some(HoverInfo {
        word: name.to_string(),
        range: word.range,
        target,
    })
}

impl HoverInfo<'_> {
    pub fn markdown(&self) -> String {
        let mut lines = vec![self.word.clone(), String::new()];
        if let HoverTarget::Entry(entry) = self.target {
            if entry.deprecated() {
                lines.push("**Deprecated**".to_string());
                lines.push(String::new());
            }
        }

        match self.target {
            HoverTarget::Entry(MetadataEntry::Library(lib)) => library_lines(lib, &mut lines),
            HoverTarget::Entry(MetadataEntry::FormType(form)) => form_lines(form, &mut lines),
            HoverTarget::Entry(MetadataEntry::Property(prop)) => property_lines(prop, &mut lines),
            HoverTarget::Entry(MetadataEntry::Command(cmd)) => command_lines(cmd, &mut lines),
            HoverTarget::Function(func) => {
                lines.push("```storm".to_string());
                lines.push(func.signature());
                lines.push("```".to_string());
            }
        }

        lines.join("\n")
    }
}

fn library_lines(lib: &LibraryEntry, lines: &mut Vec<String>) {
    lines.extend(clean_doc(lib.doc.as_deref().unwrap_or_default()));
    if let Some(sig) = lib.signature() {
        lines.push(String::new());
        signature_lines(sig, lines);
    }
}

fn signature_lines(sig: &Signature, lines: &mut Vec<String>) {
    if sig.args.is_empty() {
        lines.push("The function does not require any arguments.".to_string());
    } else {
        lines.push("Args:".to_string());
        for arg in &sig.args {
            let mut line = format!("    {} ({})", arg.name, arg.type_names.render());
            if let Some(desc) = &arg.desc {
                line.push_str(": ");
                line.push_str(desc);
            }
            if let Some(default) = &arg.default {
                line.push_str(&format!(" Default: {default}"));
            }
            lines.push(line);
        }
    }

    lines.push(String::new());
    lines.push("Returns:".to_string());
    let returns = &sig.returns;
    let type_name = returns.type_names.render();
    match returns.desc.as_deref().filter(|d| !d.is_empty()) {
        Some(desc) => lines.push(format!("    {desc} The return type is `{type_name}`.")),
        None => lines.push(format!("    The return type is `{type_name}`.")),
    }
}

fn form_lines(form: &FormTypeEntry, lines: &mut Vec<String>) {
    lines.extend(clean_doc(&form.doc));
    lines.push(String::new());
    lines.push("Props:".to_string());
    for prop in form.props.values() {
        let type_name = prop.prop_type.as_ref().map(|t| t.name()).unwrap_or("?");
        lines.push(format!("    :{}=<{}>", prop.name, type_name));
        lines.push(format!("        {}", prop.doc));
    }
}

fn property_lines(prop: &PropertyEntry, lines: &mut Vec<String>) {
    lines.extend(clean_doc(&prop.doc));
    lines.push(String::new());
    if let Some(prop_type) = &prop.prop_type {
        lines.push(format!("Type: {}", prop_type.name()));
        lines.push(format!(
            "Opts: {}",
            serde_json::Value::Object(prop_type.opts().clone())
        ));
    }
}

fn command_lines(cmd: &CommandEntry, lines: &mut Vec<String>) {
    lines.push(cmd.help.clone());
}

/// Docstring cleanup: surrounding blank lines dropped, the common indent of
/// the continuation lines removed.
fn clean_doc(doc: &str) -> Vec<String> {
    let raw: Vec<&str> = doc.lines().collect();
    let indent = raw
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim().to_string()
            } else {
                l.get(indent..).unwrap_or("").trim_end().to_string()
            }
        })
        .collect();

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
