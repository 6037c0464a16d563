use super::position::Range;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Source text of the default value for keyword-style parameters, with
    /// any parentheses wrapping all of it removed.
    pub default: Option<String>,
}

impl Param {
    pub fn render(&self) -> String {
        match &self.default {
            Some(default) => format!("{}={}", self.name, default),
            None => self.name.clone(),
        }
    }
}

/// A top-level user function declaration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub name: String,
    pub params: Vec<Param>,
    pub body: String,
    pub decl_range: Range,
    pub body_range: Option<Range>,
    /// First and last line of the declaration, 1-based as reported by the parser.
    pub start_line: u32,
    pub end_line: u32,
}

impl FunctionSymbol {
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        format!("function {}({})", self.name, params.join(", "))
    }

    /// Whether a 0-based cursor line falls within the declaration.
    pub fn contains_line(&self, line: u32) -> bool {
        let line = line + 1;
        self.start_line <= line && line <= self.end_line
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Variable,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
}
