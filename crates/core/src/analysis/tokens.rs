//! Semantic token encoding.
//!
//! The protocol's compact format is a flat list of integers, five per token:
//! `(deltaLine, deltaCol, length, tokenType, modifierBits)`. Lines are
//! relative to the previous token; columns are relative to the previous token
//! on the same line and absolute after a line change.

use crate::analysis::walker::{HighlightCandidate, TokenHint};
use crate::analysis::word::sigiled;
use crate::index::IndexSnapshot;

/// Token type legend, in protocol order.
pub const TOKEN_TYPES: [&str; 10] = [
    "keyword",
    "variable",
    "function",
    "operator",
    "parameter",
    "type",
    "string",
    "comment",
    "property",
    "interface",
];

/// Modifier legend, in bit order.
pub const TOKEN_MODIFIERS: [&str; 4] = ["deprecated", "readonly", "defaultLibrary", "definition"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TokenType {
    Keyword = 0,
    Variable = 1,
    Function = 2,
    Operator = 3,
    Parameter = 4,
    Type = 5,
    String = 6,
    Comment = 7,
    Property = 8,
    Interface = 9,
}

pub mod modifier {
    pub const DEPRECATED: u32 = 1 << 0;
    pub const READONLY: u32 = 1 << 1;
    pub const DEFAULT_LIBRARY: u32 = 1 << 2;
    pub const DEFINITION: u32 = 1 << 3;
}

impl TokenHint {
    pub fn token_type(self) -> TokenType {
        match self {
            TokenHint::Literal => TokenType::Keyword,
            TokenHint::Function => TokenType::Function,
            TokenHint::Property | TokenHint::Definition => TokenType::Property,
        }
    }
}

/// A token in absolute, 0-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteToken {
    pub line: u32,
    pub col: u32,
    pub length: u32,
    pub token_type: u32,
    pub modifiers: u32,
}

/// Final type and modifiers of a candidate against the current index.
pub fn classify(candidate: &HighlightCandidate, index: &IndexSnapshot) -> (TokenType, u32) {
    let mut token_type = candidate.hint.token_type();
    let mut modifiers = 0;

    if let Some(lib) = index.library(&sigiled(&candidate.text)) {
        modifiers |= modifier::DEFAULT_LIBRARY;
        if !lib.is_callable() {
            token_type = TokenType::Property;
        }
        if lib.deprecated {
            modifiers |= modifier::DEPRECATED;
        }
    } else if let Some(form) = index.form_type(&candidate.text) {
        if form.deprecated {
            modifiers |= modifier::DEPRECATED;
        }
    } else if let Some(prop) = index.property(&candidate.text) {
        if prop.deprecated {
            modifiers |= modifier::DEPRECATED;
        }
    } else if candidate.hint != TokenHint::Definition {
        // unknown names render struck through
        modifiers |= modifier::DEPRECATED;
    }

    (token_type, modifiers)
}

/// Sorts the candidates and resolves each one to an absolute token.
pub fn resolve(candidates: &[HighlightCandidate], index: &IndexSnapshot) -> Vec<AbsoluteToken> {
    let mut sorted: Vec<&HighlightCandidate> = candidates.iter().collect();
    sorted.sort_by_key(|c| (c.line, c.col));

    sorted
        .into_iter()
        .map(|candidate| {
            let (token_type, modifiers) = classify(candidate, index);
            AbsoluteToken {
                line: candidate.line.saturating_sub(1),
                col: candidate.col.saturating_sub(1),
                length: candidate.length,
                token_type: token_type as u32,
                modifiers,
            }
        })
        .collect()
}

pub fn encode(candidates: &[HighlightCandidate], index: &IndexSnapshot) -> Vec<u32> {
    delta_encode(&resolve(candidates, index))
}

/// Delta-encodes tokens that are already sorted by position.
pub fn delta_encode(tokens: &[AbsoluteToken]) -> Vec<u32> {
    let mut data = Vec::with_capacity(tokens.len() * 5);
    let mut prev_line = 0;
    let mut prev_col = 0;

    for token in tokens {
        let delta_line = token.line - prev_line;
        let delta_col = if token.line != prev_line {
            token.col
        } else {
            token.col - prev_col
        };

        data.extend_from_slice(&[
            delta_line,
            delta_col,
            token.length,
            token.token_type,
            token.modifiers,
        ]);

        prev_line = token.line;
        prev_col = token.col;
    }

    data
}

/// Reverses [`delta_encode`]. Trailing integers that do not form a full token are ignored.
pub fn decode(data: &[u32]) -> Vec<AbsoluteToken> {
    let mut tokens = Vec::with_capacity(data.len() / 5);
    let mut line = 0;
    let mut col = 0;

    for chunk in data.chunks_exact(5) {
        if chunk[0] != 0 {
            line += chunk[0];
            col = chunk[1];
        } else {
            col += chunk[1];
        }
        tokens.push(AbsoluteToken {
            line,
            col,
            length: chunk[2],
            token_type: chunk[3],
            modifiers: chunk[4],
        });
    }

    tokens
}
