//! The word under the cursor.
//!
//! A word is an optional `$` sigil followed by one or more word characters,
//! `:` or `.`: `$lib.print`, `inet:fqdn:zone`, `:asn`. Anything else
//! (whitespace, brackets, operators, quotes) breaks a word, and `$` is only
//! accepted as the first character. The cursor matches a word when it sits
//! anywhere from its first character up to just past its last one, so a
//! completion request typed at the end of a fragment still sees it.

use crate::util::{byte_col_to_utf16_col, utf16_col_to_byte_col};
use once_cell::sync::Lazy;
use regex::Regex;
use stormscope_api::models::Range;

pub const SIGIL: char = '$';
pub const RELPROP_MARKER: char = ':';

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?[\w:.]+").expect("word pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Protocol range (UTF-16 columns) covering the word.
    pub range: Range,
}

impl Word {
    pub fn is_sigiled(&self) -> bool {
        self.text.starts_with(SIGIL)
    }
}

/// Finds the word on `line` (0-based line number `line_no`) touching the
/// UTF-16 column `utf16_col`.
pub fn word_at(line_no: u32, line: &str, utf16_col: u32) -> Option<Word> {
    let cursor = utf16_col_to_byte_col(line, utf16_col as usize);

    WORD.find_iter(line)
        .find(|m| m.start() <= cursor && cursor <= m.end())
        .map(|m| Word {
            text: m.as_str().to_string(),
            range: Range::new(
                line_no,
                byte_col_to_utf16_col(line, m.start()) as u32,
                line_no,
                byte_col_to_utf16_col(line, m.end()) as u32,
            ),
        })
}

/// `$name` for a bare name.
pub fn sigiled(name: &str) -> String {
    format!("{SIGIL}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_at(line: &str, col: u32) -> Option<String> {
        word_at(0, line, col).map(|w| w.text)
    }

    #[test]
    fn sigil_starts_a_word() {
        assert_eq!(text_at("$lib.print('hi')", 3).as_deref(), Some("$lib.print"));
        let word = word_at(4, "  $lib.li", 9).unwrap();
        assert_eq!(word.range, Range::new(4, 2, 4, 9));
        assert!(word.is_sigiled());
    }

    #[test]
    fn sigil_inside_a_word_breaks_it() {
        assert_eq!(text_at("a$b", 0).as_deref(), Some("a"));
        assert_eq!(text_at("a$b", 2).as_deref(), Some("$b"));
    }

    #[test]
    fn colons_and_dots_join_words() {
        assert_eq!(
            text_at("inet:fqdn:zone=vertex.link", 6).as_deref(),
            Some("inet:fqdn:zone")
        );
        assert_eq!(text_at("[ :asn=10 ]", 3).as_deref(), Some(":asn"));
        assert_eq!(
            text_at("=vertex.link", 5).as_deref(),
            Some("vertex.link")
        );
    }

    #[test]
    fn whitespace_separates_words() {
        assert_eq!(text_at("uniq  limit", 5), None);
        assert_eq!(text_at("uniq  limit", 4).as_deref(), Some("uniq"));
        assert_eq!(text_at("uniq  limit", 6).as_deref(), Some("limit"));
    }

    #[test]
    fn cursor_just_past_the_end_still_matches() {
        assert_eq!(text_at("inet:fq", 7).as_deref(), Some("inet:fq"));
    }

    #[test]
    fn empty_and_blank_lines_have_no_word() {
        assert_eq!(text_at("", 0), None);
        assert_eq!(text_at("   ", 1), None);
    }

    #[test]
    fn ranges_are_measured_in_utf16() {
        let word = word_at(0, "'😀' $x", 6).unwrap();
        assert_eq!(word.text, "$x");
        assert_eq!(word.range, Range::new(0, 5, 0, 7));
    }
}
