//! Editing rules for the indented syntax: what counts as a word and when
//! pressing enter opens a nested block.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::Settings;

/// Numbers with units, sigiled identifiers (`$var`, `@rule`, `.class`,
/// `#id`, `:pseudo`), or a lone sigil
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(#?-?\d*\.\d\w*%?)|([$@#!.:]?[\w\-?]+%?)|[$@#!.]").expect("word pattern")
});

/// What the editor should do with the line opened by enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentAction {
    /// Keep the previous line's indentation
    Keep,
    /// One level deeper than the previous line
    Indent,
}

/// Character range `[start, end)` of the word touching `character` on a
/// line, if any.
pub fn word_range(line: &str, character: u32) -> Option<(u32, u32)> {
    let cursor = character as usize;
    WORD_RE.find_iter(line).find_map(|m| {
        let start = line[..m.start()].chars().count();
        let end = start + m.as_str().chars().count();
        (start <= cursor && cursor <= end).then_some((start as u32, end as u32))
    })
}

/// Indentation for the line after `before_text` (the text left of the
/// cursor when enter was pressed).
///
/// Selector and mixin lines open a block. Declarations, at-rules other
/// than `@media`, comma-continued selector lists and `+include` lines do
/// not.
pub fn on_enter_action(before_text: &str, settings: &Settings) -> IndentAction {
    if settings.disable_auto_indent {
        return IndentAction::Keep;
    }
    if before_text.contains("@media") {
        return IndentAction::Indent;
    }

    let trimmed = before_text.trim();
    let opens_block = !(trimmed.is_empty()
        || before_text.contains(": ")
        || before_text.contains('@')
        || trimmed.ends_with(',')
        || trimmed.starts_with('+'));

    if opens_block {
        IndentAction::Indent
    } else {
        IndentAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(text: &str) -> IndentAction {
        on_enter_action(text, &Settings::default())
    }

    #[test]
    fn test_selectors_open_blocks() {
        assert_eq!(action(".card"), IndentAction::Indent);
        assert_eq!(action("  &:hover"), IndentAction::Indent);
        assert_eq!(action("=button($color)"), IndentAction::Indent);
        assert_eq!(action("@media (max-width: 600px)"), IndentAction::Indent);
    }

    #[test]
    fn test_statements_keep_indent() {
        assert_eq!(action("  color: red"), IndentAction::Keep);
        assert_eq!(action("@import variables"), IndentAction::Keep);
        assert_eq!(action("h1,"), IndentAction::Keep);
        assert_eq!(action("  +button(red)"), IndentAction::Keep);
        assert_eq!(action("   "), IndentAction::Keep);
    }

    #[test]
    fn test_auto_indent_can_be_disabled() {
        let settings = Settings {
            disable_auto_indent: true,
            ..Settings::default()
        };
        assert_eq!(on_enter_action(".card", &settings), IndentAction::Keep);
        assert_eq!(on_enter_action("@media print", &settings), IndentAction::Keep);
    }

    #[test]
    fn test_word_range() {
        assert_eq!(word_range("  color: $brand", 15), Some((9, 15)));
        assert_eq!(word_range("  margin: 1.5em", 15), Some((10, 15)));
        assert_eq!(word_range("  &:hover", 9), Some((3, 9)));
        assert_eq!(word_range("    ", 2), None);
    }
}
