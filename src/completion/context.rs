//! Completion context detection.
//!
//! Classifies the text between the start of the cursor's line and the
//! cursor. The checks run in a fixed priority order and the first match
//! wins.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::Settings;
use crate::document::{Document, DocumentKind, Position};
use crate::markup::is_in_style_block;
use crate::schema;

/// `@import` / `@use` at the start of the word
static IMPORT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(?:import|use)\b\s*(.*)$").expect("import prefix pattern"));

/// `property: value` and `$variable: value`
static DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\$?[\w-]+)\s*:\s*(.*)$").expect("declaration pattern"));

/// Old-style `:property value`
static OLD_DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([\w-]+)\s+(.*)$").expect("old declaration pattern"));

/// A number without a unit yet
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)$").expect("number pattern"));

/// Relative, home or rooted paths and `dir/...` forms
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\.{1,2}/|~/?|/[\w.-]|[A-Za-z_][\w.-]*/)[\w./-]*$").expect("path pattern")
});

/// Where the cursor is, as far as completion is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// Markup document, cursor outside any `<style>` block
    OutsideStyleBlock,
    /// `?abbreviation` with the abbreviations extension installed
    Abbreviation,
    /// After `@import` / `@use`
    ImportPath { partial: String },
    /// After a `&` parent reference
    PseudoSelector,
    /// After `/`
    Comment,
    /// Typing a file path; the host's own path completion handles it
    Path,
    /// Value position of a declaration
    Value {
        /// Known CSS property, `None` for `$variable:` declarations
        property: Option<String>,
        prefix: String,
        number: Option<String>,
    },
    /// Anywhere else: property names, selectors, mixin includes, at-rules
    PropertyOrSelector { word: String, number: Option<String> },
}

impl CursorContext {
    /// Contexts answered from the symbol index.
    pub fn is_general(&self) -> bool {
        matches!(
            self,
            CursorContext::Value { .. } | CursorContext::PropertyOrSelector { .. }
        )
    }
}

/// Detect the completion context at a position.
pub fn detect_cursor_context(
    doc: &Document,
    position: Position,
    settings: &Settings,
    abbreviations_available: bool,
) -> CursorContext {
    let word = doc.line_prefix(position).trim();

    tracing::debug!(
        "Context detection: line={}, col={}, word='{}'",
        position.line,
        position.character,
        word
    );

    if doc.kind == DocumentKind::Markup && !is_in_style_block(doc, position.line) {
        return CursorContext::OutsideStyleBlock;
    }

    if abbreviations_available && word.starts_with('?') {
        return CursorContext::Abbreviation;
    }

    if let Some(caps) = IMPORT_PREFIX_RE.captures(word) {
        let partial = caps[1].trim_start_matches(['"', '\'']).to_string();
        return CursorContext::ImportPath { partial };
    }

    if word.starts_with('&') {
        return CursorContext::PseudoSelector;
    }

    let number = if settings.disable_unit_completion {
        None
    } else {
        trailing_number(word)
    };

    if word.starts_with('/') {
        return CursorContext::Comment;
    }

    if is_path(word) {
        return CursorContext::Path;
    }

    if let Some((property, value)) = declaration_parts(word) {
        return CursorContext::Value {
            property,
            prefix: last_token(value).to_string(),
            number,
        };
    }

    CursorContext::PropertyOrSelector {
        word: word.to_string(),
        number,
    }
}

/// Split a declaration into its known property (if any) and value text.
/// Returns `None` for anything that is not value position.
fn declaration_parts(word: &str) -> Option<(Option<String>, &str)> {
    let caps = DECLARATION_RE
        .captures(word)
        .or_else(|| OLD_DECLARATION_RE.captures(word))?;
    let name = caps.get(1)?.as_str();
    let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    if name.starts_with('$') {
        return Some((None, value));
    }
    schema::property(name).map(|p| (Some(p.name.clone()), value))
}

/// Last token of a value, split on whitespace, commas and open parens.
fn last_token(text: &str) -> &str {
    text.rsplit(|c: char| c.is_whitespace() || c == ',' || c == '(')
        .next()
        .unwrap_or("")
}

/// The unitless number being typed at the end of the word, if any.
fn trailing_number(word: &str) -> Option<String> {
    let token = word
        .rsplit(|c: char| c.is_whitespace() || c == ':' || c == ',' || c == '(')
        .next()?;
    NUMBER_RE.is_match(token).then(|| token.to_string())
}

/// Whether the word ends in something that looks like a file path.
fn is_path(word: &str) -> bool {
    let token = word
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"' || c == '\'')
        .next()
        .unwrap_or("");
    PATH_RE.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> CursorContext {
        detect_with(text, &Settings::default(), false)
    }

    fn detect_with(text: &str, settings: &Settings, abbreviations: bool) -> CursorContext {
        let doc = Document::new("/w/a.sass", text);
        let last = text.lines().count().saturating_sub(1) as u32;
        let col = text.lines().last().map(|l| l.chars().count()).unwrap_or(0) as u32;
        detect_cursor_context(&doc, Position::new(last, col), settings, abbreviations)
    }

    #[test]
    fn test_import_path() {
        assert_eq!(
            detect("@import 'parti"),
            CursorContext::ImportPath {
                partial: "parti".into()
            }
        );
        assert_eq!(
            detect("@use "),
            CursorContext::ImportPath {
                partial: String::new()
            }
        );
    }

    #[test]
    fn test_pseudo_selector() {
        assert_eq!(detect(".btn\n  &"), CursorContext::PseudoSelector);
        assert_eq!(detect(".btn\n  &:ho"), CursorContext::PseudoSelector);
    }

    #[test]
    fn test_comment_and_path() {
        assert_eq!(detect("/"), CursorContext::Comment);
        assert_eq!(detect("//"), CursorContext::Comment);
        assert_eq!(
            detect(".a\n  background: url(../img/"),
            CursorContext::Path
        );
        assert_eq!(detect("  ./partials/"), CursorContext::Path);
    }

    #[test]
    fn test_value_context() {
        assert_eq!(
            detect(".a\n  color: re"),
            CursorContext::Value {
                property: Some("color".into()),
                prefix: "re".into(),
                number: None,
            }
        );
        assert_eq!(
            detect(".a\n  :display fl"),
            CursorContext::Value {
                property: Some("display".into()),
                prefix: "fl".into(),
                number: None,
            }
        );
        assert_eq!(
            detect("$gap: "),
            CursorContext::Value {
                property: None,
                prefix: String::new(),
                number: None,
            }
        );
    }

    #[test]
    fn test_unknown_property_is_property_context() {
        assert_eq!(
            detect("a:hover"),
            CursorContext::PropertyOrSelector {
                word: "a:hover".into(),
                number: None,
            }
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            detect("1"),
            CursorContext::PropertyOrSelector {
                word: "1".into(),
                number: Some("1".into()),
            }
        );
        assert_eq!(
            detect(".a\n  width: 10"),
            CursorContext::Value {
                property: Some("width".into()),
                prefix: "10".into(),
                number: Some("10".into()),
            }
        );
        assert_eq!(
            detect(".a\n  font: 12px/1.5"),
            CursorContext::Value {
                property: Some("font".into()),
                prefix: "12px/1.5".into(),
                number: None,
            }
        );
    }

    #[test]
    fn test_units_disabled() {
        let settings = Settings {
            disable_unit_completion: true,
            ..Settings::default()
        };
        assert_eq!(
            detect_with("1", &settings, false),
            CursorContext::PropertyOrSelector {
                word: "1".into(),
                number: None,
            }
        );
    }

    #[test]
    fn test_abbreviation_needs_extension() {
        assert_eq!(
            detect_with("?bd", &Settings::default(), true),
            CursorContext::Abbreviation
        );
        assert!(matches!(
            detect_with("?bd", &Settings::default(), false),
            CursorContext::PropertyOrSelector { .. }
        ));
    }

    #[test]
    fn test_markup_outside_style_block() {
        let doc = Document::new("/w/App.vue", "<template>\n  <div>\n</template>");
        let ctx = detect_cursor_context(&doc, Position::new(1, 6), &Settings::default(), false);
        assert_eq!(ctx, CursorContext::OutsideStyleBlock);
    }
}
