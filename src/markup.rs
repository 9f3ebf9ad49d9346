//! Markup documents with embedded stylesheets.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::candidate::{Candidate, CompletionKind};
use crate::document::Document;

/// `class="a b"`, excluding bound attributes such as `:class`
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("class attribute pattern")
});

/// `id="main"`, excluding bound attributes such as `:id`
static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("id attribute pattern")
});

/// Whether a line of a markup document sits inside a `<style>` block.
///
/// Looks backward for the nearest style tag: an opening `<style` means
/// inside, a closing `</style>` (or none at all) means outside. A tag on
/// the cursor line itself only counts when it precedes the cursor line.
pub fn is_in_style_block(doc: &Document, line: u32) -> bool {
    let lines: Vec<&str> = doc.lines().collect();
    let upto = (line as usize).min(lines.len());

    for text in lines[..upto].iter().rev() {
        let open = text.rfind("<style");
        let close = text.rfind("</style");
        match (open, close) {
            (Some(o), Some(c)) => return o > c,
            (Some(_), None) => return true,
            (None, Some(_)) => return false,
            (None, None) => {}
        }
    }
    false
}

/// `.class` and `#id` candidates for every class and id attribute in the
/// document, in order of first appearance.
pub fn class_and_id_completions(doc: &Document) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let mut collect = |re: &Regex, sigil: char, kind: CompletionKind, detail: &str| {
        for caps in re.captures_iter(&doc.text) {
            let value = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            for name in value.unwrap_or_default().split_whitespace() {
                let label = format!("{}{}", sigil, name);
                if seen.insert(label.clone()) {
                    candidates.push(Candidate::plain(label, kind).with_detail(detail));
                }
            }
        }
    };

    collect(&*CLASS_ATTR_RE, '.', CompletionKind::Class, "class");
    collect(&*ID_ATTR_RE, '#', CompletionKind::Reference, "id");

    candidates
}
