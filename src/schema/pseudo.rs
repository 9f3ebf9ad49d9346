//! Pseudo-class and pseudo-element completions offered after `&`.

use crate::candidate::{Candidate, CompletionKind};

const PSEUDO_CLASSES: &[&str] = &[
    "active",
    "checked",
    "default",
    "disabled",
    "empty",
    "enabled",
    "first-child",
    "first-of-type",
    "focus",
    "focus-visible",
    "focus-within",
    "hover",
    "invalid",
    "last-child",
    "last-of-type",
    "link",
    "not(${1:selector})",
    "nth-child(${1:n})",
    "nth-last-child(${1:n})",
    "nth-of-type(${1:n})",
    "only-child",
    "optional",
    "placeholder-shown",
    "read-only",
    "required",
    "root",
    "target",
    "valid",
    "visited",
];

const PSEUDO_ELEMENTS: &[&str] = &[
    "after",
    "backdrop",
    "before",
    "first-letter",
    "first-line",
    "marker",
    "placeholder",
    "selection",
];

/// Pseudo-selector candidates.
///
/// With `and_stared` the candidates carry the parent reference
/// (`&:hover`) and are meant to replace the typed `&`; otherwise they are
/// inserted after it (`:hover`).
pub fn pseudo_completions(and_stared: bool) -> Vec<Candidate> {
    let prefix = if and_stared { "&" } else { "" };

    let classes = PSEUDO_CLASSES.iter().map(|snippet| (":", snippet));
    let elements = PSEUDO_ELEMENTS.iter().map(|snippet| ("::", snippet));

    classes
        .chain(elements)
        .map(|(colons, snippet)| {
            let label_name = snippet.split('(').next().unwrap_or_default();
            let label = format!("{}{}{}", prefix, colons, label_name);
            let insert = format!("{}{}{}", prefix, colons, snippet);
            let candidate = if snippet.contains('$') {
                Candidate::snippet(label, insert, CompletionKind::Keyword)
            } else {
                Candidate::plain(label, CompletionKind::Keyword).with_insert(insert)
            };
            let detail = if colons == "::" { "pseudo-element" } else { "pseudo-class" };
            candidate.with_detail(detail)
        })
        .collect()
}
