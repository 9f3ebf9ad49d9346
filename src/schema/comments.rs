//! Comment snippets offered after `/`.

use crate::candidate::{Candidate, CompletionKind};

/// (label, snippet, description)
const COMMENTS: &[(&str, &str, &str)] = &[
    ("// region", "// region ${1:name}\n$0\n// endregion", "Foldable region"),
    ("// SECTION", "// SECTION ${1:name}\n$0\n// !SECTION", "Named section"),
    ("// NOTE", "// NOTE ${1:note}", "Note comment"),
    ("// TODO", "// TODO ${1:task}", "Todo comment"),
    ("// FIXME", "// FIXME ${1:problem}", "Fixme comment"),
    ("/* */", "/* ${1:comment} */", "Block comment, kept in the compiled CSS"),
    ("/*! */", "/*! ${1:comment} */", "Loud comment, kept even when compressed"),
];

pub fn comment_completions() -> Vec<Candidate> {
    COMMENTS
        .iter()
        .map(|(label, snippet, description)| {
            Candidate::snippet(*label, *snippet, CompletionKind::Snippet).with_detail(*description)
        })
        .collect()
}
