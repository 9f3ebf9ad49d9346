//! Line classification.
//!
//! Recognizes the two declaration forms the index cares about:
//!
//! ```sass
//! $primary: #333            // variable
//! @mixin button($color, $size: 10px)
//! =button($color)           // indented-syntax mixin shorthand
//! ```
//!
//! Everything else classifies as `None` and is skipped by the scanner.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `$name: value`, with an optional trailing `;` for brace syntax
static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\$[\w-]+)\s*:\s*(\S.*?)\s*;?\s*$").expect("variable pattern")
});

/// `@mixin name(params)` or `=name(params)`, optionally opening a `{` block
static MIXIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:@mixin\s+|=)([\w-]+)\s*(?:\((.*)\))?\s*\{?\s*$").expect("mixin pattern")
});

/// Kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Mixin,
    Variable,
}

/// One line of a document with its zero-based number.
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    pub text: &'a str,
    pub number: u32,
}

impl<'a> SourceLine<'a> {
    pub fn new(text: &'a str, number: u32) -> Self {
        Self { text, number }
    }
}

/// A symbol declared on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: SymbolKind,
    /// Literal name for variables, a placeholder snippet for mixins
    pub insert_text: String,
    /// The declaration line as written, trimmed
    pub detail: String,
    /// Indentation nesting level; filled in by the scope tracker
    pub scope_depth: usize,
    pub declared_at_line: u32,
}

/// Classify a single line as a variable or mixin declaration.
pub fn classify(line: SourceLine<'_>) -> Option<Declaration> {
    if let Some(caps) = MIXIN_RE.captures(line.text) {
        let name = caps[1].to_string();
        let params = caps.get(2).map(|m| parameter_names(m.as_str())).unwrap_or_default();
        return Some(Declaration {
            insert_text: mixin_snippet(&name, params.len()),
            name,
            kind: SymbolKind::Mixin,
            detail: line.text.trim().to_string(),
            scope_depth: 0,
            declared_at_line: line.number,
        });
    }

    let caps = VARIABLE_RE.captures(line.text)?;
    let name = caps[1].to_string();
    Some(Declaration {
        insert_text: name.clone(),
        name,
        kind: SymbolKind::Variable,
        detail: line.text.trim().to_string(),
        scope_depth: 0,
        declared_at_line: line.number,
    })
}

/// Parameter names of a mixin declaration line, in declaration order.
///
/// Returns an empty list for non-mixin lines.
pub fn mixin_parameters(text: &str) -> Vec<String> {
    MIXIN_RE
        .captures(text)
        .and_then(|caps| caps.get(2).map(|m| parameter_names(m.as_str())))
        .unwrap_or_default()
}

/// Split a parameter list on top-level commas and keep only the names.
///
/// `$color, $shadow: rgba(0, 0, 0, .5), $rest...` yields
/// `["$color", "$shadow", "$rest"]`.
fn parameter_names(list: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.extend(parameter_name(&list[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }
    params.extend(parameter_name(&list[start..]));
    params
}

fn parameter_name(param: &str) -> Option<String> {
    let name = param.split(':').next()?.trim().trim_end_matches("...");
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// `name($1, $2, ...)` for N parameters, bare `name` for none.
fn mixin_snippet(name: &str, param_count: usize) -> String {
    if param_count == 0 {
        return name.to_string();
    }
    let fields: Vec<String> = (1..=param_count).map(|i| format!("${}", i)).collect();
    format!("{}({})", name, fields.join(", "))
}
