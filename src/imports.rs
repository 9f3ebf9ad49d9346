//! Import resolution.
//!
//! Computes the store keys whose records are visible from a document: every
//! `@import` / `@use` target plus the document itself. Targets are not
//! checked for existence; a key nobody scanned just yields no symbols.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::document::DocumentKind;
use crate::store::normalize_path;

/// `@import a, "b"` / `@use 'c' as d` up to the end of the line
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*@(?:import|use)\s+(.+?)\s*;?\s*$").expect("import pattern")
});

/// Store keys in scope for a document, in import order, deduplicated, with
/// the document's own path last.
pub fn resolve_imports(text: &str, document_path: &Path) -> Vec<PathBuf> {
    let directory = document_path.parent().unwrap_or_else(|| Path::new(""));
    let extension = DocumentKind::from_path(document_path).stylesheet_extension();

    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    let own_basename = document_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_default();

    let candidates = import_targets(text)
        .into_iter()
        .flat_map(|target| candidate_files(&target, extension))
        .chain(std::iter::once(own_basename));

    for candidate in candidates {
        let key = normalize_path(&directory.join(candidate));
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    keys
}

/// Raw import targets in document order.
pub fn import_targets(text: &str) -> Vec<String> {
    IMPORT_RE
        .captures_iter(text)
        .flat_map(|caps| split_targets(&caps[1]))
        .filter(|target| is_symbol_source(target))
        .collect()
}

/// Split `a, "b", 'c' as d` into `["a", "b", "c"]`.
fn split_targets(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|piece| {
            let piece = piece.trim();
            let target = match piece.chars().next() {
                Some(quote @ ('"' | '\'')) => piece[1..].split(quote).next().unwrap_or(""),
                _ => piece.split_whitespace().next().unwrap_or(""),
            };
            if target.is_empty() {
                None
            } else {
                Some(target.to_string())
            }
        })
        .collect()
}

/// Plain CSS imports and built-in modules declare no Sass symbols.
fn is_symbol_source(target: &str) -> bool {
    !(target.starts_with("url(")
        || target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("sass:")
        || target.ends_with(".css"))
}

/// Files a target may name. Bare names try both the plain file and the
/// `_partial` form using the importing document's extension.
fn candidate_files(target: &str, extension: &str) -> Vec<PathBuf> {
    let path = Path::new(target);
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Vec::new(),
    };
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    let file_name = if path.extension().is_some() {
        file_name
    } else {
        format!("{}.{}", file_name, extension)
    };

    let mut files = vec![parent.join(&file_name)];
    if !file_name.starts_with('_') {
        files.push(parent.join(format!("_{}", file_name)));
    }
    files
}
