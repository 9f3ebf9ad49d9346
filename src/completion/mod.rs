//! Completion engine.
//!
//! A pure function of document, cursor, settings, symbol store and host:
//! classify the cursor context, then gather candidate groups from the
//! schema tables, the mixin scope at the cursor and the symbol records of
//! the import closure.

mod context;

pub use context::{detect_cursor_context, CursorContext};

use std::collections::HashSet;
use std::path::Path;

use crate::candidate::{Candidate, CompletionKind};
use crate::config::Settings;
use crate::document::{Document, Position};
use crate::host::{CompletionHost, ABBREVIATIONS_COMMAND, ABBREVIATIONS_EXTENSION};
use crate::imports::resolve_imports;
use crate::markup::class_and_id_completions;
use crate::scan::{is_in_mixin_block, SymbolKind};
use crate::schema;
use crate::store::{SymbolRecord, SymbolStore};

/// Everything a completion request needs from the editor.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub document: &'a Document,
    pub position: Position,
    pub settings: &'a Settings,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(document: &'a Document, position: Position, settings: &'a Settings) -> Self {
        Self {
            document,
            position,
            settings,
        }
    }

    /// Classify the cursor for this request.
    pub fn context(&self, host: &dyn CompletionHost) -> CursorContext {
        detect_cursor_context(
            self.document,
            self.position,
            self.settings,
            host.has_extension(ABBREVIATIONS_EXTENSION),
        )
    }
}

/// Completion candidates at the request's cursor.
pub fn complete(
    request: &CompletionRequest<'_>,
    store: &dyn SymbolStore,
    host: &dyn CompletionHost,
) -> Vec<Candidate> {
    let context = request.context(host);
    complete_in_context(&context, request, store, host)
}

/// Completion candidates for an already classified context.
pub fn complete_in_context(
    context: &CursorContext,
    request: &CompletionRequest<'_>,
    store: &dyn SymbolStore,
    host: &dyn CompletionHost,
) -> Vec<Candidate> {
    match context {
        CursorContext::OutsideStyleBlock | CursorContext::Path => Vec::new(),
        CursorContext::Abbreviation => {
            if let Err(e) = host.execute_command(ABBREVIATIONS_COMMAND) {
                tracing::warn!("Abbreviation expansion failed: {}", e);
            }
            Vec::new()
        }
        CursorContext::ImportPath { partial } => {
            import_path_completions(request.document, partial, host)
        }
        CursorContext::PseudoSelector => schema::pseudo_completions(request.settings.and_stared),
        CursorContext::Comment => schema::comment_completions(),
        CursorContext::Value {
            property,
            prefix,
            number,
        } => {
            let values = property
                .as_deref()
                .and_then(schema::property)
                .map(|p| schema::value_completions(p, prefix))
                .unwrap_or_default();
            let variables = match is_in_mixin_block(request.position.line, request.document) {
                Some(locals) => locals
                    .into_iter()
                    .map(|decl| SymbolRecord::from(decl).to_candidate())
                    .collect(),
                None => imported_symbols(request.document, store, SymbolKind::Variable),
            };
            let groups = CandidateGroups {
                values,
                functions: schema::function_completions(),
                units: units(number.as_deref()),
                variables,
                ..CandidateGroups::default()
            };
            groups.concat()
        }
        CursorContext::PropertyOrSelector { word, number } => {
            let groups = CandidateGroups {
                properties: schema::property_completions(word),
                units: units(number.as_deref()),
                variables: imported_symbols(request.document, store, SymbolKind::Mixin),
                at_rules: schema::at_rule_completions(),
                classes_and_ids: class_and_id_completions(request.document),
                ..CandidateGroups::default()
            };
            groups.concat()
        }
    }
}

/// Candidate groups of the general context, concatenated in a fixed order.
/// Duplicates across groups are kept.
#[derive(Debug, Default)]
struct CandidateGroups {
    properties: Vec<Candidate>,
    values: Vec<Candidate>,
    functions: Vec<Candidate>,
    units: Vec<Candidate>,
    variables: Vec<Candidate>,
    at_rules: Vec<Candidate>,
    classes_and_ids: Vec<Candidate>,
}

impl CandidateGroups {
    fn concat(self) -> Vec<Candidate> {
        [
            self.properties,
            self.values,
            self.functions,
            self.units,
            self.variables,
            self.at_rules,
            self.classes_and_ids,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn units(number: Option<&str>) -> Vec<Candidate> {
    number.map(schema::unit_completions).unwrap_or_default()
}

/// Records of one kind from every file in the document's import closure.
/// Keys nobody has scanned contribute nothing.
fn imported_symbols(doc: &Document, store: &dyn SymbolStore, kind: SymbolKind) -> Vec<Candidate> {
    resolve_imports(&doc.text, &doc.path)
        .iter()
        .filter_map(|key| store.get(key))
        .flat_map(|records| {
            records
                .values()
                .filter(|record| record.symbol_type == kind)
                .map(SymbolRecord::to_candidate)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Workspace stylesheets as `@import` targets relative to the document,
/// without extension or partial underscore.
fn import_path_completions(
    doc: &Document,
    partial: &str,
    host: &dyn CompletionHost,
) -> Vec<Candidate> {
    let directory = doc.directory();
    let partial = partial.trim_start_matches("./");
    let mut seen = HashSet::new();

    host.stylesheet_files()
        .into_iter()
        .filter(|file| *file != doc.path)
        .filter_map(|file| {
            let relative = pathdiff::diff_paths(&file, directory)?;
            let target = import_target(&relative)?;
            Some((target, relative))
        })
        .filter(|(target, _)| target.starts_with(partial))
        .filter(|(target, _)| seen.insert(target.clone()))
        .map(|(target, relative)| {
            Candidate::plain(target, CompletionKind::File)
                .with_detail(relative.to_string_lossy().replace('\\', "/"))
        })
        .collect()
}

/// `../base/_reset.sass` -> `../base/reset`
fn import_target(relative: &Path) -> Option<String> {
    let stem = relative.file_stem()?.to_string_lossy();
    let stem = stem.strip_prefix('_').unwrap_or(&stem);
    let target = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(stem),
        _ => stem.into(),
    };
    Some(target.to_string_lossy().replace('\\', "/"))
}
