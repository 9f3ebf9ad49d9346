//! Completion handler: engine candidates to LSP completion items.

use tower_lsp::lsp_types::*;

use sass_assist::{word_range, Candidate, CompletionKind, Document, InsertText};

/// Characters that end an `@import` target on the left.
const IMPORT_TARGET_DELIMITERS: &[char] = &[' ', '\t', '\'', '"', ','];

pub fn to_core_position(position: Position) -> sass_assist::Position {
    sass_assist::Position::new(position.line, position.character)
}

/// Convert candidates in engine order. `sort_text` keeps that order in
/// clients that re-sort by label.
pub fn to_completion_items(
    doc: &Document,
    position: Position,
    candidates: Vec<Candidate>,
) -> Vec<CompletionItem> {
    let line = doc.line(position.line).unwrap_or("");

    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let range = replacement_range(line, position, &candidate);
            let (new_text, format) = match candidate.insert_text {
                InsertText::Plain(text) => (text, InsertTextFormat::PLAIN_TEXT),
                InsertText::Snippet(text) => (text, InsertTextFormat::SNIPPET),
            };

            CompletionItem {
                label: candidate.label.clone(),
                kind: Some(completion_item_kind(candidate.kind)),
                detail: candidate.detail,
                text_edit: Some(CompletionTextEdit::Edit(TextEdit { range, new_text })),
                insert_text_format: Some(format),
                filter_text: Some(candidate.label),
                sort_text: Some(format!("{:05}", index)),
                ..Default::default()
            }
        })
        .collect()
}

pub fn completion_item_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Value => CompletionItemKind::VALUE,
        CompletionKind::Unit => CompletionItemKind::UNIT,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Variable => CompletionItemKind::VARIABLE,
        CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        CompletionKind::Snippet => CompletionItemKind::SNIPPET,
        CompletionKind::Class => CompletionItemKind::CLASS,
        CompletionKind::Reference => CompletionItemKind::REFERENCE,
        CompletionKind::File => CompletionItemKind::FILE,
        CompletionKind::Color => CompletionItemKind::COLOR,
    }
}

/// Range the candidate replaces: the word left of the cursor, the whole
/// import target for file candidates, and a typed `&` for candidates that
/// carry their own parent reference.
fn replacement_range(line: &str, position: Position, candidate: &Candidate) -> Range {
    let cursor = position.character;
    let prefix: String = line.chars().take(cursor as usize).collect();

    let start = if candidate.kind == CompletionKind::File {
        prefix
            .rfind(IMPORT_TARGET_DELIMITERS)
            .map(|idx| prefix[..=idx].chars().count() as u32)
            .unwrap_or(cursor)
    } else {
        let mut start = word_range(line, cursor)
            .map(|(start, _)| start)
            .filter(|start| *start <= cursor)
            .unwrap_or(cursor);
        let before = start
            .checked_sub(1)
            .and_then(|idx| prefix.chars().nth(idx as usize));
        if before == Some('&') && candidate.insert_text.as_str().starts_with('&') {
            start -= 1;
        }
        start
    };

    Range {
        start: Position {
            line: position.line,
            character: start,
        },
        end: position,
    }
}
