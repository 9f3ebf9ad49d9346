//! End-to-end completion scenarios against an in-memory workspace.

use pretty_assertions::assert_eq;
use sass_assist::{
    classify, is_in_mixin_block, resolve_imports, CompletionHost, CompletionKind, DetachedHost,
    Document, Position, Settings, SourceLine, SymbolKind, Workspace,
};
use std::path::{Path, PathBuf};

struct FilesHost(Vec<PathBuf>);

impl CompletionHost for FilesHost {
    fn stylesheet_files(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}

fn end_of(text: &str) -> Position {
    let line = text.lines().count().saturating_sub(1) as u32;
    let col = text.lines().last().map(|l| l.chars().count()).unwrap_or(0) as u32;
    Position::new(line, col)
}

#[test]
fn mixin_declaration_becomes_two_field_snippet() {
    let decl = classify(SourceLine::new("@mixin button($color, $size: 10px)", 0)).unwrap();
    assert_eq!(decl.name, "button");
    assert_eq!(decl.kind, SymbolKind::Mixin);
    assert_eq!(decl.insert_text, "button($1, $2)");
}

#[test]
fn mixin_locals_replace_file_scope_variables() {
    let mut ws = Workspace::in_memory(Settings::default());
    ws.scan(&Document::new("/w/_theme.sass", "$theme-color: red\n"));

    let text = "@import theme\n$page: 1px\n=card($pad)\n  $inner: 2px\n  .title\n    margin: ";
    let doc = Document::new("/w/main.sass", text);

    let locals: Vec<String> = is_in_mixin_block(5, &doc)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert!(locals.contains(&"$inner".to_string()));

    let result = ws.complete(&doc, end_of(text), &DetachedHost);
    let variables: Vec<&str> = result
        .iter()
        .filter(|c| c.kind == CompletionKind::Variable)
        .map(|c| c.label.as_str())
        .collect();
    assert!(variables.contains(&"$inner"));
    assert!(!variables.contains(&"$theme-color"));
    assert!(!variables.contains(&"$page"));
}

#[test]
fn file_scope_sees_imported_variables() {
    let mut ws = Workspace::in_memory(Settings::default());
    ws.scan(&Document::new("/w/_theme.sass", "$theme-color: red\n"));

    let text = "@import theme\n.a\n  color: ";
    let result = ws.complete(&Document::new("/w/main.sass", text), end_of(text), &DetachedHost);
    assert!(result.iter().any(|c| c.label == "$theme-color"));
}

#[test]
fn unit_completion_follows_setting() {
    let doc = Document::new("/w/a.sass", "1");

    let mut ws = Workspace::in_memory(Settings::default());
    let result = ws.complete(&doc, Position::new(0, 1), &DetachedHost);
    assert!(result.iter().any(|c| c.kind == CompletionKind::Unit));

    let mut ws = Workspace::in_memory(Settings {
        disable_unit_completion: true,
        ..Settings::default()
    });
    let result = ws.complete(&doc, Position::new(0, 1), &DetachedHost);
    assert!(!result.iter().any(|c| c.kind == CompletionKind::Unit));
}

#[test]
fn import_context_returns_only_file_paths() {
    let host = FilesHost(vec![
        PathBuf::from("/w/main.sass"),
        PathBuf::from("/w/_theme.sass"),
        PathBuf::from("/w/lib/_grid.sass"),
    ]);
    let mut ws = Workspace::in_memory(Settings::default());
    let text = "@import ";
    let result = ws.complete(&Document::new("/w/main.sass", text), end_of(text), &host);

    assert_eq!(
        result.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
        vec!["theme", "lib/grid"]
    );
    assert!(result.iter().all(|c| c.kind == CompletionKind::File));
}

#[test]
fn rescan_after_deletion_drops_symbol() {
    let mut ws = Workspace::in_memory(Settings::default());
    ws.scan(&Document::new("/w/_theme.sass", "$old: 1\n$kept: 2\n"));

    let text = "@import theme\n.a\n  margin: ";
    let doc = Document::new("/w/main.sass", text);
    let before = ws.complete(&doc, end_of(text), &DetachedHost);
    assert!(before.iter().any(|c| c.label == "$old"));

    ws.scan(&Document::new("/w/_theme.sass", "$kept: 2\n"));
    let after = ws.complete(&doc, end_of(text), &DetachedHost);
    assert!(!after.iter().any(|c| c.label == "$old"));
    assert!(after.iter().any(|c| c.label == "$kept"));
}

#[test]
fn focus_change_indexes_the_document_being_left() {
    let mut ws = Workspace::in_memory(Settings::default());
    let mut theme = Document::new("/w/_theme.sass", "");
    ws.focus_changed(Some(theme.clone()));

    theme.text = "=shadow($depth)\n".to_string();
    ws.document_edited(&theme);
    ws.focus_changed(Some(Document::new("/w/main.sass", "@import theme\n")));

    let text = "@import theme\n.a\n  +";
    let result = ws.complete(&Document::new("/w/main.sass", text), end_of(text), &DetachedHost);
    let shadow = result.iter().find(|c| c.label == "shadow").unwrap();
    assert_eq!(shadow.insert_text.as_str(), "shadow($1)");
}

#[test]
fn own_path_is_always_in_scope() {
    let keys = resolve_imports("@import a, b\n", Path::new("/w/x/main.sass"));
    assert_eq!(keys.last().unwrap(), Path::new("/w/x/main.sass"));
}

#[test]
fn markup_outside_style_block_gets_nothing() {
    let text = "<template>\n  <div class=\"card\">\n</template>\n<style lang=\"sass\">\n.";
    let doc = Document::new("/w/App.vue", text);
    let mut ws = Workspace::in_memory(Settings::default());

    assert!(ws.complete(&doc, Position::new(1, 4), &DetachedHost).is_empty());

    let inside = ws.complete(&doc, end_of(text), &DetachedHost);
    assert!(inside.iter().any(|c| c.label == ".card" && c.kind == CompletionKind::Class));
}
