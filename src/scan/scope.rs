//! Indentation-based block scope tracking.
//!
//! The indented syntax has no braces, so nesting is read off indentation:
//! a line is nested inside every earlier line with strictly smaller
//! indentation that has not been closed by a dedent in between.

use super::line::{classify, mixin_parameters, Declaration, SourceLine, SymbolKind};
use crate::document::{indentation, Document};

/// An open block on the nesting stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    indent: usize,
}

/// Every declaration in the document, with its nesting depth.
///
/// Nested declarations are returned alongside top-level ones; visibility is
/// decided at cursor time by [`is_in_mixin_block`].
pub fn scan_declarations(doc: &Document) -> Vec<Declaration> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut declarations = Vec::new();

    for (number, text) in doc.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }

        let indent = indentation(text);
        while stack.last().is_some_and(|top| indent <= top.indent) {
            stack.pop();
        }

        if let Some(mut decl) = classify(SourceLine::new(text, number as u32)) {
            decl.scope_depth = stack.len();
            declarations.push(decl);
        }

        stack.push(Frame { indent });
    }

    declarations
}

/// Variables visible from a cursor inside a mixin body.
///
/// Walks outward from `cursor_line` through its enclosing lines. When a
/// mixin declaration encloses the cursor, returns the mixin's parameters
/// followed by the variables declared directly in its body (at the body's
/// indentation) above the cursor. Later declarations shadow earlier ones
/// with the same name. Returns `None` when the cursor is at file scope or
/// only inside ordinary rule blocks.
pub fn is_in_mixin_block(cursor_line: u32, doc: &Document) -> Option<Vec<Declaration>> {
    let lines: Vec<&str> = doc.lines().collect();
    let cursor = cursor_line as usize;
    let cursor_indent = lines.get(cursor).map(|l| indentation(l)).unwrap_or(0);

    let mut bound = cursor_indent;
    let mut mixin_line = None;

    for number in (0..cursor.min(lines.len())).rev() {
        let text = lines[number];
        if text.trim().is_empty() {
            continue;
        }
        let indent = indentation(text);
        if indent >= bound {
            continue;
        }

        bound = indent;
        let is_mixin = classify(SourceLine::new(text, number as u32))
            .is_some_and(|decl| decl.kind == SymbolKind::Mixin);
        if is_mixin {
            mixin_line = Some(number);
            break;
        }
        if indent == 0 {
            break;
        }
    }

    let mixin_line = mixin_line?;
    let mixin_text = lines[mixin_line];

    let body_indent = lines[mixin_line + 1..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| indentation(l))
        .unwrap_or(cursor_indent);

    let mixin_depth = scan_declarations(doc)
        .iter()
        .find(|d| d.declared_at_line as usize == mixin_line)
        .map(|d| d.scope_depth)
        .unwrap_or(0);

    let mut visible: Vec<Declaration> = mixin_parameters(mixin_text)
        .into_iter()
        .map(|name| Declaration {
            insert_text: name.clone(),
            name,
            kind: SymbolKind::Variable,
            detail: mixin_text.trim().to_string(),
            scope_depth: mixin_depth + 1,
            declared_at_line: mixin_line as u32,
        })
        .collect();

    for decl in scan_declarations(doc) {
        let line = decl.declared_at_line as usize;
        if decl.kind != SymbolKind::Variable || line <= mixin_line || line >= cursor {
            continue;
        }
        if indentation(lines[line]) != body_indent {
            continue;
        }
        visible.retain(|existing| existing.name != decl.name);
        visible.push(decl);
    }

    tracing::debug!(
        "Cursor line {} is inside mixin at line {} ({} visible locals)",
        cursor_line,
        mixin_line,
        visible.len()
    );

    Some(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
$global: 1px
@mixin card($pad)
  $radius: 4px
  .title
    $inner: 2px
    color: red
  border-radius: $radius
.plain
  $not-mixin: 3px
  margin: 0
";

    fn doc() -> Document {
        Document::new("/w/card.sass", SOURCE)
    }

    fn names(decls: &[Declaration]) -> Vec<&str> {
        decls.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_scan_records_depths() {
        let decls = scan_declarations(&doc());
        let depths: Vec<(&str, usize)> = decls
            .iter()
            .map(|d| (d.name.as_str(), d.scope_depth))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("$global", 0),
                ("card", 0),
                ("$radius", 1),
                ("$inner", 2),
                ("$not-mixin", 1),
            ]
        );
    }

    #[test]
    fn test_cursor_in_nested_rule_inside_mixin() {
        let visible = is_in_mixin_block(5, &doc()).unwrap();
        assert_eq!(names(&visible), vec!["$pad", "$radius"]);
        assert_eq!(visible[1].declared_at_line, 2);
    }

    #[test]
    fn test_cursor_directly_in_mixin_body() {
        let visible = is_in_mixin_block(6, &doc()).unwrap();
        assert_eq!(names(&visible), vec!["$pad", "$radius"]);
    }

    #[test]
    fn test_cursor_in_plain_rule_is_file_scope() {
        assert!(is_in_mixin_block(9, &doc()).is_none());
    }

    #[test]
    fn test_cursor_at_top_level_is_file_scope() {
        assert!(is_in_mixin_block(0, &doc()).is_none());
        assert!(is_in_mixin_block(7, &doc()).is_none());
    }

    #[test]
    fn test_cursor_past_end_of_document() {
        assert!(is_in_mixin_block(40, &doc()).is_none());
    }

    #[test]
    fn test_redeclared_local_shadows() {
        let doc = Document::new(
            "/w/a.sass",
            "=m\n  $x: 1\n  $y: 2\n  $x: 3\n  width: $x",
        );
        let visible = is_in_mixin_block(4, &doc).unwrap();
        assert_eq!(names(&visible), vec!["$y", "$x"]);
        assert_eq!(visible[1].declared_at_line, 3);
    }
}
