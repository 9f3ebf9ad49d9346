//! On-type formatting: indentation of the line opened by enter.

use tower_lsp::lsp_types::*;

use sass_assist::{Document, IndentAction};

/// Edits for the line at `position` after a newline was typed.
///
/// `action` is decided from the previous line. With `Indent` the new line
/// gets the previous line's indentation plus one unit.
pub fn on_enter_edits(
    doc: &Document,
    position: Position,
    options: &FormattingOptions,
    action: IndentAction,
) -> Vec<TextEdit> {
    if action != IndentAction::Indent || position.line == 0 {
        return vec![];
    }

    let previous = doc.line(position.line - 1).unwrap_or("");
    let current = doc.line(position.line).unwrap_or("");

    let unit = if options.insert_spaces {
        " ".repeat(options.tab_size as usize)
    } else {
        "\t".to_string()
    };
    let indent: String = previous.chars().take_while(|c| c.is_whitespace()).collect();
    let current_indent = current.chars().take_while(|c| c.is_whitespace()).count() as u32;

    vec![TextEdit {
        range: Range {
            start: Position {
                line: position.line,
                character: 0,
            },
            end: Position {
                line: position.line,
                character: current_indent,
            },
        },
        new_text: format!("{}{}", indent, unit),
    }]
}

/// Text of the line before the newline, as the rule sees it.
pub fn line_before(doc: &Document, position: Position) -> Option<&str> {
    position.line.checked_sub(1).and_then(|line| doc.line(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaces(n: u32) -> FormattingOptions {
        FormattingOptions {
            tab_size: n,
            insert_spaces: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_indent_one_level_deeper() {
        let doc = Document::new("/w/a.sass", ".a\n  .b\n  ");
        let position = Position { line: 2, character: 2 };
        let edits = on_enter_edits(&doc, position, &spaces(2), IndentAction::Indent);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, "    ");
        assert_eq!(edits[0].range.end.character, 2);
    }

    #[test]
    fn test_tabs() {
        let doc = Document::new("/w/a.sass", "=m\n");
        let options = FormattingOptions {
            tab_size: 4,
            insert_spaces: false,
            ..Default::default()
        };
        let position = Position { line: 1, character: 0 };
        let edits = on_enter_edits(&doc, position, &options, IndentAction::Indent);
        assert_eq!(edits[0].new_text, "\t");
    }

    #[test]
    fn test_keep_produces_no_edits() {
        let doc = Document::new("/w/a.sass", ".a\n  color: red\n  ");
        let position = Position { line: 2, character: 2 };
        assert!(on_enter_edits(&doc, position, &spaces(2), IndentAction::Keep).is_empty());
        assert_eq!(line_before(&doc, Position { line: 2, character: 2 }), Some("  color: red"));
    }
}
