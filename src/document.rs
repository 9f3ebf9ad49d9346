//! Document state handed in by the host.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zero-based cursor position. `character` counts chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// What kind of buffer a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A stylesheet in the indented syntax (`.sass`)
    Sass,
    /// A brace-syntax stylesheet (`.scss`, `.css`)
    Scss,
    /// Markup with embedded `<style>` blocks (`.vue`, `.html`)
    Markup,
}

impl DocumentKind {
    /// Classify by file extension. Unknown extensions are treated as Sass,
    /// which matches untitled buffers the host tags with the Sass language.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("scss") | Some("css") => DocumentKind::Scss,
            Some("vue") | Some("html") | Some("htm") => DocumentKind::Markup,
            _ => DocumentKind::Sass,
        }
    }

    /// Extension used to resolve bare `@import` names from this document.
    pub fn stylesheet_extension(self) -> &'static str {
        match self {
            DocumentKind::Scss => "scss",
            DocumentKind::Sass | DocumentKind::Markup => "sass",
        }
    }
}

/// Full text of a document plus its absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let kind = DocumentKind::from_path(&path);
        Self {
            path,
            kind,
            text: text.into(),
        }
    }

    /// Get the line at a position.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.text.lines().nth(line as usize)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Text from the start of the cursor's line up to the cursor.
    pub fn line_prefix(&self, position: Position) -> &str {
        let Some(line) = self.line(position.line) else {
            return "";
        };
        let end = line
            .char_indices()
            .nth(position.character as usize)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());
        &line[..end]
    }

    /// The document's file name, e.g. `_buttons.sass`.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory imports are resolved against.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Number of leading whitespace characters; tabs and spaces count alike.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
