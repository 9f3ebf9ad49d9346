//! Host-independent completion candidates.

use serde::{Deserialize, Serialize};

/// Kind of a completion candidate, mirrored onto the host's icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionKind {
    Property,
    Value,
    Unit,
    Function,
    Variable,
    Keyword,
    Snippet,
    Class,
    Reference,
    File,
    Color,
}

/// Text inserted when a candidate is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", content = "text", rename_all = "camelCase")]
pub enum InsertText {
    /// Inserted verbatim
    Plain(String),
    /// Snippet syntax with `$1`, `${2:default}` placeholders
    Snippet(String),
}

impl InsertText {
    pub fn as_str(&self) -> &str {
        match self {
            InsertText::Plain(text) | InsertText::Snippet(text) => text,
        }
    }

    pub fn is_snippet(&self) -> bool {
        matches!(self, InsertText::Snippet(_))
    }
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub insert_text: InsertText,
    pub detail: Option<String>,
    pub kind: CompletionKind,
}

impl Candidate {
    /// Candidate whose insert text equals its label.
    pub fn plain(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: InsertText::Plain(label.clone()),
            label,
            detail: None,
            kind,
        }
    }

    pub fn snippet(
        label: impl Into<String>,
        snippet: impl Into<String>,
        kind: CompletionKind,
    ) -> Self {
        Self {
            label: label.into(),
            insert_text: InsertText::Snippet(snippet.into()),
            detail: None,
            kind,
        }
    }

    pub fn with_insert(mut self, insert: impl Into<String>) -> Self {
        self.insert_text = match self.insert_text {
            InsertText::Plain(_) => InsertText::Plain(insert.into()),
            InsertText::Snippet(_) => InsertText::Snippet(insert.into()),
        };
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
