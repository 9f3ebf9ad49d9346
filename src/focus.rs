//! Focus-change scanning.
//!
//! When the editor moves focus between documents, the document being left
//! is scanned (it may have been edited) and then the document being
//! entered. Scans run synchronously in the focus-change handler.

use std::path::Path;

use crate::document::Document;
use crate::scan::scan_file;
use crate::store::SymbolStore;

/// Tracks the last focused document.
#[derive(Debug, Default)]
pub struct FocusTracker {
    last_focused: Option<Document>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_focused(&self) -> Option<&Document> {
        self.last_focused.as_ref()
    }

    /// Handle a focus change. `None` means focus left all documents; the
    /// last focused document is kept so it is scanned on the next change.
    pub fn focus_changed(&mut self, next: Option<Document>, store: &mut dyn SymbolStore) {
        if let Some(previous) = &self.last_focused {
            scan_file(previous, store);
        }

        if let Some(next) = next {
            tracing::debug!("Focus moved to {}", next.path.display());
            scan_file(&next, store);
            self.last_focused = Some(next);
        }
    }

    /// Keep the tracked document's text current with edits.
    pub fn update_text(&mut self, path: &Path, text: &str) {
        if let Some(doc) = self.last_focused.as_mut().filter(|d| d.path == path) {
            doc.text = text.to_string();
        }
    }

    /// Forget a closed document.
    pub fn forget(&mut self, path: &Path) {
        if self.last_focused.as_ref().is_some_and(|d| d.path == path) {
            self.last_focused = None;
        }
    }
}
