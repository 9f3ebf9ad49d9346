//! Per-workspace orchestration.
//!
//! Owns the symbol store, the current settings and the focus tracker, and
//! routes editor events to the scanner and the completion engine.

use crate::candidate::Candidate;
use crate::completion::{complete_in_context, CompletionRequest};
use crate::config::Settings;
use crate::document::{Document, Position};
use crate::error::Result;
use crate::focus::FocusTracker;
use crate::host::CompletionHost;
use crate::language::{on_enter_action, IndentAction};
use crate::scan::scan_file;
use crate::store::{JsonFileStore, MemoryStore, SymbolStore};

/// Store handle shared with async hosts.
pub type BoxedStore = Box<dyn SymbolStore + Send + Sync>;

pub struct Workspace {
    store: BoxedStore,
    settings: Settings,
    focus: FocusTracker,
}

impl Workspace {
    pub fn new(store: BoxedStore, settings: Settings) -> Self {
        Self {
            store,
            settings,
            focus: FocusTracker::new(),
        }
    }

    /// Workspace with a session-only store.
    pub fn in_memory(settings: Settings) -> Self {
        Self::new(Box::new(MemoryStore::new()), settings)
    }

    /// Workspace whose store is chosen by `settings.storage_path`.
    pub fn open(settings: Settings) -> Result<Self> {
        let store = open_store(&settings)?;
        Ok(Self::new(store, settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply new settings. A changed storage path reopens the store; if
    /// that fails the current store is kept.
    pub fn update_settings(&mut self, settings: Settings) {
        if settings.storage_path != self.settings.storage_path {
            match open_store(&settings) {
                Ok(store) => self.store = store,
                Err(e) => tracing::warn!("Keeping current symbol store: {}", e),
            }
        }
        self.settings = settings;
    }

    pub fn store(&self) -> &dyn SymbolStore {
        self.store.as_ref()
    }

    /// Rescan a document into the store.
    pub fn scan(&mut self, doc: &Document) {
        scan_file(doc, self.store.as_mut());
    }

    pub fn focus_changed(&mut self, next: Option<Document>) {
        self.focus.focus_changed(next, self.store.as_mut());
    }

    pub fn document_edited(&mut self, doc: &Document) {
        self.focus.update_text(&doc.path, &doc.text);
    }

    /// Scan a closing document one last time and stop tracking it.
    pub fn document_closed(&mut self, doc: &Document) {
        self.scan(doc);
        self.focus.forget(&doc.path);
    }

    /// Completion at a position. In the general context the document is
    /// rescanned first so its own latest declarations are visible.
    pub fn complete(
        &mut self,
        doc: &Document,
        position: Position,
        host: &dyn CompletionHost,
    ) -> Vec<Candidate> {
        let settings = self.settings.clone();
        let request = CompletionRequest::new(doc, position, &settings);
        let context = request.context(host);

        if context.is_general() {
            self.scan(doc);
        }

        let candidates = complete_in_context(&context, &request, self.store.as_ref(), host);
        tracing::debug!(
            "Completion at {}:{}:{} -> {} candidates",
            doc.path.display(),
            position.line,
            position.character,
            candidates.len()
        );
        candidates
    }

    pub fn on_enter(&self, before_text: &str) -> IndentAction {
        on_enter_action(before_text, &self.settings)
    }
}

fn open_store(settings: &Settings) -> Result<BoxedStore> {
    let store: BoxedStore = match &settings.storage_path {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };
    Ok(store)
}
