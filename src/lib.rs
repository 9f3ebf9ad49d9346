//! Sass Assist - workspace symbol index and completion for the indented
//! Sass syntax
//!
//! Documents are scanned line by line for variable and mixin declarations.
//! The resulting record sets are kept per file in a symbol store, and the
//! completion engine combines them (through each document's imports) with
//! static CSS/Sass tables.
//!
//! ## Flow
//! Document -> Line Classifier -> Scope Tracker -> Symbol Store
//! Cursor -> Context -> Import Closure + Schema -> Candidates
//!
//! ## Quick Start
//!
//! ```rust
//! use sass_assist::{Document, DetachedHost, Position, Settings, Workspace};
//!
//! let mut workspace = Workspace::in_memory(Settings::default());
//! let doc = Document::new("/w/main.sass", "$brand: #c69\n.a\n  color: ");
//! let candidates = workspace.complete(&doc, Position::new(2, 9), &DetachedHost);
//! assert!(candidates.iter().any(|c| c.label == "$brand"));
//! ```

// Core error handling
pub mod error;

// Settings from the host
pub mod config;

// Documents and candidates
pub mod candidate;
pub mod document;

// Indexing: line classifier, scope tracker, store, imports
pub mod imports;
pub mod scan;
pub mod store;

// Static CSS/Sass tables
pub mod schema;

// Completion
pub mod completion;
pub mod host;
pub mod markup;

// Editing rules, snippet library and orchestration
pub mod focus;
pub mod language;
pub mod snippets;
pub mod workspace;

pub use candidate::{Candidate, CompletionKind, InsertText};
pub use completion::{
    complete, complete_in_context, detect_cursor_context, CompletionRequest, CursorContext,
};
pub use config::Settings;
pub use document::{Document, DocumentKind, Position};
pub use error::{HostError, Result, SassError, SnippetError, StoreError};
pub use focus::FocusTracker;
pub use host::{CompletionHost, DetachedHost, WorkspaceHost};
pub use imports::resolve_imports;
pub use language::{on_enter_action, word_range, IndentAction};
pub use scan::{
    classify, is_in_mixin_block, records_for, scan_file, Declaration, SourceLine, SymbolKind,
};
pub use snippets::{ImportFilter, SnippetEdit, SnippetKind, SnippetLibrary, SnippetNode};
pub use store::{JsonFileStore, MemoryStore, RecordSet, SymbolRecord, SymbolStore};
pub use workspace::{BoxedStore, Workspace};
