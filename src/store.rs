//! Symbol store.
//!
//! A key-value mapping from normalized absolute file path to the record set
//! discovered in that file. Record sets are immutable once stored: a scan
//! builds a fresh set and swaps it in, so readers holding an older `Arc`
//! never observe a half-written set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::candidate::{Candidate, CompletionKind, InsertText};
use crate::error::StoreError;
use crate::scan::{Declaration, SymbolKind};

/// Persisted form of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub title: String,
    pub insert: String,
    pub detail: String,
    pub kind: CompletionKind,
    #[serde(rename = "type")]
    pub symbol_type: SymbolKind,
}

impl From<Declaration> for SymbolRecord {
    fn from(decl: Declaration) -> Self {
        let kind = match decl.kind {
            SymbolKind::Mixin => CompletionKind::Function,
            SymbolKind::Variable => CompletionKind::Variable,
        };
        Self {
            title: decl.name,
            insert: decl.insert_text,
            detail: decl.detail,
            kind,
            symbol_type: decl.kind,
        }
    }
}

impl SymbolRecord {
    /// Render as a completion candidate. Mixins insert as snippets.
    pub fn to_candidate(&self) -> Candidate {
        let insert_text = match self.symbol_type {
            SymbolKind::Mixin => InsertText::Snippet(self.insert.clone()),
            SymbolKind::Variable => InsertText::Plain(self.insert.clone()),
        };
        Candidate {
            label: self.title.clone(),
            insert_text,
            detail: Some(self.detail.clone()),
            kind: self.kind,
        }
    }
}

/// Symbols of one file, keyed by symbol name.
pub type RecordSet = BTreeMap<String, SymbolRecord>;

/// Get/set-by-key storage for record sets.
///
/// Implementations normalize keys with [`normalize_path`]. There are no
/// cross-key guarantees: setting one path never touches another.
pub trait SymbolStore {
    /// Record set for a path; `None` when the path was never scanned.
    fn get(&self, path: &Path) -> Option<Arc<RecordSet>>;

    /// Replace the record set for a path.
    fn set(&mut self, path: &Path, records: RecordSet) -> Result<(), StoreError>;
}

/// Lexically normalize a path: drop `.` components and fold `..` into
/// their parent. Does not touch the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Store that lives for the editor session only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: HashMap<PathBuf, Arc<RecordSet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl SymbolStore for MemoryStore {
    fn get(&self, path: &Path) -> Option<Arc<RecordSet>> {
        self.index.get(&normalize_path(path)).cloned()
    }

    fn set(&mut self, path: &Path, records: RecordSet) -> Result<(), StoreError> {
        self.index.insert(normalize_path(path), Arc::new(records));
        Ok(())
    }
}

/// Store persisted as a single JSON document, rewritten whenever a `set`
/// changes a file's records.
#[derive(Debug)]
pub struct JsonFileStore {
    file: PathBuf,
    memory: MemoryStore,
}

impl JsonFileStore {
    /// Open a store file, starting empty when it does not exist yet.
    pub fn open(file: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = file.into();
        let mut memory = MemoryStore::new();

        if file.exists() {
            let bytes = std::fs::read(&file)?;
            let index: BTreeMap<PathBuf, RecordSet> = serde_json::from_slice(&bytes)?;
            for (path, records) in index {
                memory.set(&path, records)?;
            }
            tracing::info!(
                "Loaded symbol index for {} files from {}",
                memory.len(),
                file.display()
            );
        }

        Ok(Self { file, memory })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn persist(&self) -> Result<(), StoreError> {
        let index: BTreeMap<&PathBuf, &RecordSet> = self
            .memory
            .index
            .iter()
            .map(|(path, records)| (path, records.as_ref()))
            .collect();

        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.file, serde_json::to_vec_pretty(&index)?)?;
        Ok(())
    }
}

impl SymbolStore for JsonFileStore {
    fn get(&self, path: &Path) -> Option<Arc<RecordSet>> {
        self.memory.get(path)
    }

    fn set(&mut self, path: &Path, records: RecordSet) -> Result<(), StoreError> {
        if self.memory.get(path).is_some_and(|current| *current == records) {
            tracing::trace!("Symbols unchanged for {}", path.display());
            return Ok(());
        }
        self.memory.set(path, records)?;
        self.persist()
    }
}
