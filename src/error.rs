//! Error handling for the Sass assist core
//!
//! Errors only surface at the edges (persisting the symbol store, loading the
//! snippet library, talking to the host). The completion path never returns
//! them; it logs and degrades to fewer candidates.

use thiserror::Error;

/// Main error type for the core
#[derive(Error, Debug)]
pub enum SassError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Snippet library error: {0}")]
    Snippet(#[from] SnippetError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Schema error: {0}")]
    Schema(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a persisted symbol store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from snippet library operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SnippetError {
    #[error("No snippet node at path '{0}'")]
    NotFound(String),

    #[error("'{0}' is not a folder")]
    NotAFolder(String),

    #[error("A node named '{name}' already exists in '{parent}'")]
    Duplicate { name: String, parent: String },

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Cannot paste '{0}' into itself")]
    PasteIntoSelf(String),
}

/// Errors reported by the editor host
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Extension '{0}' is not installed")]
    MissingExtension(String),
}

pub type Result<T> = std::result::Result<T, SassError>;
