//! Services the editor host provides to the completion engine.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::HostError;

/// Companion extension that expands `?` abbreviations.
pub const ABBREVIATIONS_EXTENSION: &str = "syler.sass-next";

/// Command the abbreviations extension registers.
pub const ABBREVIATIONS_COMMAND: &str = "sass.abbreviations";

/// Extensions of files offered after `@import`.
pub const STYLESHEET_EXTENSIONS: &[&str] = &["sass", "scss", "css"];

/// Directories never descended into when listing workspace files.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "dist", "bower_components"];

/// Host capabilities consulted during completion.
pub trait CompletionHost {
    /// Whether an extension with this identifier is installed.
    fn has_extension(&self, _id: &str) -> bool {
        false
    }

    /// Run a host command without waiting for its result.
    fn execute_command(&self, command: &str) -> Result<(), HostError> {
        Err(HostError::CommandFailed {
            command: command.to_string(),
            message: "host does not run commands".to_string(),
        })
    }

    /// Absolute paths of the stylesheets in the workspace.
    fn stylesheet_files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Host without extensions, commands or a workspace.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl CompletionHost for DetachedHost {}

/// Host backed by a workspace folder on disk.
#[derive(Debug, Clone)]
pub struct WorkspaceHost {
    root: PathBuf,
}

impl WorkspaceHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CompletionHost for WorkspaceHost {
    fn stylesheet_files(&self) -> Vec<PathBuf> {
        list_stylesheets(&self.root)
    }
}

/// Walk a workspace folder for stylesheets, skipping hidden and vendor
/// directories. Unreadable entries are skipped.
pub fn list_stylesheets(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable workspace entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| STYLESHEET_EXTENSIONS.contains(&e))
        })
        .collect();

    files.sort();
    files
}
