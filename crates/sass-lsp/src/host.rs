//! Editor host services over LSP.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::Client;

use sass_assist::host::list_stylesheets;
use sass_assist::{CompletionHost, HostError};

/// Asks the client to run one of its own commands.
pub enum ExecuteClientCommand {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteClientCommandParams {
    pub command: String,
}

impl Notification for ExecuteClientCommand {
    type Params = ExecuteClientCommandParams;
    const METHOD: &'static str = "sass/executeClientCommand";
}

/// Host facts gathered at initialization.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Workspace folders, searched for `@import` targets
    pub roots: Vec<PathBuf>,
    /// Client extensions reported in `initializationOptions.extensions`
    pub extensions: Vec<String>,
}

/// [`CompletionHost`] backed by an LSP client.
pub struct LspHost {
    client: Option<Client>,
    state: HostState,
}

impl LspHost {
    pub fn new(client: Client, state: HostState) -> Self {
        Self {
            client: Some(client),
            state,
        }
    }

    /// Host with no client to send commands to.
    pub fn detached(state: HostState) -> Self {
        Self { client: None, state }
    }
}

impl CompletionHost for LspHost {
    fn has_extension(&self, id: &str) -> bool {
        self.state.extensions.iter().any(|e| e.eq_ignore_ascii_case(id))
    }

    /// Sends the command to the client without waiting for it to run.
    fn execute_command(&self, command: &str) -> Result<(), HostError> {
        let failed = |message: &str| HostError::CommandFailed {
            command: command.to_string(),
            message: message.to_string(),
        };

        let client = self.client.clone().ok_or_else(|| failed("no client connected"))?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| failed(&e.to_string()))?;

        let params = ExecuteClientCommandParams {
            command: command.to_string(),
        };
        runtime.spawn(async move {
            client.send_notification::<ExecuteClientCommand>(params).await;
        });
        Ok(())
    }

    fn stylesheet_files(&self) -> Vec<PathBuf> {
        self.state
            .roots
            .iter()
            .flat_map(|root| list_stylesheets(root))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sass_assist::host::{ABBREVIATIONS_COMMAND, ABBREVIATIONS_EXTENSION};
    use tempfile::TempDir;

    #[test]
    fn test_extensions_match_case_insensitively() {
        let host = LspHost::detached(HostState {
            extensions: vec!["Syler.Sass-Next".to_string()],
            ..HostState::default()
        });
        assert!(host.has_extension(ABBREVIATIONS_EXTENSION));
        assert!(host.execute_command(ABBREVIATIONS_COMMAND).is_err());
    }

    #[test]
    fn test_stylesheets_from_every_root() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        std::fs::write(a.path().join("one.sass"), "").unwrap();
        std::fs::write(b.path().join("two.scss"), "").unwrap();

        let host = LspHost::detached(HostState {
            roots: vec![a.path().to_path_buf(), b.path().to_path_buf()],
            ..HostState::default()
        });
        assert_eq!(host.stylesheet_files().len(), 2);
    }
}
