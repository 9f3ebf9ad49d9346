//! LSP Server implementation for the indented Sass syntax.

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use sass_assist::{Document, Settings, SnippetLibrary, Workspace};

use crate::handlers;
use crate::host::{HostState, LspHost};

/// Options a client may pass in `initializationOptions`, next to the
/// settings themselves.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InitializationOptions {
    extensions: Vec<String>,
    snippets_path: Option<PathBuf>,
}

/// Parameters of the `sass/didChangeActiveEditor` notification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEditorParams {
    /// `None` when no editor has focus
    pub uri: Option<Url>,
}

/// Sass Language Server state.
pub struct SassLanguageServer {
    /// LSP client for sending notifications
    client: Client,
    /// Open documents
    documents: Arc<RwLock<HashMap<Url, Document>>>,
    /// Symbol index, settings and focus tracking
    workspace: Arc<RwLock<Workspace>>,
    /// User snippet library and where it is saved
    snippets: Arc<RwLock<(SnippetLibrary, Option<PathBuf>)>>,
    /// Workspace roots and client extensions
    host: Arc<RwLock<HostState>>,
}

impl SassLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            workspace: Arc::new(RwLock::new(Workspace::in_memory(Settings::default()))),
            snippets: Arc::new(RwLock::new((SnippetLibrary::new(), None))),
            host: Arc::new(RwLock::new(HostState::default())),
        }
    }

    /// Get a document by URL.
    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.read().await.get(uri).cloned()
    }

    async fn completion_host(&self) -> LspHost {
        LspHost::new(self.client.clone(), self.host.read().await.clone())
    }

    /// Open document, or the file on disk.
    async fn resolve_document(&self, uri: &Url) -> Option<Document> {
        if let Some(doc) = self.get_document(uri).await {
            return Some(doc);
        }
        let path = uri.to_file_path().ok()?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(Document::new(path, text)),
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn store_document(&self, uri: &Url, text: String) -> Document {
        let doc = Document::new(document_path(uri), text);
        self.documents.write().await.insert(uri.clone(), doc.clone());
        doc
    }

    /// Handle `sass/didChangeActiveEditor`: scan the document being left,
    /// then the one entered.
    pub async fn did_change_active_editor(&self, params: ActiveEditorParams) {
        let next = match &params.uri {
            Some(uri) => self.get_document(uri).await,
            None => None,
        };
        tracing::debug!("Active editor changed: {:?}", params.uri);
        self.workspace.write().await.focus_changed(next);
    }

    async fn save_snippets(&self) {
        let snippets = self.snippets.read().await;
        let (library, file) = &*snippets;
        if let Some(file) = file {
            if let Err(e) = library.save(file) {
                tracing::warn!("Failed to save snippet library to {}: {}", file.display(), e);
            }
        }
    }
}

/// Local path of a document URL; non-file URLs keep their path component.
fn document_path(uri: &Url) -> PathBuf {
    uri.to_file_path().unwrap_or_else(|_| PathBuf::from(uri.path()))
}

fn load_snippets(file: &Path) -> anyhow::Result<SnippetLibrary> {
    SnippetLibrary::load(file)
        .with_context(|| format!("loading snippet library {}", file.display()))
}

fn workspace_roots(params: &InitializeParams) -> Vec<PathBuf> {
    let folders = params.workspace_folders.iter().flatten().map(|f| &f.uri);
    #[allow(deprecated)]
    let root = params.root_uri.iter();
    let mut roots: Vec<PathBuf> = folders
        .chain(root)
        .filter_map(|uri| uri.to_file_path().ok())
        .collect();
    roots.sort();
    roots.dedup();
    roots
}

#[tower_lsp::async_trait]
impl LanguageServer for SassLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("Initializing Sass Language Server");

        let raw_options = params.initialization_options.clone().unwrap_or(Value::Null);
        let options: InitializationOptions =
            serde_json::from_value(raw_options.clone()).unwrap_or_default();
        let settings = Settings::from_json(&raw_options).unwrap_or_default();

        let workspace = Workspace::open(settings.clone()).unwrap_or_else(|e| {
            tracing::warn!("Falling back to in-memory symbol index: {}", e);
            Workspace::in_memory(settings)
        });
        *self.workspace.write().await = workspace;

        if let Some(file) = options.snippets_path {
            let library = load_snippets(&file).unwrap_or_else(|e| {
                tracing::warn!("{:#}", e);
                SnippetLibrary::new()
            });
            *self.snippets.write().await = (library, Some(file));
        }

        *self.host.write().await = HostState {
            roots: workspace_roots(&params),
            extensions: options.extensions,
        };

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                        ..Default::default()
                    },
                )),

                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(
                        [
                            ".", "@", "/", "?", "&", "$", "+", "0", "1", "2", "3", "4", "5", "6",
                            "7", "8", "9",
                        ]
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                    ),
                    ..Default::default()
                }),

                // Auto-indent after selectors
                document_on_type_formatting_provider: Some(DocumentOnTypeFormattingOptions {
                    first_trigger_character: "\n".to_string(),
                    more_trigger_character: None,
                }),

                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: handlers::snippets::COMMANDS.iter().map(|c| c.to_string()).collect(),
                    ..Default::default()
                }),

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "sass-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("Sass Language Server initialized");
        self.client
            .log_message(MessageType::INFO, "Sass Language Server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down Sass Language Server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        tracing::debug!("Document opened: {}", params.text_document.uri);
        let doc = self
            .store_document(&params.text_document.uri, params.text_document.text)
            .await;
        self.workspace.write().await.focus_changed(Some(doc));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        tracing::debug!("Document changed: {}", params.text_document.uri);

        if let Some(doc) = self.get_document(&params.text_document.uri).await {
            let mut text = doc.text;
            for change in params.content_changes {
                if let Some(range) = change.range {
                    let start_offset = offset_from_position(&text, range.start);
                    let end_offset = offset_from_position(&text, range.end);
                    text.replace_range(start_offset..end_offset, &change.text);
                } else {
                    text = change.text;
                }
            }
            let doc = self.store_document(&params.text_document.uri, text).await;
            self.workspace.write().await.document_edited(&doc);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(doc) = self.get_document(&params.text_document.uri).await {
            self.workspace.write().await.scan(&doc);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        tracing::debug!("Document closed: {}", params.text_document.uri);
        let removed = self.documents.write().await.remove(&params.text_document.uri);
        if let Some(doc) = removed {
            self.workspace.write().await.document_closed(&doc);
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match Settings::from_json(&params.settings) {
            Some(settings) => {
                tracing::info!("Settings updated: {:?}", settings);
                self.workspace.write().await.update_settings(settings);
            }
            None => tracing::debug!("Ignoring configuration change without sass settings"),
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        tracing::debug!(
            "Completion request: uri={}, line={}, char={}",
            uri,
            position.line,
            position.character
        );

        let Some(doc) = self.get_document(uri).await else {
            tracing::warn!("No document found for completion request");
            return Ok(None);
        };

        let host = self.completion_host().await;
        let candidates = self.workspace.write().await.complete(
            &doc,
            handlers::completion::to_core_position(position),
            &host,
        );
        let items = handlers::completion::to_completion_items(&doc, position, candidates);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn on_type_formatting(
        &self,
        params: DocumentOnTypeFormattingParams,
    ) -> Result<Option<Vec<TextEdit>>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(doc) = self.get_document(uri).await else {
            return Ok(None);
        };
        let Some(before) = handlers::formatting::line_before(&doc, position) else {
            return Ok(None);
        };

        let action = self.workspace.read().await.on_enter(before);
        let edits = handlers::formatting::on_enter_edits(&doc, position, &params.options, action);
        Ok(if edits.is_empty() { None } else { Some(edits) })
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        let uri = params
            .arguments
            .first()
            .and_then(|arg| arg.get("uri"))
            .and_then(|uri| serde_json::from_value::<Url>(uri.clone()).ok());
        let resolved = match &uri {
            Some(uri) => self.resolve_document(uri).await,
            None => None,
        };

        let outcome = {
            let mut snippets = self.snippets.write().await;
            handlers::snippets::execute(
                &mut snippets.0,
                &params.command,
                params.arguments,
                |_| resolved,
            )
        };

        match outcome {
            Ok(outcome) => {
                if outcome.modified {
                    self.save_snippets().await;
                }
                Ok(Some(outcome.result))
            }
            Err(e) => {
                tracing::warn!("Command {} failed: {}", params.command, e);
                Err(Error::invalid_params(e.to_string()))
            }
        }
    }
}

/// Convert LSP position to byte offset in text.
fn offset_from_position(text: &str, position: Position) -> usize {
    let mut offset = 0;
    for (line_num, line) in text.split_inclusive('\n').enumerate() {
        if line_num == position.line as usize {
            offset += line
                .chars()
                .take_while(|c| *c != '\n' && *c != '\r')
                .take(position.character as usize)
                .map(|c| c.len_utf8())
                .sum::<usize>();
            return offset;
        }
        offset += line.len();
    }
    offset
}
