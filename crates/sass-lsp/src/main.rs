//! Sass Language Server - Main entry point
//!
//! Provides LSP support for the indented Sass syntax with:
//! - Completion of properties, values, units, variables and mixins
//! - Workspace-wide symbol index following `@import` / `@use`
//! - Auto-indent after selectors
//! - A user snippet library driven by `sass.tree.*` commands

use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sass_lsp::SassLanguageServer;

#[tokio::main]
async fn main() {
    // Setup logging to stderr (LSP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sass_lsp=info,sass_assist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Sass Language Server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(SassLanguageServer::new)
        .custom_method(
            "sass/didChangeActiveEditor",
            SassLanguageServer::did_change_active_editor,
        )
        .finish();

    Server::new(stdin, stdout, socket).serve(service).await;
}
