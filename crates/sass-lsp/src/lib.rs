//! Sass Language Server
//!
//! Thin LSP adapter over `sass_assist`: documents are mirrored from the
//! client, completion requests go through the workspace orchestrator, and
//! engine candidates are translated to LSP completion items.

pub mod handlers;
pub mod host;
pub mod server;

pub use server::SassLanguageServer;
