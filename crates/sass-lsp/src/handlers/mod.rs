//! LSP request handlers.

pub mod completion;
pub mod formatting;
pub mod snippets;
