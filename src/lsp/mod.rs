//! LSP Client
//!
//! Just enough of the client side of the Language Server Protocol to have a
//! language server validate one document.

pub mod client;
pub mod codec;
pub mod process;

pub use client::LspClient;
pub use process::{ServerCommand, StdioLanguageService};
