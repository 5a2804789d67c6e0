//! ApiDOM Lint Action
//!
//! Lints an API definition with an external ApiDOM language service and
//! gates a CI job on the severity of the reported diagnostics.
//!
//! This library provides:
//! - Definition loading from the Actions workspace
//! - A language service client speaking LSP over stdio
//! - Diagnostic tables and severity summaries
//! - The `failsOn` gate and GitHub Actions output

pub mod actions;
pub mod config;
pub mod error;
pub mod gate;
pub mod lsp;
pub mod report;
pub mod runner;
pub mod validation;
pub mod workspace;

// Re-exports for clean public API
pub use config::Config;
pub use error::LintError;
pub use gate::FailsOn;
pub use runner::{lint, Outcome};
pub use validation::{Diagnostic, LanguageService, Severity, TextDocument};
