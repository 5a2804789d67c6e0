//! The language service seam.
//!
//! Validation itself lives in an external ApiDOM language service. The
//! pipeline only talks to it through [`LanguageService`].

use anyhow::Result;
use tower_lsp::lsp_types::{TextDocumentItem, Url};

use super::diagnostic::Diagnostic;

/// Language id the ApiDOM language service dispatches on
pub const APIDOM_LANGUAGE_ID: &str = "apidom";

/// A text document handed to the language service
#[derive(Debug, Clone, PartialEq)]
pub struct TextDocument {
    pub uri: Url,
    pub language_id: String,
    pub version: i32,
    pub text: String,
}

impl TextDocument {
    pub fn create(uri: Url, language_id: &str, version: i32, text: String) -> Self {
        Self {
            uri,
            language_id: language_id.to_string(),
            version,
            text,
        }
    }

    /// An ApiDOM document at version 0
    pub fn apidom(uri: Url, text: String) -> Self {
        Self::create(uri, APIDOM_LANGUAGE_ID, 0, text)
    }
}

impl From<&TextDocument> for TextDocumentItem {
    fn from(document: &TextDocument) -> Self {
        TextDocumentItem::new(
            document.uri.clone(),
            document.language_id.clone(),
            document.version,
            document.text.clone(),
        )
    }
}

/// An external validator for API documents
#[tower_lsp::async_trait]
pub trait LanguageService: Send {
    /// Validate a document, returning diagnostics in the service's order
    async fn do_validation(&mut self, document: &TextDocument) -> Result<Vec<Diagnostic>>;

    /// Release whatever the service holds. Called once, after validation.
    async fn terminate(&mut self) -> Result<()>;
}
