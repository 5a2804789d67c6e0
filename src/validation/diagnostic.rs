//! Diagnostics reported by the language service.

use std::fmt;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{NumberOrString, Range, Url};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// Severities indexed by LSP ordinal minus one
const BY_ORDINAL: [Severity; 4] = [
    Severity::Error,
    Severity::Warning,
    Severity::Information,
    Severity::Hint,
];

impl Severity {
    pub const ALL: [Severity; 4] = BY_ORDINAL;

    /// Classify an LSP severity ordinal.
    ///
    /// Total over its input: anything outside 1..=4, including a missing
    /// severity, is a hint.
    pub fn from_ordinal(ordinal: Option<i32>) -> Self {
        ordinal
            .and_then(|n| usize::try_from(n).ok()?.checked_sub(1))
            .and_then(|idx| BY_ORDINAL.get(idx).copied())
            .unwrap_or(Severity::Hint)
    }

    pub fn ordinal(self) -> i32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
            Severity::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single finding, in the shape the language server publishes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub range: Range,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<NumberOrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        range: Range,
        severity: Option<i32>,
        code: Option<NumberOrString>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            range,
            severity,
            code,
            source: None,
            message: message.into(),
        }
    }

    /// Bucket this diagnostic falls into
    pub fn severity(&self) -> Severity {
        Severity::from_ordinal(self.severity)
    }

    /// Rule identifier as text, empty when the server sent none
    pub fn code_text(&self) -> String {
        match &self.code {
            Some(NumberOrString::Number(n)) => n.to_string(),
            Some(NumberOrString::String(s)) => s.clone(),
            None => String::new(),
        }
    }
}

/// Params of a `textDocument/publishDiagnostics` notification
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublishedDiagnostics {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
}
