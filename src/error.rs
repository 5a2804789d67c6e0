//! Error taxonomy for a lint run.
//!
//! A failed gate is not an error; see [`crate::runner::Outcome`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    /// The `failsOn` selector is not one of 1, 2, 3 or 4.
    #[error("Invalid failsOn value: {value}")]
    InvalidFailsOn { value: String },

    #[error("language server command is empty")]
    InvalidServerCommand,

    #[error("failed to read definition file {}", path.display())]
    ReadDefinition {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot build a file URI for {}", path.display())]
    InvalidDocumentUri { path: PathBuf },

    #[error("language service failed: {0:#}")]
    Service(anyhow::Error),

    #[error("failed to write report")]
    Output(#[from] io::Error),
}

impl LintError {
    /// Configuration errors are reported bare, without the error chain.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LintError::InvalidFailsOn { .. } | LintError::InvalidServerCommand
        )
    }
}
