//! Configuration management for the lint action.
//!
//! Handles:
//! - Command-line argument parsing (positional action inputs)
//! - Environment fallbacks for local runs
//! - Validation of the `failsOn` selector

use clap::Parser;
use std::path::PathBuf;

use crate::error::LintError;
use crate::gate::FailsOn;
use crate::lsp::ServerCommand;

/// Workspace mount point inside a GitHub Actions container
pub const DEFAULT_WORKSPACE: &str = "/github/workspace";

/// Command used to start the ApiDOM language server
pub const DEFAULT_SERVER_COMMAND: &str = "apidom-language-server --stdio";

/// Command-line arguments for the lint action
#[derive(Debug, Parser)]
#[command(name = "apidom-lint")]
#[command(about = "Lint an API definition with the ApiDOM language service")]
#[command(version)]
pub struct Args {
    /// Definition file, relative to the workspace root
    pub definition_file: String,

    /// Severity bucket that fails the job: 1=error, 2=warning, 3=information, 4=hint
    #[arg(allow_hyphen_values = true)]
    pub fails_on: String,

    /// Workspace root the definition file is resolved against
    #[arg(long, env = "APIDOM_LINT_WORKSPACE", default_value = DEFAULT_WORKSPACE)]
    pub workspace: PathBuf,

    /// Language server command line, split on whitespace
    #[arg(long, env = "APIDOM_LS_COMMAND", default_value = DEFAULT_SERVER_COMMAND)]
    pub server_command: String,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Definition file exactly as given on the command line
    pub definition_file: String,
    /// Gate threshold
    pub fails_on: FailsOn,
    /// Absolute workspace root
    pub workspace: PathBuf,
    /// Language server to spawn
    pub server_command: ServerCommand,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self, LintError> {
        // The selector is checked first so nothing else runs on a bad value
        let fails_on: FailsOn = args.fails_on.parse()?;
        let server_command = ServerCommand::parse(&args.server_command)?;
        let workspace = std::path::absolute(&args.workspace).unwrap_or(args.workspace);

        Ok(Config {
            definition_file: args.definition_file,
            fails_on,
            workspace,
            server_command,
            log_level: args.log_level,
        })
    }
}
