//! Lint Pipeline
//!
//! Loader → language service → table → summary → gate, in that order.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tower_lsp::lsp_types::Url;

use crate::actions::{ActionsOutput, BOLD, UNDERLINE};
use crate::config::{Args, Config};
use crate::error::LintError;
use crate::lsp::StdioLanguageService;
use crate::report::{map_diagnostics, render_table, SeverityCounts};
use crate::validation::LanguageService;
use crate::workspace::load_definition;

/// How a completed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selected severity bucket is empty
    Passed,
    /// The selected severity bucket has diagnostics; the failure was signalled
    GateFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::GateFailed => ExitCode::FAILURE,
        }
    }
}

/// Lint the configured definition file and apply the gate.
///
/// `service` is terminated after validation whether or not validation
/// succeeded.
pub async fn lint<S, W>(
    config: &Config,
    service: &mut S,
    output: &mut ActionsOutput<W>,
) -> Result<Outcome, LintError>
where
    S: LanguageService,
    W: Write,
{
    let name = &config.definition_file;
    let definition = load_definition(&config.workspace, name).await?;
    let document = definition.to_document()?;

    output.info(&format!("{BOLD}ApiDOM lint {name}"))?;

    let validation = service.do_validation(&document).await;
    if let Err(e) = service.terminate().await {
        log::warn!("Failed to terminate language service: {:#}", e);
    }
    let diagnostics = validation.map_err(LintError::Service)?;
    log::info!("{} diagnostics for {}", diagnostics.len(), name);

    if !diagnostics.is_empty() {
        output.info("")?;
        output.info(&format!("{UNDERLINE}{name}"))?;
        output.info(&render_table(&map_diagnostics(&diagnostics)))?;
    }

    let counts = SeverityCounts::from_diagnostics(&diagnostics);
    output.info(&counts.summary_line())?;

    if config.fails_on.is_triggered(&counts) {
        output.set_failed("")?;
        return Ok(Outcome::GateFailed);
    }
    Ok(Outcome::Passed)
}

/// Entry point of the `apidom-lint` binary
pub async fn run() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{:?}", config);

    let root_uri = Url::from_directory_path(&config.workspace).ok();
    let mut service =
        StdioLanguageService::new(config.server_command.clone()).with_root_uri(root_uri);
    let mut output = ActionsOutput::stdout();

    match lint(&config, &mut service, &mut output).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) if e.is_configuration() => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:?}", anyhow::Error::new(e));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--log-level`
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
