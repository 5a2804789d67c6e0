//! Language service backed by a language server child process.

use std::fmt;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tower_lsp::lsp_types::Url;

use super::client::LspClient;
use crate::error::LintError;
use crate::validation::{Diagnostic, LanguageService, TextDocument};

/// Program and arguments used to start a language server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    program: String,
    args: Vec<String>,
}

impl ServerCommand {
    /// Split a command line on whitespace
    pub fn parse(command_line: &str) -> Result<Self, LintError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(LintError::InvalidServerCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

struct Session {
    child: Child,
    client: LspClient<BufReader<ChildStdout>, ChildStdin>,
}

/// A [`LanguageService`] that spawns a language server and talks LSP over stdio.
///
/// The server is started on the first validation, so a run that never gets
/// that far never spawns anything.
pub struct StdioLanguageService {
    command: ServerCommand,
    root_uri: Option<Url>,
    session: Option<Session>,
}

impl StdioLanguageService {
    pub fn new(command: ServerCommand) -> Self {
        Self {
            command,
            root_uri: None,
            session: None,
        }
    }

    /// Workspace root advertised in `initialize`
    pub fn with_root_uri(mut self, root_uri: Option<Url>) -> Self {
        self.root_uri = root_uri;
        self
    }

    async fn start(&mut self) -> Result<&mut Session> {
        if self.session.is_none() {
            log::info!("Starting language server: {}", self.command);
            let mut child = Command::new(&self.command.program)
                .args(&self.command.args)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .kill_on_drop(true)
                .spawn()
                .with_context(|| format!("failed to spawn `{}`", self.command))?;

            let stdin = child.stdin.take().context("language server stdin unavailable")?;
            let stdout = child
                .stdout
                .take()
                .context("language server stdout unavailable")?;

            let mut client = LspClient::new(BufReader::new(stdout), stdin);
            client.initialize(self.root_uri.as_ref()).await?;
            self.session = Some(Session { child, client });
        }

        self.session
            .as_mut()
            .context("language server session missing after start")
    }
}

#[tower_lsp::async_trait]
impl LanguageService for StdioLanguageService {
    async fn do_validation(&mut self, document: &TextDocument) -> Result<Vec<Diagnostic>> {
        let session = self.start().await?;
        session.client.validate(document).await
    }

    async fn terminate(&mut self) -> Result<()> {
        let Some(Session { mut child, mut client }) = self.session.take() else {
            return Ok(());
        };

        client.shutdown().await?;
        // Dropping the client closes the server's stdin
        drop(client);

        let status = child
            .wait()
            .await
            .context("waiting for language server to exit")?;
        if !status.success() {
            log::warn!("Language server exited with {}", status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line() {
        let command = ServerCommand::parse("node  /opt/apidom/server.js --stdio").expect("command");
        assert_eq!(command.program(), "node");
        assert_eq!(command.args(), ["/opt/apidom/server.js", "--stdio"]);
        assert_eq!(command.to_string(), "node /opt/apidom/server.js --stdio");
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            ServerCommand::parse(" \t "),
            Err(LintError::InvalidServerCommand)
        ));
    }

    #[tokio::test]
    async fn terminate_without_validation_spawns_nothing() {
        let command = ServerCommand::parse("apidom-lint-test-no-such-server").expect("command");
        let mut service = StdioLanguageService::new(command);
        service.terminate().await.expect("terminate is a no-op");
    }

    #[tokio::test]
    async fn missing_server_binary_fails_validation() {
        let command = ServerCommand::parse("apidom-lint-test-no-such-server").expect("command");
        let mut service = StdioLanguageService::new(command);
        let uri = Url::parse("file:///github/workspace/openapi.yaml").expect("uri");
        let document = TextDocument::apidom(uri, "openapi: 3.1.0".to_string());

        let err = service.do_validation(&document).await.unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }
}
