//! Minimal LSP client session.
//!
//! Drives a language server through the few calls a lint run needs. The
//! session is strictly sequential: one outstanding request at a time, with
//! server notifications and server requests handled while waiting.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tower_lsp::lsp_types::notification::{
    DidOpenTextDocument, Exit, Initialized, LogMessage, Notification, PublishDiagnostics,
    ShowMessage,
};
use tower_lsp::lsp_types::request::{Initialize, Request, Shutdown, WorkspaceConfiguration};
use tower_lsp::lsp_types::{
    DidOpenTextDocumentParams, LogMessageParams, MessageType, ShowMessageParams, Url,
};

use super::codec::{read_message, write_message};
use crate::validation::{Diagnostic, PublishedDiagnostics, TextDocument};

/// A message received from the server
#[derive(Debug)]
enum Incoming {
    Response { id: Value, outcome: Result<Value> },
    Request { id: Value, method: String, params: Value },
    Notification { method: String, params: Value },
}

impl Incoming {
    fn classify(mut message: Value) -> Result<Self> {
        let method = message
            .get("method")
            .and_then(Value::as_str)
            .map(str::to_string);
        let id = message.get_mut("id").map(Value::take);
        let params = message.get_mut("params").map(Value::take).unwrap_or(Value::Null);

        match (method, id) {
            (Some(method), Some(id)) => Ok(Incoming::Request { id, method, params }),
            (Some(method), None) => Ok(Incoming::Notification { method, params }),
            (None, Some(id)) => {
                let outcome = match message.get("error") {
                    Some(error) => Err(anyhow!(
                        "{} (code {})",
                        error
                            .get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error"),
                        error.get("code").unwrap_or(&Value::Null)
                    )),
                    None => Ok(message.get_mut("result").map(Value::take).unwrap_or(Value::Null)),
                };
                Ok(Incoming::Response { id, outcome })
            }
            (None, None) => bail!("message is neither a request, a response nor a notification"),
        }
    }
}

/// Diagnostics a server published for one uri, or why they could not be read
type Published = (Url, Result<Vec<Diagnostic>>);

/// LSP client over a pair of byte streams
pub struct LspClient<R, W> {
    reader: R,
    writer: W,
    next_id: i64,
    published: Vec<Published>,
}

impl<R, W> LspClient<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
            published: Vec::new(),
        }
    }

    /// Run the `initialize` handshake
    pub async fn initialize(&mut self, root_uri: Option<&Url>) -> Result<Value> {
        let params = json!({
            "processId": std::process::id(),
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "rootUri": root_uri,
            "capabilities": {
                "textDocument": {
                    "publishDiagnostics": { "relatedInformation": false }
                },
                "workspace": { "configuration": true }
            }
        });

        let result = self
            .request(Initialize::METHOD, params)
            .await
            .context("initialize failed")?;
        self.notify(Initialized::METHOD, json!({})).await?;
        Ok(result)
    }

    /// Open `document` and wait for the diagnostics published for it
    pub async fn validate(&mut self, document: &TextDocument) -> Result<Vec<Diagnostic>> {
        let params = DidOpenTextDocumentParams {
            text_document: document.into(),
        };
        self.notify(DidOpenTextDocument::METHOD, serde_json::to_value(params)?)
            .await?;
        self.wait_for_diagnostics(&document.uri).await
    }

    /// Ask the server to shut down, then tell it to exit
    pub async fn shutdown(&mut self) -> Result<()> {
        self.request(Shutdown::METHOD, Value::Null)
            .await
            .context("shutdown failed")?;
        self.notify(Exit::METHOD, Value::Null).await
    }

    pub async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        log::debug!("--> {} (id {})", method, id);
        let mut message = json!({ "jsonrpc": "2.0", "id": id, "method": method });
        attach_params(&mut message, params);
        write_message(&mut self.writer, &message).await?;

        loop {
            match self.next_incoming(method).await? {
                Incoming::Response { id: reply, outcome } if reply == json!(id) => {
                    return outcome.with_context(|| format!("{method} returned an error"));
                }
                Incoming::Response { id: reply, .. } => {
                    log::warn!("Ignoring response to unknown request {}", reply);
                }
                other => self.handle(other).await?,
            }
        }
    }

    pub async fn notify(&mut self, method: &str, params: Value) -> Result<()> {
        log::debug!("--> {}", method);
        let mut message = json!({ "jsonrpc": "2.0", "method": method });
        attach_params(&mut message, params);
        write_message(&mut self.writer, &message).await
    }

    /// Wait for the first diagnostics published for `uri`
    pub async fn wait_for_diagnostics(&mut self, uri: &Url) -> Result<Vec<Diagnostic>> {
        loop {
            let first = self.published.iter().position(|(published, _)| published == uri);
            if let Some(idx) = first {
                return self.published.remove(idx).1;
            }

            match self.next_incoming(PublishDiagnostics::METHOD).await? {
                Incoming::Response { id, .. } => {
                    log::warn!("Ignoring response to unknown request {}", id);
                }
                other => self.handle(other).await?,
            }
        }
    }

    async fn next_incoming(&mut self, awaiting: &str) -> Result<Incoming> {
        let message = read_message(&mut self.reader)
            .await?
            .with_context(|| format!("language server closed the stream while awaiting {awaiting}"))?;
        log::trace!("<-- {}", message);
        Incoming::classify(message)
    }

    async fn handle(&mut self, incoming: Incoming) -> Result<()> {
        match incoming {
            Incoming::Notification { method, params } => {
                self.handle_notification(&method, params);
                Ok(())
            }
            Incoming::Request { id, method, params } => {
                self.answer_request(id, &method, params).await
            }
            Incoming::Response { .. } => Ok(()),
        }
    }

    fn handle_notification(&mut self, method: &str, params: Value) {
        if method == PublishDiagnostics::METHOD {
            // The uri is read on its own so a bad payload still answers its document
            let uri = params
                .get("uri")
                .and_then(Value::as_str)
                .and_then(|uri| Url::parse(uri).ok());
            match (serde_json::from_value::<PublishedDiagnostics>(params), uri) {
                (Ok(published), _) => {
                    log::debug!(
                        "<-- {} diagnostics for {}",
                        published.diagnostics.len(),
                        published.uri
                    );
                    self.published.push((published.uri, Ok(published.diagnostics)));
                }
                (Err(e), Some(uri)) => {
                    log::warn!("Malformed diagnostics for {}: {}", uri, e);
                    let error = anyhow!("malformed diagnostics for {uri}: {e}");
                    self.published.push((uri, Err(error)));
                }
                (Err(e), None) => log::warn!("Malformed publishDiagnostics params: {}", e),
            }
        } else if method == LogMessage::METHOD {
            if let Ok(params) = serde_json::from_value::<LogMessageParams>(params) {
                log::log!(log_level(params.typ), "language server: {}", params.message);
            }
        } else if method == ShowMessage::METHOD {
            if let Ok(params) = serde_json::from_value::<ShowMessageParams>(params) {
                log::log!(log_level(params.typ), "language server: {}", params.message);
            }
        } else {
            log::trace!("Ignoring notification {}", method);
        }
    }

    /// Answer a server-initiated request so the server never waits on us
    async fn answer_request(&mut self, id: Value, method: &str, params: Value) -> Result<()> {
        log::debug!("<-- request {} (id {})", method, id);
        let result = if method == WorkspaceConfiguration::METHOD {
            let items = params
                .get("items")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            Value::Array(vec![Value::Null; items])
        } else {
            Value::Null
        };

        let reply = json!({ "jsonrpc": "2.0", "id": id, "result": result });
        write_message(&mut self.writer, &reply).await
    }
}

/// `params` is omitted rather than sent as `null`
fn attach_params(message: &mut Value, params: Value) {
    if !params.is_null() {
        message["params"] = params;
    }
}

fn log_level(typ: MessageType) -> log::Level {
    match typ {
        MessageType::ERROR => log::Level::Error,
        MessageType::WARNING => log::Level::Warn,
        MessageType::INFO => log::Level::Info,
        _ => log::Level::Debug,
    }
}
