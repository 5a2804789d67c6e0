//! JSON-RPC message framing over a byte stream.
//!
//! Each message is a `Content-Length` header block followed by a JSON body.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const CONTENT_LENGTH: &str = "Content-Length";

/// Write one framed message and flush
pub async fn write_message<W>(writer: &mut W, message: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_string(message)?;
    let header = format!("{}: {}\r\n\r\n", CONTENT_LENGTH, body.len());

    writer.write_all(header.as_bytes()).await?;
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed message. `None` means the stream ended between messages.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Value>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length = None;
    let mut saw_header = false;

    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .await
            .context("reading message header")?;
        if read == 0 {
            if saw_header {
                bail!("stream ended inside a message header");
            }
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            // End of headers
            break;
        }
        saw_header = true;

        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
                let length = value
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid Content-Length header: {line}"))?;
                content_length = Some(length);
            }
        }
    }

    let length = content_length.context("message without Content-Length header")?;
    let mut body = vec![0u8; length];
    reader
        .read_exact(&mut body)
        .await
        .context("reading message body")?;

    let message = serde_json::from_slice(&body).context("message body is not valid JSON")?;
    Ok(Some(message))
}
