//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! stdout carries protocol messages only; logs must go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::McpHandler;

/// Serve MCP on the process's stdin and stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub async fn serve(handler: &McpHandler) -> std::io::Result<()> {
    info!("Serving MCP over stdio");
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve_on(handler, reader, writer).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Serve MCP on any line-oriented reader and writer.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub async fn serve_on<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = handler.handle_message(line).await else {
            continue;
        };
        debug!(bytes = response.len(), "Writing response");
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
