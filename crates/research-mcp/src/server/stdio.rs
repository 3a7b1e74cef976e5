//! Stdio transport for MCP protocol.
//!
//! Handles line-delimited JSON-RPC 2.0 over stdin/stdout. Logs go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{JsonRpcRequest, JsonRpcResponse, McpServer};

/// Serve requests read line by line from `reader`, writing replies to `writer`.
///
/// Returns when the reader reaches end of input.
///
/// # Errors
///
/// Returns error on I/O failure.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) => server.handle(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable request");
                Some(JsonRpcResponse::error(None, -32700, format!("Parse error: {e}")))
            }
        };

        if let Some(response) = response {
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}
