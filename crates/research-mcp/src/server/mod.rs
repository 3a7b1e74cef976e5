//! MCP server implementation.
//!
//! Provides both stdio and HTTP transports over one JSON-RPC dispatcher.

pub mod stdio;
pub mod transport;

use std::net::SocketAddr;

use serde_json::{Value, json};

use crate::tools::{self, McpTool, ToolContext};

pub use transport::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpToolInfo};

/// Protocol version answered when the client does not name one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server for the research paper store.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server with every tool registered.
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx, tools: tools::register_all_tools() }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!(tools = self.tools.len(), "Starting MCP server in stdio mode");

        let reader = tokio::io::BufReader::new(tokio::io::stdin());
        stdio::serve(&self, reader, tokio::io::stdout()).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, host: [u8; 4], port: u16) -> anyhow::Result<()> {
        tracing::info!(tools = self.tools.len(), port, "Starting MCP server in HTTP mode");

        let router = transport::create_router(self);
        let addr = SocketAddr::from((host, port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("HTTP server listening on http://{}", addr);
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Dispatch one JSON-RPC message.
    ///
    /// Returns `None` for notifications (requests without an id), which get
    /// no reply.
    pub async fn handle(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %req.method, "Handling request");

        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::success(req.id.clone(), self.initialize(&req.params)),
            "initialized" | "notifications/initialized" | "notifications/cancelled" => {
                JsonRpcResponse::success(req.id.clone(), json!({}))
            }
            "ping" => JsonRpcResponse::success(req.id.clone(), json!({})),
            "tools/list" => JsonRpcResponse::success(req.id.clone(), self.tools_list()),
            "tools/call" => self.tools_call(req.id.clone(), &req.params).await,
            _ => JsonRpcResponse::error(
                req.id.clone(),
                -32601,
                format!("Method not found: {}", req.method),
            ),
        };

        if req.id.is_none() {
            return None;
        }
        Some(response)
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        tracing::info!("MCP initialize: protocol version {}", protocol_version);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.ctx.config.server_name,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn tools_list(&self) -> Value {
        let tool_list: Vec<McpToolInfo> = self
            .tools
            .iter()
            .map(|t| McpToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();

        json!({ "tools": tool_list })
    }

    async fn tools_call(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, -32602, "Missing 'name' parameter");
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let Some(tool) = self.get_tool(tool_name) else {
            return JsonRpcResponse::error(id, -32602, format!("Tool not found: {tool_name}"));
        };

        tracing::info!(tool = %tool_name, "Executing tool");

        match tools::invoke(tool, &self.ctx, arguments).await {
            Ok(result) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": result
                    }]
                }),
            ),
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
                JsonRpcResponse::error(id, -32000, e.to_user_message())
            }
        }
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
