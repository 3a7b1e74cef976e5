//! Tests for MCP protocol JSON-RPC handling over both transports.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{date, record, tool_context};
use research_mcp::server::{JsonRpcRequest, McpServer, stdio, transport};

fn server_with(records: Vec<research_mcp::PaperRecord>) -> (tempfile::TempDir, McpServer) {
    let (dir, ctx, _source) = tool_context(records);
    (dir, McpServer::new(ctx))
}

// =============================================================================
// Dispatcher
// =============================================================================

#[tokio::test]
async fn test_initialize_echoes_protocol_version() {
    let (_dir, server) = server_with(Vec::new());

    let response = server
        .handle(JsonRpcRequest::new(1, "initialize", json!({"protocolVersion": "2025-03-26"})))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "research");
    assert!(result["capabilities"]["tools"].is_object());
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_tools_list() {
    let (_dir, server) = server_with(Vec::new());

    let response = server.handle(JsonRpcRequest::new(2, "tools/list", Value::Null)).await.unwrap();
    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();

    assert_eq!(tools.len(), 8);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    assert!(tools.iter().any(|t| t["name"] == "export_paper"));
}

#[tokio::test]
async fn test_tools_call_returns_text_content() {
    let (_dir, server) = server_with(vec![record("2301.00001v1", "Qubits", date(2023, 1, 1))]);

    let response = server
        .handle(JsonRpcRequest::new(
            3,
            "tools/call",
            json!({"name": "search_papers", "arguments": {"topic": "physics"}}),
        ))
        .await
        .unwrap();

    let content = &response.result.unwrap()["content"][0];
    assert_eq!(content["type"], "text");
    let payload: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(payload["new_papers"], 1);
}

#[tokio::test]
async fn test_tools_call_errors() {
    let (_dir, server) = server_with(Vec::new());

    let unknown = server
        .handle(JsonRpcRequest::new(4, "tools/call", json!({"name": "no_such_tool"})))
        .await
        .unwrap();
    assert_eq!(unknown.error.unwrap().code, -32602);

    let missing_name = server.handle(JsonRpcRequest::new(5, "tools/call", json!({}))).await.unwrap();
    assert_eq!(missing_name.error.unwrap().code, -32602);

    let method = server.handle(JsonRpcRequest::new(6, "resources/list", json!({}))).await.unwrap();
    assert_eq!(method.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_not_found_is_a_payload_not_an_error() {
    let (_dir, server) = server_with(Vec::new());

    let response = server
        .handle(JsonRpcRequest::new(
            7,
            "tools/call",
            json!({"name": "extract_info", "arguments": {"paper_id": "missing"}}),
        ))
        .await
        .unwrap();

    assert!(response.error.is_none());
    let text = response.result.unwrap()["content"][0]["text"].as_str().unwrap().to_string();
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["error_type"], "NotFoundError");
}

#[tokio::test]
async fn test_notifications_get_no_reply() {
    let (_dir, server) = server_with(Vec::new());
    let notification: JsonRpcRequest =
        serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).unwrap();
    assert!(server.handle(notification).await.is_none());
}

// =============================================================================
// Stdio
// =============================================================================

#[tokio::test]
async fn test_stdio_round_trip() {
    let (_dir, server) = server_with(Vec::new());
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        "this is not json\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_topics","arguments":{}}}"#,
        "\n",
    );
    let mut output = Vec::new();

    stdio::serve(&server, input.as_bytes(), &mut output).await.unwrap();

    let replies: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[1]["error"]["code"], -32700);
    assert_eq!(replies[2]["id"], 2);
    assert!(replies[2]["result"]["content"][0]["text"].as_str().unwrap().contains("total_topics"));
}

// =============================================================================
// HTTP
// =============================================================================

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_mcp(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_http_health() {
    let (_dir, server) = server_with(Vec::new());
    let router = transport::create_router(server);

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tools"], 8);
}

#[tokio::test]
async fn test_http_mcp_request() {
    let (_dir, server) = server_with(Vec::new());
    let router = transport::create_router(server);

    let response = router
        .oneshot(post_mcp(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "a");
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_http_notification_and_parse_error() {
    let (_dir, server) = server_with(Vec::new());
    let router = transport::create_router(server);

    let response = router
        .clone()
        .oneshot(post_mcp(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = router.oneshot(post_mcp("{oops")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], -32700);
}
