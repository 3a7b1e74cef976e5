//! Tool behavior over a temporary store and a mock search adapter.

mod common;

use serde_json::{Value, json};

use common::{date, record, tool_context};
use research_mcp::ToolError;
use research_mcp::formatters;
use research_mcp::tools::{
    CleanupEmptyTopicsTool, DatabaseStatsTool, ExportPaperTool, ExtractInfoTool, ListTopicPapersTool,
    ListTopicsTool, McpTool, SearchPapersTool, TitleSearchTool, invoke, register_all_tools,
};

fn parse(output: &str) -> Value {
    serde_json::from_str(output).unwrap()
}

#[test]
fn test_all_tools_registered() {
    let names: Vec<&str> = register_all_tools().iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "search_papers",
            "search_papers_by_title",
            "extract_info",
            "list_topic_papers",
            "list_topics",
            "get_database_stats",
            "cleanup_empty_topics",
            "export_paper",
        ]
    );
    for tool in register_all_tools() {
        assert_eq!(tool.input_schema()["type"], "object", "{}", tool.name());
    }
}

// =============================================================================
// search_papers
// =============================================================================

#[tokio::test]
async fn test_search_papers_stores_results() {
    let (_dir, ctx, source) = tool_context(vec![
        record("2301.00001v1", "Qubits", date(2023, 1, 1)),
        record("2301.00002v1", "Gates", date(2023, 1, 2)),
    ]);

    let out = parse(
        &SearchPapersTool
            .execute(&ctx, json!({"topic": "Quantum Computing", "max_results": 2}))
            .await
            .unwrap(),
    );
    assert_eq!(out["topic"], "Quantum Computing");
    assert_eq!(out["paper_ids"], json!(["2301.00001v1", "2301.00002v1"]));
    assert_eq!(out["total_found"], 2);
    assert_eq!(out["new_papers"], 2);
    assert!(out["saved_to"].as_str().unwrap().ends_with("quantum_computing/papers_info.json"));

    assert_eq!(ctx.store.load("quantum computing").len(), 2);
    assert_eq!(source.calls(), vec![("Quantum Computing".to_string(), 2)]);

    let again = parse(
        &SearchPapersTool
            .execute(&ctx, json!({"topic": "Quantum Computing", "max_results": 2}))
            .await
            .unwrap(),
    );
    assert_eq!(again["new_papers"], 0);
}

#[tokio::test]
async fn test_search_papers_clamps_and_defaults_max_results() {
    let (_dir, ctx, source) = tool_context(Vec::new());

    SearchPapersTool.execute(&ctx, json!({"topic": "ai"})).await.unwrap();
    SearchPapersTool.execute(&ctx, json!({"topic": "ai", "maxResults": 10_000})).await.unwrap();
    SearchPapersTool.execute(&ctx, json!({"topic": "ai", "max_results": 0})).await.unwrap();

    let limits: Vec<u32> = source.calls().into_iter().map(|(_, n)| n).collect();
    assert_eq!(limits, vec![5, 50, 1]);
}

#[tokio::test]
async fn test_search_papers_rejects_blank_topic() {
    let (_dir, ctx, source) = tool_context(Vec::new());

    let err = SearchPapersTool.execute(&ctx, json!({"topic": "   "})).await.unwrap_err();
    assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "topic"));

    let payload = parse(&invoke(&SearchPapersTool, &ctx, json!({"topic": ""})).await.unwrap());
    assert_eq!(payload["error_type"], "ValidationError");
    assert_eq!(payload["context"]["field"], "topic");
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_search_papers_topic_without_usable_name() {
    let (_dir, ctx, _source) = tool_context(vec![record("1", "One", date(2020, 1, 1))]);

    let payload = parse(&invoke(&SearchPapersTool, &ctx, json!({"topic": "???"})).await.unwrap());
    assert_eq!(payload["error_type"], "ValidationError");
}

#[tokio::test]
async fn test_missing_arguments_are_validation_errors() {
    let (_dir, ctx, _source) = tool_context(Vec::new());

    let payload = parse(&invoke(&ExtractInfoTool, &ctx, json!({})).await.unwrap());
    assert_eq!(payload["error_type"], "ValidationError");
    assert_eq!(payload["context"]["field"], "arguments");
}

// =============================================================================
// Store access from async tools
// =============================================================================

#[tokio::test]
async fn test_store_work_runs_off_the_runtime_thread() {
    let (_dir, ctx, _source) = tool_context(Vec::new());
    let runtime_thread = std::thread::current().id();

    let store_thread = ctx.blocking(|_| std::thread::current().id()).await.unwrap();
    assert_ne!(store_thread, runtime_thread);
}

#[tokio::test]
async fn test_panicking_store_work_is_internal_error() {
    let (_dir, ctx, _source) = tool_context(Vec::new());

    let err = ctx.blocking(|_| -> usize { panic!("store exploded") }).await.unwrap_err();
    assert!(matches!(err, ToolError::Internal(_)));
}

// =============================================================================
// extract_info / export_paper
// =============================================================================

#[tokio::test]
async fn test_extract_info_found_and_not_found() {
    let (_dir, ctx, _source) = tool_context(vec![record("2301.00001v1", "Qubits", date(2023, 1, 1))]);
    SearchPapersTool.execute(&ctx, json!({"topic": "physics"})).await.unwrap();

    let found = parse(&invoke(&ExtractInfoTool, &ctx, json!({"paper_id": "2301.00001v1"})).await.unwrap());
    assert_eq!(found["paper_id"], "2301.00001v1");
    assert_eq!(found["title"], "Qubits");

    let missing = parse(&invoke(&ExtractInfoTool, &ctx, json!({"paperId": "0000.00000"})).await.unwrap());
    assert_eq!(missing["error_type"], "NotFoundError");
    assert_eq!(missing["context"]["searched_topics"], json!(["Physics"]));
    assert!(missing["timestamp"].is_string());
}

#[tokio::test]
async fn test_export_paper_formats() {
    let (_dir, ctx, _source) = tool_context(vec![record("2301.00001v1", "Qubits", date(2023, 1, 1))]);
    SearchPapersTool.execute(&ctx, json!({"topic": "physics"})).await.unwrap();

    let bib = invoke(&ExportPaperTool, &ctx, json!({"paper_id": "2301.00001v1", "format": "BibTeX"}))
        .await
        .unwrap();
    assert!(bib.starts_with("@article{2301.00001v1,"));

    let plain = invoke(&ExportPaperTool, &ctx, json!({"paper_id": "2301.00001v1", "format": "plain"}))
        .await
        .unwrap();
    assert!(plain.starts_with("Title: Qubits\n"));

    let json_out = parse(&invoke(&ExportPaperTool, &ctx, json!({"paper_id": "2301.00001v1"})).await.unwrap());
    assert_eq!(json_out["paper_id"], "2301.00001v1");

    let stored = ctx.store.find_by_id("2301.00001v1").unwrap();
    let citation = invoke(&ExportPaperTool, &ctx, json!({"paper_id": "2301.00001v1", "format": "Citation"}))
        .await
        .unwrap();
    assert_eq!(Some(citation), formatters::export(&stored, "citation"));
}

#[tokio::test]
async fn test_export_paper_unsupported_format_and_missing_paper() {
    let (_dir, ctx, _source) = tool_context(vec![record("2301.00001v1", "Qubits", date(2023, 1, 1))]);
    SearchPapersTool.execute(&ctx, json!({"topic": "physics"})).await.unwrap();

    let bad_format =
        parse(&invoke(&ExportPaperTool, &ctx, json!({"paper_id": "2301.00001v1", "format": "ris"})).await.unwrap());
    assert_eq!(bad_format["error_type"], "ValidationError");
    assert_eq!(bad_format["context"]["field"], "format");

    let missing = parse(&invoke(&ExportPaperTool, &ctx, json!({"paper_id": "nope"})).await.unwrap());
    assert_eq!(missing["error_type"], "NotFoundError");
}

// =============================================================================
// Listing, title search, statistics, cleanup
// =============================================================================

#[tokio::test]
async fn test_listing_search_and_stats_tools() {
    let (_dir, ctx, _source) = tool_context(vec![
        record("a", "Neural Networks for X", date(2020, 1, 1)),
        record("b", "A Study Involving Neural Methods", date(2024, 1, 1)),
    ]);
    SearchPapersTool.execute(&ctx, json!({"topic": "deep learning"})).await.unwrap();

    let topics = parse(&ListTopicsTool.execute(&ctx, json!({})).await.unwrap());
    assert_eq!(topics["topics"], json!(["Deep Learning"]));

    let listing = parse(&ListTopicPapersTool.execute(&ctx, json!({"topic": "deep learning"})).await.unwrap());
    assert_eq!(listing["paper_count"], 2);
    assert_eq!(listing["papers"][0]["id"], "b");

    let hits = parse(&TitleSearchTool.execute(&ctx, json!({"query": "NEURAL"})).await.unwrap());
    assert_eq!(hits["total_matches"], 2);
    assert_eq!(hits["matches"][0]["id"], "a");

    let stats = parse(&DatabaseStatsTool.execute(&ctx, json!({})).await.unwrap());
    assert_eq!(stats["total_topics"], 1);
    assert_eq!(stats["total_papers"], 2);
    assert_eq!(stats["topics"][0]["latest_paper"], "2024-01-01");
    assert!(stats.get("error").is_none());
}

#[tokio::test]
async fn test_cleanup_tool() {
    let (_dir, ctx, _source) = tool_context(Vec::new());
    SearchPapersTool.execute(&ctx, json!({"topic": "empty"})).await.unwrap();

    let out = parse(&CleanupEmptyTopicsTool.execute(&ctx, json!({})).await.unwrap());
    assert_eq!(out["removed_topics"], 1);
    assert!(ctx.store.list_topics().is_empty());
}
