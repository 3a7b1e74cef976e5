//! Research MCP Server
//!
//! A Model Context Protocol (MCP) server that searches arXiv by topic and
//! keeps the paper metadata it finds in a per-topic JSON store on disk.
//! Stored papers can be looked up by identifier, searched by title,
//! summarized, listed and exported as JSON, BibTeX or plain text.
//!
//! # Features
//!
//! - **8 MCP Tools**: search, lookup, title search, listing, statistics, export, cleanup
//! - **Insert-only merge**: searching again never overwrites stored papers
//! - **Lenient reads**: missing or corrupt files load as empty collections
//! - **Rate-limited**: one arXiv request per 3 seconds, with retries and a 5-minute cache
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use research_mcp::{ArxivClient, Config, PaperStore, server::McpServer, tools::ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::from_env()?);
//!     let store = Arc::new(PaperStore::new(&config));
//!     let source = Arc::new(ArxivClient::new(&config)?);
//!
//!     McpServer::new(ToolContext::new(config, store, source)).run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod store;
pub mod tools;

pub use client::{ArxivClient, PaperSource};
pub use config::Config;
pub use error::{ClientError, StoreError, ToolError, ValidationError};
pub use models::{PaperRecord, TopicCollection};
pub use store::PaperStore;
