//! Fuzzing library for research-mcp.
//!
//! Fuzz targets cover everything read from outside the process: stored
//! collection files, individual records, tool arguments and arXiv feeds.
//!
//! # Usage
//!
//! ```bash
//! cd crates/research-mcp-fuzz
//! cargo +nightly fuzz run fuzz_collection_parse -- -max_total_time=60
//! ```

pub use research_mcp::client::parse_feed;
pub use research_mcp::models;
