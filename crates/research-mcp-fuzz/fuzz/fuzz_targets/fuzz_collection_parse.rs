#![no_main]

use libfuzzer_sys::fuzz_target;
use research_mcp::models::TopicCollection;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Some(collection) = TopicCollection::from_document(doc) {
            for record in collection.papers() {
                assert!(collection.contains(record.paper_id()));
            }
        }
    }
});
