#![no_main]

use libfuzzer_sys::fuzz_target;
use research_mcp::models::{
    ExportPaperInput, ExtractInfoInput, ListTopicPapersInput, SearchPapersInput, TitleSearchInput,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<SearchPapersInput>(json.clone());
        let _ = serde_json::from_value::<ExtractInfoInput>(json.clone());
        let _ = serde_json::from_value::<TitleSearchInput>(json.clone());
        let _ = serde_json::from_value::<ListTopicPapersInput>(json.clone());
        let _ = serde_json::from_value::<ExportPaperInput>(json);
    }
});
