#![no_main]

use libfuzzer_sys::fuzz_target;
use research_mcp::PaperRecord;

fuzz_target!(|data: &[u8]| {
    // A record that parses must serialize and parse back to itself.
    if let Ok(record) = serde_json::from_slice::<PaperRecord>(data) {
        let json = serde_json::to_vec(&record).expect("serialize parsed record");
        let again: PaperRecord = serde_json::from_slice(&json).expect("reparse record");
        assert_eq!(again, record);
    }
});
