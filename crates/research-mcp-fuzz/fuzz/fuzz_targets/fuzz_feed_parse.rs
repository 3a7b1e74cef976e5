#![no_main]

use libfuzzer_sys::fuzz_target;
use research_mcp::client::parse_feed;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = parse_feed(body);
    }
});
