#![no_main]

// Harness: compile_raw_json
// Any JSON document that parses as a grant map compiles without panicking,
// and malformed paths never allow anything.

use libfuzzer_sys::fuzz_target;
use acl_core::{compile_with_report, RawGrants};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<RawGrants>(data) else {
        return;
    };
    let (table, malformed) = compile_with_report(&raw);
    assert_eq!(table.len(), raw.len());
    for grant in &malformed {
        let entry = table.get(&grant.path).expect("malformed path is present");
        assert!(entry.methods().is_empty());
        assert!(entry.ids().is_empty());
    }
});
