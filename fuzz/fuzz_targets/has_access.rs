#![no_main]

// Harness: has_access
// Cross-checks the evaluator against a direct reading of the raw grant.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use acl_core::{compile, has_access, RawEntry, RawGrants};

#[derive(Arbitrary, Debug)]
struct Frame {
    methods: Option<Vec<String>>,
    ids: Option<Vec<String>>,
    method: String,
    requested: Vec<String>,
    use_other_path: bool,
}

fuzz_target!(|frame: Frame| {
    let mut raw = RawGrants::new();
    raw.insert(
        "p".to_string(),
        RawEntry { methods: frame.methods.clone(), ids: frame.ids.clone() }.into(),
    );
    let table = compile(&raw);

    if frame.use_other_path {
        assert!(!has_access(&table, "q", &frame.method, &frame.requested));
        return;
    }

    let methods = frame.methods.unwrap_or_default();
    let ids = frame.ids.unwrap_or_default();
    let expected = methods.contains(&frame.method)
        && (ids.is_empty() || frame.requested.iter().all(|r| ids.contains(r)));
    assert_eq!(has_access(&table, "p", &frame.method, &frame.requested), expected);
});
