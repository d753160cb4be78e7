#![no_main]

// Harness: roundtrip_table
// decode(encode(t)) == t for tables built from arbitrary raw grants.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use acl_core::codec;
use acl_core::{compile, RawEntry, RawGrant, RawGrants};

#[derive(Arbitrary, Debug)]
struct Grant {
    path: String,
    methods: Option<Vec<String>>,
    ids: Option<Vec<String>>,
}

fuzz_target!(|grants: Vec<Grant>| {
    let raw: RawGrants = grants
        .into_iter()
        .map(|g| (g.path, RawGrant::from(RawEntry { methods: g.methods, ids: g.ids })))
        .collect();
    let table = compile(&raw);
    let token = codec::encode(&table).expect("encode");
    assert_eq!(codec::decode(&token).expect("decode"), table);
});
