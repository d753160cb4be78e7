#![no_main]

// Harness: decode_token
// Arbitrary strings must either decode into a table that re-encodes and
// decodes to itself, or fail with a DecodeError. Never panic.

use libfuzzer_sys::fuzz_target;
use acl_core::codec::{GzipCodec, TableCodec, ZlibCodec};

fn check<C: TableCodec>(codec: &C, token: &str) {
    if let Ok(table) = codec.decode(token) {
        let again = codec.encode(&table).expect("encode of decoded table");
        assert_eq!(codec.decode(&again).expect("decode of re-encoded table"), table);
    }
}

fuzz_target!(|token: &str| {
    check(&ZlibCodec::new(6, 1 << 20), token);
    check(&GzipCodec::new(6, 1 << 20), token);
});
