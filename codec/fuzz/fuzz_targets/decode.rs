#![no_main]

use libfuzzer_sys::fuzz_target;
use mpack::{decode_from_slice, Encode};

// Arbitrary bytes must never panic the decoder. When they do decode, the
// re-encoding is canonical (minimal widths) and decoding it again must be a
// fixpoint byte-for-byte.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = decode_from_slice(data) else {
        return;
    };

    let canonical = value.encode();
    assert_eq!(canonical.len(), value.encode_size());

    let reparsed = decode_from_slice(&canonical).expect("canonical encoding must decode");
    assert_eq!(reparsed.encode(), canonical);
});
