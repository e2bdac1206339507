#![no_main]

use libfuzzer_sys::fuzz_target;
use zipmend::types::ExpectedDigest;
use zipmend::validator::check_candidate;

fuzz_target!(|data: &[u8]| {
    let expected = ExpectedDigest::new("aa".repeat(32));
    let _ = check_candidate(data, &expected);
});
