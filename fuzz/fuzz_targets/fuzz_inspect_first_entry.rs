#![no_main]

use libfuzzer_sys::fuzz_target;
use zipmend::validator::inspect_first_entry;

fuzz_target!(|data: &[u8]| {
    let _ = inspect_first_entry(data);
});
