#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input may fail to decode - that's OK
    // We're looking for panics/crashes, not errors
    let _ = huffarc::decompress_bytes(data);
});
