#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let compressed = huffarc::compress_bytes(data).expect("compression of in-memory data failed");
    let restored = huffarc::decompress_bytes(&compressed).expect("round trip failed to decode");
    assert_eq!(restored, data);
});
