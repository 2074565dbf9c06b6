#![no_main]
use libfuzzer_sys::fuzz_target;
use nanozip::codec::decoder;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic or read out of bounds.
    let _ = decoder::decode_all(data);

    let mut out = vec![0u8; 4096];
    let n = nanozip::decompress(data, &mut out);
    assert!(n <= out.len());
});
