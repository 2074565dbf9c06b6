#![no_main]
use libfuzzer_sys::fuzz_target;
use nanozip::codec::encoder::{CompressOptions, compress_into, encode_all};
use nanozip::codec::decoder;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the window hint.
    let window = u16::from_le_bytes([data[0], data[1]]) as usize;
    let payload = &data[2..];
    let opts = CompressOptions::with_window(window);

    let packed = encode_all(payload, &opts).unwrap();
    let decoded = decoder::decode_all(&packed).unwrap();
    assert_eq!(decoded, payload);

    // Minimum-capacity buffer: either a full stream or a reported truncation.
    let mut tight = vec![0u8; payload.len() + 14];
    let r = compress_into(payload, &mut tight, &opts).unwrap();
    if r.is_truncated() {
        assert!(decoder::decode_all(&tight[..r.written]).is_err());
    } else {
        assert_eq!(&tight[..r.written], &packed[..]);
    }

    // The boundary API never hands out an undecodable stream.
    let n = nanozip::compress(payload, &mut tight, window);
    if n != 0 {
        let mut out = vec![0u8; payload.len()];
        assert_eq!(nanozip::decompress(&tight[..n], &mut out), payload.len());
        assert_eq!(out, payload);
    }
});
