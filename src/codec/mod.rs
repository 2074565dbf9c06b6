// Compression and decompression over caller-provided buffers.
//
// - `encoder`: greedy LZ77 token encoder (`compress_into`, `encode_all`)
// - `decoder`: validating token replay (`decompress_into`, `decode_all`)

pub mod decoder;
pub mod encoder;

pub use decoder::{DecodeError, decode_all, decompress_into, max_decoded_len};
pub use encoder::{
    CompressOptions, Compressed, EncodeError, TokenCounts, compress_into, encode_all,
    max_compressed_len,
};
