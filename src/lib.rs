//! NanoZip: a small LZ77 byte-stream compressor.
//!
//! A stream is a fixed 14-byte header (magic, original size, CRC-32, window)
//! followed by literal, escaped-literal and match tokens. Matches are found
//! with a hash-chain index and a SIMD byte comparator.
//!
//! The crate provides:
//! - A length-returning boundary API ([`compress`], [`decompress`])
//! - `Result`-returning codecs with detailed errors (`codec`)
//! - The wire format pieces for inspection tools (`format`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! let input = b"ABCDEABCDEABCDEABCDEABCDE";
//!
//! let mut packed = vec![0u8; input.len() + 14];
//! let n = nanozip::compress(input, &mut packed, 0);
//! assert!(n > 0);
//!
//! let mut unpacked = vec![0u8; input.len()];
//! assert_eq!(nanozip::decompress(&packed[..n], &mut unpacked), input.len());
//! assert_eq!(&unpacked, input);
//! ```
//!
//! For error details use the codec layer instead:
//!
//! ```
//! use nanozip::codec::{decode_all, encode_all, CompressOptions};
//!
//! let packed = encode_all(b"hello hello hello", &CompressOptions::default()).unwrap();
//! assert_eq!(decode_all(&packed).unwrap(), b"hello hello hello");
//! ```

pub mod codec;
pub mod format;
pub mod hash;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

use codec::encoder::CompressOptions;

/// Compress `input` into `output` using a window of `window_size_hint`
/// bytes (`0` for the default; other values are clamped to
/// `[1024, 65535]`).
///
/// Returns the number of bytes written, or `0` if `output` is shorter than
/// `input.len() + 14` or the token stream outgrows `output`. A nonzero
/// result always decompresses back to `input`; use
/// [`codec::compress_into`] to inspect a truncated stream.
pub fn compress(input: &[u8], output: &mut [u8], window_size_hint: usize) -> usize {
    let opts = CompressOptions::with_window(window_size_hint);
    match codec::encoder::compress_into(input, output, &opts) {
        Ok(r) if r.is_truncated() => 0,
        Ok(r) => r.written,
        Err(e) => {
            log::debug!("compression failed: {e}");
            0
        }
    }
}

/// Decompress a NanoZip stream into `output`.
///
/// Returns the number of bytes produced, or `0` on any failure: a bad or
/// short header, an `output` smaller than the declared size, a corrupt
/// token stream, or a size or checksum mismatch.
pub fn decompress(input: &[u8], output: &mut [u8]) -> usize {
    codec::decoder::decompress_into(input, output).unwrap_or(0)
}
