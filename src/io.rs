// File-level I/O helpers for compression and decompression.
//
// Provides `compress_file()` / `decompress_file()` and their reader/writer
// counterparts.  A stream is a single block, so the whole input is read into
// memory; output goes through a `BufWriter`.  Optionally computes SHA-256
// digests of the plaintext on both sides (feature-gated behind `file-io`).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::codec::decoder::{self, DecodeError};
use crate::codec::encoder::{self, CompressOptions, Compressed, EncodeError, TokenCounts};
use crate::format::header::Header;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `compress_file()`.
#[derive(Debug, Clone)]
pub struct CompressStats {
    /// Plaintext size in bytes.
    pub input_size: u64,
    /// Compressed stream size in bytes (header included).
    pub output_size: u64,
    /// Window recorded in the header.
    pub window_size: u16,
    pub tokens: TokenCounts,
    /// SHA-256 of the plaintext (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `decompress_file()`.
#[derive(Debug, Clone)]
pub struct DecompressStats {
    /// Compressed stream size in bytes.
    pub input_size: u64,
    /// Reconstructed plaintext size in bytes.
    pub output_size: u64,
    /// Window recorded in the header.
    pub window_size: u16,
    /// SHA-256 of the reconstructed plaintext (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("compression error: {0}")]
    Encode(#[from] EncodeError),
    #[error("decompression error: {0}")]
    Decode(#[from] DecodeError),
}

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// compress
// ---------------------------------------------------------------------------

/// Compress everything `reader` yields and write the stream to `writer`.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    opts: &CompressOptions,
) -> Result<CompressStats, IoError> {
    let input = read_all(reader)?;
    let (packed, result) = encode_whole(&input, opts)?;
    write_packed(&input, &packed, &result, writer)
}

/// Compress `input_path` into `output_path`.
///
/// The output file is only created once the input has been compressed.
pub fn compress_file(
    input_path: &Path,
    output_path: &Path,
    opts: CompressOptions,
) -> Result<CompressStats, IoError> {
    let input = std::fs::read(input_path)?;
    let (packed, result) = encode_whole(&input, &opts)?;
    let output = File::create(output_path)?;
    let stats = write_packed(&input, &packed, &result, output)?;
    log::info!(
        "{} -> {}: {} -> {} bytes",
        input_path.display(),
        output_path.display(),
        stats.input_size,
        stats.output_size
    );
    Ok(stats)
}

fn encode_whole(input: &[u8], opts: &CompressOptions) -> Result<(Vec<u8>, Compressed), EncodeError> {
    let mut packed = vec![0u8; encoder::max_compressed_len(input.len())];
    let result = encoder::compress_into(input, &mut packed, opts)?;
    debug_assert!(!result.is_truncated());
    packed.truncate(result.written);
    Ok((packed, result))
}

fn write_packed<W: Write>(
    input: &[u8],
    packed: &[u8],
    result: &Compressed,
    writer: W,
) -> Result<CompressStats, IoError> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, writer);
    writer.write_all(packed)?;
    writer.flush()?;

    Ok(CompressStats {
        input_size: input.len() as u64,
        output_size: packed.len() as u64,
        window_size: result.window_size,
        tokens: result.tokens,
        input_sha256: sha256(input),
    })
}

// ---------------------------------------------------------------------------
// decompress
// ---------------------------------------------------------------------------

/// Decompress the stream `reader` yields and write the plaintext to
/// `writer`.  Nothing is written unless the whole stream validates.
pub fn decompress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<DecompressStats, IoError> {
    let input = read_all(reader)?;
    let (plain, header) = decode_whole(&input)?;
    write_plain(input.len(), &plain, &header, writer)
}

/// Decompress `input_path` into `output_path`.
///
/// The output file is only created once the stream has been fully
/// validated.
pub fn decompress_file(input_path: &Path, output_path: &Path) -> Result<DecompressStats, IoError> {
    let input = std::fs::read(input_path)?;
    let (plain, header) = decode_whole(&input)?;
    let output = File::create(output_path)?;
    let stats = write_plain(input.len(), &plain, &header, output)?;
    log::info!(
        "{} -> {}: {} -> {} bytes",
        input_path.display(),
        output_path.display(),
        stats.input_size,
        stats.output_size
    );
    Ok(stats)
}

fn decode_whole(input: &[u8]) -> Result<(Vec<u8>, Header), DecodeError> {
    let header = Header::decode(input)?;
    let plain = decoder::decode_all(input)?;
    Ok((plain, header))
}

fn write_plain<W: Write>(
    input_size: usize,
    plain: &[u8],
    header: &Header,
    writer: W,
) -> Result<DecompressStats, IoError> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, writer);

    #[cfg(feature = "file-io")]
    let output_sha256 = {
        let mut hasher = sha2::Sha256::new();
        let mut hashing_writer = HashingWriter {
            inner: &mut writer,
            hasher: &mut hasher,
        };
        hashing_writer.write_all(plain)?;
        Some(hasher.finalize().into())
    };
    #[cfg(not(feature = "file-io"))]
    let output_sha256: Option<[u8; 32]> = {
        writer.write_all(plain)?;
        None
    };

    writer.flush()?;

    Ok(DecompressStats {
        input_size: input_size as u64,
        output_size: plain.len() as u64,
        window_size: header.window_size,
        output_sha256,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_all<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    BufReader::with_capacity(BUF_SIZE, reader).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

/// Lowercase hex rendering of a digest.
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

// ---------------------------------------------------------------------------
// Hashing writer (used with file-io feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
struct HashingWriter<'a, W: Write> {
    inner: &'a mut W,
    hasher: &'a mut sha2::Sha256,
}

#[cfg(feature = "file-io")]
impl<W: Write> Write for HashingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_decompress_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("input.txt");
        let packed_path = dir.path().join("input.nz");
        let output_path = dir.path().join("output.txt");

        let data = b"The quick brown fox jumps over the lazy dog. ".repeat(40);
        std::fs::write(&input_path, &data).unwrap();

        let c = compress_file(&input_path, &packed_path, CompressOptions::default()).unwrap();
        assert_eq!(c.input_size, data.len() as u64);
        assert!(c.output_size < c.input_size);
        assert_eq!(
            c.output_size,
            std::fs::metadata(&packed_path).unwrap().len()
        );
        assert!(c.tokens.matches > 0);

        let d = decompress_file(&packed_path, &output_path).unwrap();
        assert_eq!(d.output_size, data.len() as u64);
        assert_eq!(d.window_size, c.window_size);
        assert_eq!(std::fs::read(&output_path).unwrap(), data);
    }

    #[test]
    fn empty_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("empty");
        let packed_path = dir.path().join("empty.nz");
        let output_path = dir.path().join("empty.out");
        std::fs::write(&input_path, b"").unwrap();

        let c = compress_file(&input_path, &packed_path, CompressOptions::default()).unwrap();
        assert_eq!(c.output_size, 14);
        decompress_file(&packed_path, &output_path).unwrap();
        assert!(std::fs::read(&output_path).unwrap().is_empty());
    }

    #[test]
    fn corrupt_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let packed_path = dir.path().join("bad.nz");
        let output_path = dir.path().join("bad.out");
        std::fs::write(&packed_path, b"definitely not a stream").unwrap();

        let err = decompress_file(&packed_path, &output_path).unwrap_err();
        assert!(matches!(err, IoError::Decode(_)));
        assert!(!output_path.exists());
    }

    #[test]
    fn unreadable_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.nz");
        // A directory opens but cannot be read.
        let err = compress_file(dir.path(), &output_path, CompressOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
        assert!(!output_path.exists());
    }

    #[cfg(feature = "file-io")]
    #[test]
    fn file_digests_match_across_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.bin");
        let packed_path = dir.path().join("in.nz");
        let output_path = dir.path().join("out.bin");
        let data: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 251) as u8).collect();
        std::fs::write(&input_path, &data).unwrap();

        let c = compress_file(&input_path, &packed_path, CompressOptions::with_window(2048)).unwrap();
        let d = decompress_file(&packed_path, &output_path).unwrap();
        assert_eq!(d.input_size, c.output_size);
        assert_eq!(d.window_size, 2048);
        let expected: [u8; 32] = sha2::Sha256::digest(&data).into();
        assert_eq!(d.output_sha256, Some(expected));
        assert_eq!(c.input_sha256, d.output_sha256);
        assert_eq!(std::fs::read(&output_path).unwrap(), data);
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress_file(
            &dir.path().join("nope"),
            &dir.path().join("out"),
            CompressOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn streams_over_memory() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 61) as u8).collect();
        let mut packed = Vec::new();
        compress_stream(data.as_slice(), &mut packed, &CompressOptions::with_window(1024)).unwrap();
        let mut plain = Vec::new();
        let d = decompress_stream(packed.as_slice(), &mut plain).unwrap();
        assert_eq!(plain, data);
        assert_eq!(d.window_size, 1024);
    }

    #[cfg(feature = "file-io")]
    #[test]
    fn sha256_digests_match() {
        let data = b"digest me, digest me, digest me".to_vec();
        let mut packed = Vec::new();
        let c = compress_stream(data.as_slice(), &mut packed, &CompressOptions::default()).unwrap();
        let mut plain = Vec::new();
        let d = decompress_stream(packed.as_slice(), &mut plain).unwrap();
        assert!(c.input_sha256.is_some());
        assert_eq!(c.input_sha256, d.output_sha256);
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(to_hex(&[0x00, 0xAB, 0x0F]), "00ab0f");
    }
}
