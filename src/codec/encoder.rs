// Greedy LZ77 token encoder.
//
// One pass over the input: at every position the match finder is asked for
// the longest back-reference; a match emits a 4-byte token and skips its
// bytes (they are not indexed), anything else emits a literal.  Output
// capacity is checked before each token and the run stops cleanly once a
// token no longer fits.

use crate::format::checksum::crc32;
use crate::format::cursor::ByteWriter;
use crate::format::header::{HEADER_LEN, Header};
use crate::format::token::{MAX_BYTES_PER_LITERAL, Token};
use crate::hash::config::DEFAULT_WINDOW;
use crate::hash::matching::MatchFinder;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Requested window in bytes. `0` selects the default; other values are
    /// clamped to `[MIN_WINDOW, MAX_WINDOW]`.
    pub window_size: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW,
        }
    }
}

impl CompressOptions {
    pub fn with_window(window_size: usize) -> Self {
        Self { window_size }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("output buffer holds {available} bytes, at least {needed} required")]
    Capacity { needed: usize, available: usize },
    #[error("input of {0} bytes does not fit the 32-bit size field")]
    InputTooLarge(usize),
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Token counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    pub literals: usize,
    pub escaped: usize,
    pub matches: usize,
    /// Input bytes covered by match tokens.
    pub matched_bytes: usize,
}

impl TokenCounts {
    pub fn record(&mut self, token: &Token) {
        match token {
            Token::Literal(_) => self.literals += 1,
            Token::EscapedLiteral(_) => self.escaped += 1,
            Token::Match { length, .. } => {
                self.matches += 1;
                self.matched_bytes += *length as usize;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.literals + self.escaped + self.matches
    }
}

/// Outcome of [`compress_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compressed {
    /// Bytes written to the output (header included).
    pub written: usize,
    /// Input bytes represented by the emitted tokens.
    pub consumed: usize,
    /// Total input length.
    pub input_len: usize,
    /// Window recorded in the header.
    pub window_size: u16,
    pub tokens: TokenCounts,
}

impl Compressed {
    /// The output ran out of room before the whole input was encoded.
    ///
    /// A truncated stream carries the full size and checksum in its header
    /// and will fail to decompress.
    pub fn is_truncated(&self) -> bool {
        self.consumed < self.input_len
    }

    /// Compressed size over input size.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.written as f64 / self.input_len as f64
    }
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Output size that always holds the whole stream: every byte escaped.
pub fn max_compressed_len(input_len: usize) -> usize {
    input_len
        .saturating_mul(MAX_BYTES_PER_LITERAL)
        .saturating_add(HEADER_LEN)
}

/// Compress `input` into `output`.
///
/// Fails up front if `output` is shorter than `input.len() + HEADER_LEN`.
/// Past that check the run never fails: if incompressible data outgrows the
/// buffer the stream is cut at the last token that fit, and the result
/// reports it through [`Compressed::is_truncated`].
pub fn compress_into(
    input: &[u8],
    output: &mut [u8],
    opts: &CompressOptions,
) -> Result<Compressed, EncodeError> {
    let needed = input.len().saturating_add(HEADER_LEN);
    if output.len() < needed {
        return Err(EncodeError::Capacity {
            needed,
            available: output.len(),
        });
    }
    let original_size =
        u32::try_from(input.len()).map_err(|_| EncodeError::InputTooLarge(input.len()))?;

    let header = Header::new(original_size, crc32(input), opts.window_size);
    let mut w = ByteWriter::new(output);
    if !header.write_to(&mut w) {
        return Err(EncodeError::Capacity {
            needed,
            available: w.capacity(),
        });
    }

    let mut finder = MatchFinder::new(header.window_size as usize);
    let mut counts = TokenCounts::default();
    let mut pos = 0usize;

    while pos < input.len() {
        let token = match finder.find(input, pos) {
            Some(m) => Token::new_match(m.distance(pos), m.length),
            None => Token::literal(input[pos]),
        };
        if !token.write_to(&mut w) {
            break;
        }
        counts.record(&token);
        pos += token.decoded_len();
    }

    let result = Compressed {
        written: w.written(),
        consumed: pos,
        input_len: input.len(),
        window_size: header.window_size,
        tokens: counts,
    };

    if result.is_truncated() {
        log::warn!(
            "output full after {} of {} input bytes; stream truncated at {} bytes",
            result.consumed,
            result.input_len,
            result.written
        );
    }
    log::debug!(
        "compressed {} -> {} bytes (window={}, literals={}, escaped={}, matches={})",
        result.input_len,
        result.written,
        result.window_size,
        counts.literals,
        counts.escaped,
        counts.matches
    );

    Ok(result)
}

/// Compress `input` into a freshly allocated buffer sized so the stream is
/// never truncated.
pub fn encode_all(input: &[u8], opts: &CompressOptions) -> Result<Vec<u8>, EncodeError> {
    let mut out = vec![0u8; max_compressed_len(input.len())];
    let result = compress_into(input, &mut out, opts)?;
    out.truncate(result.written);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
