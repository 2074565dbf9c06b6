// Token model and wire codec.
//
// Three lexical classes, selected by the first byte of each token:
//
//   0xC0            match:   C0 dist_lo dist_hi (length - 3)
//   0xBF            escaped: BF byte
//   anything else   literal: byte
//
// The encoder escapes every literal equal to 0xBF or >= 0xC0, so a raw
// literal on the wire is always < 0xBF.  The decoder is lenient and takes
// any other lead byte (including 0xC1..=0xFF) as a plain literal.

use super::cursor::{ByteReader, ByteWriter};
use crate::hash::config::{MAX_MATCH, MIN_MATCH};

/// Lead byte of an escaped literal.
pub const ESCAPE_MARKER: u8 = 0xBF;

/// Lead byte of a match token.
pub const MATCH_MARKER: u8 = 0xC0;

/// Encoded size of a match token.
pub const MATCH_TOKEN_LEN: usize = 4;

/// Worst-case encoded size of one input byte (an escaped literal).
pub const MAX_BYTES_PER_LITERAL: usize = 2;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// In-stream violations found while replaying tokens.
///
/// Offsets are relative to the start of the token stream (just past the
/// header).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorruptError {
    #[error("token at offset {offset} needs {needed} bytes, only {available} left")]
    TruncatedToken {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("match at offset {offset} has zero distance")]
    ZeroDistance { offset: usize },
    #[error("match at offset {offset} has length {length} > {MAX_MATCH}")]
    MatchTooLong { offset: usize, length: usize },
    #[error("match at offset {offset} reaches {distance} bytes back from output position {out_pos}")]
    DistanceBeyondOutput {
        offset: usize,
        distance: usize,
        out_pos: usize,
    },
    #[error("match at offset {offset} writes to {end}, past declared size {declared}")]
    OverrunsDeclaredSize {
        offset: usize,
        end: usize,
        declared: usize,
    },
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// One unit of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A byte stored as itself.
    Literal(u8),
    /// A byte that collides with a marker, stored behind `ESCAPE_MARKER`.
    EscapedLiteral(u8),
    /// Copy `length` bytes starting `distance` bytes back.
    Match { distance: u16, length: u16 },
}

impl Token {
    /// The literal token the encoder uses for `byte`.
    #[inline]
    pub fn literal(byte: u8) -> Self {
        if needs_escape(byte) {
            Self::EscapedLiteral(byte)
        } else {
            Self::Literal(byte)
        }
    }

    /// A match token.
    ///
    /// `distance` must be in `1..=65535` and `length` in
    /// `MIN_MATCH..=MAX_MATCH`.
    #[inline]
    pub fn new_match(distance: usize, length: usize) -> Self {
        debug_assert!((1..=u16::MAX as usize).contains(&distance));
        debug_assert!((MIN_MATCH..=MAX_MATCH).contains(&length));
        Self::Match {
            distance: distance as u16,
            length: length as u16,
        }
    }

    /// Number of bytes this token occupies on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::EscapedLiteral(_) => 2,
            Self::Match { .. } => MATCH_TOKEN_LEN,
        }
    }

    /// Number of output bytes this token produces when decoded.
    #[inline]
    pub fn decoded_len(&self) -> usize {
        match self {
            Self::Literal(_) | Self::EscapedLiteral(_) => 1,
            Self::Match { length, .. } => *length as usize,
        }
    }

    /// Wire bytes of this token; only the first `encoded_len()` are used.
    #[inline]
    pub fn to_bytes(&self) -> [u8; MATCH_TOKEN_LEN] {
        match *self {
            Self::Literal(b) => [b, 0, 0, 0],
            Self::EscapedLiteral(b) => [ESCAPE_MARKER, b, 0, 0],
            Self::Match { distance, length } => {
                let [lo, hi] = distance.to_le_bytes();
                [MATCH_MARKER, lo, hi, (length as usize - MIN_MATCH) as u8]
            }
        }
    }

    /// Write the token if it fits entirely; otherwise write nothing.
    #[inline]
    pub fn write_to(&self, w: &mut ByteWriter<'_>) -> bool {
        w.put_slice(&self.to_bytes()[..self.encoded_len()])
    }
}

/// Whether a literal byte must be escaped.
#[inline(always)]
pub fn needs_escape(byte: u8) -> bool {
    byte >= ESCAPE_MARKER
}

// ---------------------------------------------------------------------------
// TokenReader
// ---------------------------------------------------------------------------

/// Iterator over the tokens of a stream payload.
///
/// Yields `(offset, token)` pairs. Stops after the first error.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    reader: ByteReader<'a>,
    failed: bool,
}

impl<'a> TokenReader<'a> {
    /// Read tokens from `payload` (the bytes following the header).
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(payload),
            failed: false,
        }
    }

    /// Offset of the next token.
    #[inline]
    pub fn offset(&self) -> usize {
        self.reader.position()
    }

    /// Unconsumed payload bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    fn next_token(&mut self) -> Option<Result<(usize, Token), CorruptError>> {
        let offset = self.reader.position();
        let lead = self.reader.read_u8()?;

        let token = match lead {
            ESCAPE_MARKER => match self.reader.read_u8() {
                Some(b) => Token::EscapedLiteral(b),
                None => {
                    return Some(Err(CorruptError::TruncatedToken {
                        offset,
                        needed: 2,
                        available: 1,
                    }));
                }
            },
            MATCH_MARKER => {
                let Some([lo, hi, code]) = self.reader.read_array::<3>() else {
                    return Some(Err(CorruptError::TruncatedToken {
                        offset,
                        needed: MATCH_TOKEN_LEN,
                        available: 1 + self.reader.remaining(),
                    }));
                };
                let distance = u16::from_le_bytes([lo, hi]);
                let length = code as usize + MIN_MATCH;
                if length > MAX_MATCH {
                    return Some(Err(CorruptError::MatchTooLong { offset, length }));
                }
                if distance == 0 {
                    return Some(Err(CorruptError::ZeroDistance { offset }));
                }
                Token::Match {
                    distance,
                    length: length as u16,
                }
            }
            b => Token::Literal(b),
        };

        Some(Ok((offset, token)))
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Result<(usize, Token), CorruptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token()?;
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
