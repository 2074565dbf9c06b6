// Validating token replay.
//
// The header is checked before any token is read.  Each match is then
// re-validated against the current output position and the declared size
// before its bytes are copied, so a hostile stream can neither read before
// the start of the output nor write past its end.  Decoding stops once the
// declared size is reached; any bytes after that are ignored.

use crate::format::checksum::crc32;
use crate::format::header::{FormatError, HEADER_LEN, Header};
use crate::format::token::{CorruptError, MATCH_TOKEN_LEN, Token, TokenReader};
use crate::hash::config::MAX_MATCH;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid header: {0}")]
    Format(#[from] FormatError),
    #[error("corrupt stream: {0}")]
    Corrupt(#[from] CorruptError),
    #[error("decoded {actual} bytes, header declares {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("checksum mismatch: header {expected:#010x}, decoded {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decompress `input` into `output`, returning the number of bytes written.
///
/// `output` must hold at least the size declared in the header. On error
/// the contents of `output` are unspecified.
pub fn decompress_into(input: &[u8], output: &mut [u8]) -> Result<usize, DecodeError> {
    let header = Header::decode(input)?;
    let size = header.original_len();
    if size > output.len() {
        return fail(FormatError::OutputTooSmall {
            declared: size,
            capacity: output.len(),
        });
    }
    decode_payload(&header, &input[HEADER_LEN..], &mut output[..size])
}

/// Decompress `input` into a freshly allocated buffer.
///
/// Headers declaring more output than the payload could expand to are
/// rejected before anything is allocated.
pub fn decode_all(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let header = Header::decode(input)?;
    let size = header.original_len();
    let payload = &input[HEADER_LEN..];
    if size > max_decoded_len(payload.len()) {
        return fail(FormatError::ImplausibleSize {
            declared: size,
            payload: payload.len(),
        });
    }
    let mut out = vec![0u8; size];
    decode_payload(&header, payload, &mut out)?;
    Ok(out)
}

/// Largest output `payload_len` bytes of tokens can produce: all matches of
/// maximum length, plus up to three trailing literals.
pub fn max_decoded_len(payload_len: usize) -> usize {
    let full = payload_len / MATCH_TOKEN_LEN;
    let tail = payload_len % MATCH_TOKEN_LEN;
    full.saturating_mul(MAX_MATCH).saturating_add(tail)
}

fn decode_payload(header: &Header, payload: &[u8], out: &mut [u8]) -> Result<usize, DecodeError> {
    let size = out.len();
    let produced = match replay(payload, out) {
        Ok(n) => n,
        Err(e) => return fail(e),
    };
    if produced != size {
        return fail(DecodeError::SizeMismatch {
            expected: size,
            actual: produced,
        });
    }

    let actual = crc32(out);
    if actual != header.checksum {
        return fail(DecodeError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }

    log::debug!(
        "decompressed {} -> {} bytes (window={})",
        payload.len() + HEADER_LEN,
        size,
        header.window_size
    );
    Ok(size)
}

/// Replay tokens into `out` until it is full or the payload runs out.
/// Returns the number of bytes produced.
fn replay(payload: &[u8], out: &mut [u8]) -> Result<usize, CorruptError> {
    let declared = out.len();
    let mut tokens = TokenReader::new(payload);
    let mut out_pos = 0usize;

    while out_pos < declared {
        let Some(item) = tokens.next() else {
            break;
        };
        let (offset, token) = item?;
        match token {
            Token::Literal(b) | Token::EscapedLiteral(b) => {
                out[out_pos] = b;
                out_pos += 1;
            }
            Token::Match { distance, length } => {
                let distance = distance as usize;
                let length = length as usize;
                if distance > out_pos {
                    return Err(CorruptError::DistanceBeyondOutput {
                        offset,
                        distance,
                        out_pos,
                    });
                }
                let end = out_pos + length;
                if end > declared {
                    return Err(CorruptError::OverrunsDeclaredSize {
                        offset,
                        end,
                        declared,
                    });
                }
                copy_match(out, out_pos, distance, length);
                out_pos = end;
            }
        }
    }

    Ok(out_pos)
}

/// Copy `length` bytes from `distance` back to `pos`.
///
/// When the source overlaps the destination each byte must see the ones
/// written before it (distance 1 repeats a single byte).
#[inline]
fn copy_match(out: &mut [u8], pos: usize, distance: usize, length: usize) {
    let src = pos - distance;
    if distance >= length {
        out.copy_within(src..src + length, pos);
    } else {
        for i in 0..length {
            out[pos + i] = out[src + i];
        }
    }
}

fn fail<T>(err: impl Into<DecodeError>) -> Result<T, DecodeError> {
    let err = err.into();
    log::debug!("decompression failed: {err}");
    Err(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
