// Fixed 14-byte stream header.
//
// Layout (all little-endian):
//   0..4    magic
//   4..8    original (uncompressed) size
//   8..12   CRC-32 of the original bytes
//   12..14  window size used by the encoder

use super::cursor::{ByteReader, ByteWriter};
use crate::hash::config;

/// Stream magic; `50 5A 4E 5A` on disk.
pub const MAGIC: u32 = 0x5A4E_5A50;

/// Encoded header size in bytes.
pub const HEADER_LEN: usize = 14;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Header-level problems, detected before any token is decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("input is {0} bytes, shorter than the 14-byte header")]
    TooShort(usize),
    #[error("bad magic {0:#010X}, expected 0x5A4E5A50")]
    BadMagic(u32),
    #[error("window size {0} outside [1024, 65535]")]
    BadWindow(u16),
    #[error("declared size {declared} exceeds output capacity {capacity}")]
    OutputTooSmall { declared: usize, capacity: usize },
    #[error("declared size {declared} cannot be produced from {payload} payload bytes")]
    ImplausibleSize { declared: usize, payload: usize },
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Parsed stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Exact number of bytes the decoder must produce.
    pub original_size: u32,
    /// CRC-32 of the original bytes.
    pub checksum: u32,
    /// Window the encoder ran with.
    pub window_size: u16,
}

impl Header {
    /// Build a header for a compression run, clamping `window_hint` the same
    /// way the encoder does.
    pub fn new(original_size: u32, checksum: u32, window_hint: usize) -> Self {
        Self {
            original_size,
            checksum,
            window_size: config::clamp_window(window_hint),
        }
    }

    /// Serialize to the 14-byte wire form.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        out[4..8].copy_from_slice(&self.original_size.to_le_bytes());
        out[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        out[12..14].copy_from_slice(&self.window_size.to_le_bytes());
        out
    }

    /// Write the header through a bounded writer. Returns `false` if the
    /// writer has fewer than `HEADER_LEN` bytes of room.
    pub fn write_to(&self, w: &mut ByteWriter<'_>) -> bool {
        w.put_slice(&self.encode())
    }

    /// Parse and validate the header at the start of `input`.
    ///
    /// Checks the length, magic and window range. The window is never
    /// clamped here.
    pub fn decode(input: &[u8]) -> Result<Self, FormatError> {
        let mut r = ByteReader::new(input);
        let (Some(magic), Some(original_size), Some(checksum), Some(window_size)) = (
            r.read_u32_le(),
            r.read_u32_le(),
            r.read_u32_le(),
            r.read_u16_le(),
        ) else {
            return Err(FormatError::TooShort(input.len()));
        };

        if magic != MAGIC {
            return Err(FormatError::BadMagic(magic));
        }
        if !config::is_valid_window(window_size) {
            return Err(FormatError::BadWindow(window_size));
        }

        Ok(Self {
            original_size,
            checksum,
            window_size,
        })
    }

    /// Declared size as `usize`.
    #[inline]
    pub fn original_len(&self) -> usize {
        self.original_size as usize
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
