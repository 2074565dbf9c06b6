// Match finder tuning constants and window sizing.
//
// Every value here is part of the on-wire contract or bounds one: changing
// MIN_MATCH/MAX_MATCH changes the meaning of the match token's length byte,
// and the window bounds are validated by the decoder.

/// Shortest back-reference the encoder emits.
pub const MIN_MATCH: usize = 3;

/// Longest back-reference: `MIN_MATCH + 255`, the largest value the
/// token's length byte can carry.
pub const MAX_MATCH: usize = 258;

/// Number of index bits produced by the prefix hash (16384 buckets).
pub const HASH_BITS: u32 = 14;

/// Bucket count of the `head` table.
pub const HASH_SIZE: usize = 1 << HASH_BITS;

/// Maximum number of chain candidates examined per position.
pub const MATCH_SEARCH_LIMIT: usize = 32;

/// Smallest window a stream may declare.
pub const MIN_WINDOW: usize = 1 << 10;

/// Largest window; distances are carried in 16 bits.
pub const MAX_WINDOW: usize = (1 << 16) - 1;

/// Window used when the caller passes a hint of 0.
pub const DEFAULT_WINDOW: usize = MAX_WINDOW;

/// Resolve a caller's window hint to the value used for a compression run.
///
/// `0` selects [`DEFAULT_WINDOW`]; anything else is clamped into
/// `[MIN_WINDOW, MAX_WINDOW]`.
pub fn clamp_window(hint: usize) -> u16 {
    let window = if hint == 0 {
        DEFAULT_WINDOW
    } else {
        hint.clamp(MIN_WINDOW, MAX_WINDOW)
    };
    // MAX_WINDOW fits in u16.
    window as u16
}

/// Whether a window read from a stream header is acceptable.
#[inline]
pub fn is_valid_window(window: u16) -> bool {
    (MIN_WINDOW..=MAX_WINDOW).contains(&(window as usize))
}
