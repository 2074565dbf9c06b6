// Hash-chain index for the match finder.
//
// Two tables, both allocated per compression call:
//   - `head`: HASH_SIZE buckets, bucket -> most recent position with that
//     3-byte prefix hash.
//   - `chain`: `window` slots, ring-indexed by `pos % window`, holding the
//     position that was the bucket head before `pos` was inserted.
//
// Stored values are `pos + HASH_OFFSET` so that 0 means "empty" and
// position 0 can still be referenced.

use super::config::HASH_SIZE;

/// Offset added to stored positions so 0 means "empty".
pub const HASH_OFFSET: u32 = 1;

/// Head table plus previous-occurrence ring.
pub struct HashChain {
    /// `head[bucket] = pos + HASH_OFFSET` or 0 (empty).
    head: Vec<u32>,
    /// `chain[pos % window] = previous head + HASH_OFFSET` or 0.
    chain: Vec<u32>,
    window: usize,
}

impl HashChain {
    /// Create empty tables for a window of `window` bytes.
    pub fn new(window: usize) -> Self {
        debug_assert!(window > 0);
        Self {
            head: vec![0u32; HASH_SIZE],
            chain: vec![0u32; window],
            window,
        }
    }

    /// Window (and ring capacity) in bytes.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Make `pos` the newest entry of `bucket`, returning the entry it
    /// replaced.
    ///
    /// Only touches `head`; the ring slot is written by [`link`](Self::link)
    /// once the caller is done walking the chain, so that a candidate sharing
    /// `pos`'s ring slot (exactly one window back) still sees its own link.
    #[inline(always)]
    pub fn push_head(&mut self, bucket: usize, pos: usize) -> Option<usize> {
        let stored = HASH_OFFSET + pos as u32;
        let old = std::mem::replace(&mut self.head[bucket], stored);
        decode_slot(old)
    }

    /// Record `prev` as the previous occurrence of `pos`'s bucket.
    #[inline(always)]
    pub fn link(&mut self, pos: usize, prev: Option<usize>) {
        let slot = pos % self.window;
        self.chain[slot] = prev.map_or(0, |p| HASH_OFFSET + p as u32);
    }

    /// Combined index update: `push_head` followed immediately by `link`.
    #[inline]
    pub fn update(&mut self, bucket: usize, pos: usize) -> Option<usize> {
        let prev = self.push_head(bucket, pos);
        self.link(pos, prev);
        prev
    }

    /// Most recent position stored for `bucket`.
    #[inline]
    pub fn lookup(&self, bucket: usize) -> Option<usize> {
        decode_slot(self.head[bucket])
    }

    /// Follow the chain one step back from `pos`.
    ///
    /// Returns `None` at the end of the chain, or when the ring slot has
    /// been recycled by a newer position (the link would point forward).
    #[inline]
    pub fn chain_prev(&self, pos: usize) -> Option<usize> {
        let prev = decode_slot(self.chain[pos % self.window])?;
        if prev >= pos {
            return None;
        }
        Some(prev)
    }
}

#[inline(always)]
fn decode_slot(val: u32) -> Option<usize> {
    if val != 0 {
        Some((val - HASH_OFFSET) as usize)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
