// Hash-chain match finder.
//
// For each position the finder:
//   1. hashes the 3-byte prefix and makes the position the bucket head,
//   2. walks the previous occurrences newest-to-oldest (at most
//      MATCH_SEARCH_LIMIT of them, stopping at the first one outside the
//      window),
//   3. measures each candidate with the vector comparator,
//   4. links the position into the chain ring.
//
// Ties keep the earlier (nearer) candidate, so the shortest distance wins
// among equally long matches.

use super::compare::{self, MatchFn};
use super::config::{MATCH_SEARCH_LIMIT, MAX_MATCH, MIN_MATCH};
use super::prefix::hash3;
use super::table::HashChain;

// ---------------------------------------------------------------------------
// Match result
// ---------------------------------------------------------------------------

/// A back-reference found by the finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Number of matching bytes, `MIN_MATCH..=MAX_MATCH`.
    pub length: usize,
    /// Earlier position the bytes are copied from.
    pub source: usize,
}

impl Match {
    /// Distance from `pos` back to the source.
    #[inline]
    pub fn distance(&self, pos: usize) -> usize {
        pos - self.source
    }
}

// ---------------------------------------------------------------------------
// Match finder
// ---------------------------------------------------------------------------

/// Per-call match finder state: the hash-chain index plus the comparator
/// selected for this CPU.
pub struct MatchFinder {
    chain: HashChain,
    window: usize,
    search_limit: usize,
    forward_match_fn: MatchFn,
}

impl MatchFinder {
    /// Create a finder with fresh tables for `window` bytes of history.
    pub fn new(window: usize) -> Self {
        Self {
            chain: HashChain::new(window),
            window,
            search_limit: MATCH_SEARCH_LIMIT,
            forward_match_fn: compare::comparator().func,
        }
    }

    /// Override the comparator (used to exercise the portable kernel).
    pub fn with_match_fn(mut self, f: MatchFn) -> Self {
        self.forward_match_fn = f;
        self
    }

    /// Window (maximum distance) in bytes.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Index `pos` and return the best match for `data[pos..]`, if any.
    ///
    /// Must be called once for every position the encoder stops at, in
    /// increasing order.  Positions with fewer than `MIN_MATCH` bytes
    /// remaining are neither indexed nor matched.
    pub fn find(&mut self, data: &[u8], pos: usize) -> Option<Match> {
        let end = data.len();
        if pos + MIN_MATCH > end {
            return None;
        }

        let bucket = hash3(&data[pos..]);
        let prev_head = self.chain.push_head(bucket, pos);

        let max_len = (end - pos).min(MAX_MATCH);
        let current = &data[pos..];

        let mut best_len = 0usize;
        let mut best_source = 0usize;
        let mut candidate = prev_head;
        let mut steps = 0usize;

        while let Some(cand) = candidate {
            if steps == self.search_limit {
                break;
            }
            steps += 1;

            if cand == pos {
                candidate = self.chain.chain_prev(cand);
                continue;
            }

            // Older candidates are only further away.
            if pos - cand > self.window {
                break;
            }

            let len = (self.forward_match_fn)(&data[cand..], current, max_len);

            if len > best_len && len >= MIN_MATCH {
                best_len = len;
                best_source = cand;
                if len >= MAX_MATCH {
                    break;
                }
            }

            candidate = self.chain.chain_prev(cand);
        }

        self.chain.link(pos, prev_head);

        if best_len < MIN_MATCH {
            return None;
        }

        log::trace!(
            "match at {pos}: length={best_len} distance={}",
            pos - best_source
        );

        Some(Match {
            length: best_len,
            source: best_source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
