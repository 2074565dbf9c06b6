// Vector-width byte comparison for match-length measurement.
//
// Platform kernels (AVX2 on x86_64 with SSE2 as the baseline, NEON on
// aarch64, 8-byte words everywhere else) compare one block per step and
// locate the first mismatch inside a failing block by bit-scanning the
// inverted equality mask.  A byte-wise loop finishes the tail shorter than
// one block.
//
// Every kernel takes slices and a limit `n <= min(s1.len(), s2.len())`, and
// a full block is loaded only while `i + WIDTH <= n`, so no load ever
// touches memory past the end of either slice.

/// Function pointer type for forward match scanning routines.
pub type MatchFn = fn(&[u8], &[u8], usize) -> usize;

/// The comparator picked for this CPU.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    /// Short name for diagnostics (`avx2`, `sse2`, `neon`, `word`).
    pub name: &'static str,
    /// Bytes compared per step.
    pub width: usize,
    /// The kernel itself.
    pub func: MatchFn,
}

const WORD: Comparator = Comparator {
    name: "word",
    width: 8,
    func: forward_match_word,
};

/// Count how many leading bytes of `s1` and `s2` are equal, up to `n`.
///
/// `n` is clamped to the shorter of the two slices.
#[inline]
pub fn forward_match(s1: &[u8], s2: &[u8], n: usize) -> usize {
    (comparator().func)(s1, s2, n.min(s1.len()).min(s2.len()))
}

/// Get the best forward-match implementation for the current CPU.
#[inline]
pub fn comparator() -> Comparator {
    #[cfg(target_arch = "x86_64")]
    {
        return x86_dispatch();
    }

    #[cfg(target_arch = "aarch64")]
    {
        return Comparator {
            name: "neon",
            width: 16,
            func: forward_match_neon_call,
        };
    }

    #[allow(unreachable_code)]
    WORD
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn x86_dispatch() -> Comparator {
    use std::sync::OnceLock;
    static DISPATCH: OnceLock<Comparator> = OnceLock::new();
    *DISPATCH.get_or_init(|| {
        if is_x86_feature_detected!("avx2") {
            Comparator {
                name: "avx2",
                width: 32,
                func: forward_match_avx2_call,
            }
        } else if is_x86_feature_detected!("sse2") {
            Comparator {
                name: "sse2",
                width: 16,
                func: forward_match_sse2_call,
            }
        } else {
            WORD
        }
    })
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn forward_match_avx2_call(s1: &[u8], s2: &[u8], n: usize) -> usize {
    let n = n.min(s1.len()).min(s2.len());
    // Safety: CPU feature is checked once in dispatcher initialization.
    unsafe { forward_match_avx2(s1, s2, n) }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn forward_match_sse2_call(s1: &[u8], s2: &[u8], n: usize) -> usize {
    let n = n.min(s1.len()).min(s2.len());
    // Safety: CPU feature is checked once in dispatcher initialization.
    unsafe { forward_match_sse2(s1, s2, n) }
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn forward_match_neon_call(s1: &[u8], s2: &[u8], n: usize) -> usize {
    let n = n.min(s1.len()).min(s2.len());
    // Safety: NEON is mandatory on aarch64.
    unsafe { forward_match_neon(s1, s2, n) }
}

/// Portable kernel: compare 8 bytes at a time as little-endian words.
#[inline]
pub fn forward_match_word(s1: &[u8], s2: &[u8], n: usize) -> usize {
    let n = n.min(s1.len()).min(s2.len());
    let mut i = 0;

    while i + 8 <= n {
        let (Some(a), Some(b)) = (s1[i..].first_chunk::<8>(), s2[i..].first_chunk::<8>()) else {
            break;
        };
        let xor = u64::from_le_bytes(*a) ^ u64::from_le_bytes(*b);
        if xor != 0 {
            return i + (xor.trailing_zeros() / 8) as usize;
        }
        i += 8;
    }

    forward_match_bytes(s1, s2, i, n)
}

/// Byte-wise tail shared by every kernel.
#[inline(always)]
fn forward_match_bytes(s1: &[u8], s2: &[u8], mut i: usize, n: usize) -> usize {
    while i < n && s1[i] == s2[i] {
        i += 1;
    }
    i
}

// ---------------------------------------------------------------------------
// x86_64 AVX2 (32 bytes at a time)
// ---------------------------------------------------------------------------

/// # Safety
/// Requires AVX2 and `n <= min(s1.len(), s2.len())`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn forward_match_avx2(s1: &[u8], s2: &[u8], n: usize) -> usize {
    use std::arch::x86_64::*;
    let mut i = 0;

    unsafe {
        while i + 32 <= n {
            let a = _mm256_loadu_si256(s1.as_ptr().add(i) as *const __m256i);
            let b = _mm256_loadu_si256(s2.as_ptr().add(i) as *const __m256i);
            let mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(a, b)) as u32;
            if mask != u32::MAX {
                return i + (!mask).trailing_zeros() as usize;
            }
            i += 32;
        }

        if i + 16 <= n {
            let a = _mm_loadu_si128(s1.as_ptr().add(i) as *const __m128i);
            let b = _mm_loadu_si128(s2.as_ptr().add(i) as *const __m128i);
            let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(a, b)) as u16;
            if mask != u16::MAX {
                return i + (!mask).trailing_zeros() as usize;
            }
            i += 16;
        }
    }

    forward_match_bytes(s1, s2, i, n)
}

// ---------------------------------------------------------------------------
// x86_64 SSE2 (16 bytes at a time)
// ---------------------------------------------------------------------------

/// # Safety
/// Requires SSE2 and `n <= min(s1.len(), s2.len())`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn forward_match_sse2(s1: &[u8], s2: &[u8], n: usize) -> usize {
    use std::arch::x86_64::*;
    let mut i = 0;

    unsafe {
        while i + 16 <= n {
            let a = _mm_loadu_si128(s1.as_ptr().add(i) as *const __m128i);
            let b = _mm_loadu_si128(s2.as_ptr().add(i) as *const __m128i);
            let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(a, b)) as u16;
            if mask != u16::MAX {
                return i + (!mask).trailing_zeros() as usize;
            }
            i += 16;
        }
    }

    forward_match_bytes(s1, s2, i, n)
}

// ---------------------------------------------------------------------------
// aarch64 NEON (16 bytes at a time)
// ---------------------------------------------------------------------------

/// # Safety
/// Requires `n <= min(s1.len(), s2.len())`.
#[cfg(target_arch = "aarch64")]
unsafe fn forward_match_neon(s1: &[u8], s2: &[u8], n: usize) -> usize {
    use std::arch::aarch64::*;
    let mut i = 0;

    unsafe {
        while i + 16 <= n {
            let a = vld1q_u8(s1.as_ptr().add(i));
            let b = vld1q_u8(s2.as_ptr().add(i));
            let eq = vceqq_u8(a, b);
            // Narrow to one nibble per byte so the mask fits in a u64.
            let nibbles = vshrn_n_u16::<4>(vreinterpretq_u16_u8(eq));
            let mask = vget_lane_u64::<0>(vreinterpret_u64_u8(nibbles));
            if mask != u64::MAX {
                return i + ((!mask).trailing_zeros() / 4) as usize;
            }
            i += 16;
        }
    }

    forward_match_bytes(s1, s2, i, n)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
