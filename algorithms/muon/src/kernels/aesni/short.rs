//! AES-NI Short Path
//!
//! Single-lane kernel for inputs below 64 bytes, and the matching fold for
//! streamed states whose total stayed short. Also used by the AVX-512
//! dispatch wrapper, which has no 512-bit work to do at these sizes.

#![allow(clippy::cast_possible_wrap)]

use crate::kernels::constants::{LANE_SIZE, PI, SHUFFLE};
use crate::types::HashState;

use core::arch::x86_64::{
    __m128i, _mm_add_epi64, _mm_aesenc_si128, _mm_cvtsi128_si64, _mm_loadu_si128, _mm_set_epi64x,
    _mm_shuffle_epi8, _mm_xor_si128,
};

// =============================================================================
// HELPERS
// =============================================================================

/// Load the trailing 16 bytes of `text` and shift the lane right by `shift`
/// bytes (as a little-endian 128-bit integer, high bytes become zero).
#[inline]
fn load_tail_shifted(text: &[u8], shift: usize) -> (i64, i64) {
    let mut w = [0u8; 16];
    w.copy_from_slice(&text[text.len() - 16..]);
    let v = u128::from_le_bytes(w) >> (8 * shift);
    (v as u64 as i64, (v >> 64) as u64 as i64)
}

/// Key bump plus the double mixing round shared by all finalization paths.
// SAFETY: AES/SSE2 guaranteed by callers (all are feature-gated).
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub(crate) unsafe fn finalize_lane(aes: __m128i, sum: __m128i, seed: u64, total: u64) -> u64 {
    let key = _mm_set_epi64x(seed as i64, seed.wrapping_add(total) as i64);
    let m = _mm_aesenc_si128(sum, aes);
    let out = _mm_aesenc_si128(_mm_aesenc_si128(m, key), m);
    _mm_cvtsi128_si64(out) as u64
}

// =============================================================================
// ONE-SHOT SHORT PATH
// =============================================================================

/// Single-lane hash for inputs below 64 bytes.
///
/// Whole 16-byte blocks come straight from the input; a ragged tail re-reads
/// the last 16 bytes and shifts them down in-register, covering every byte
/// without a masked load.
// SAFETY: Requires AES/SSE2/SSSE3 (enforced by dispatcher). All loads are
// in-bounds: each branch only dereferences offsets its length guard admits.
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn hash_short(text: &[u8], seed: u64) -> u64 {
    let shuf = _mm_loadu_si128(SHUFFLE.0.as_ptr().cast());
    let seed_vec = _mm_set_epi64x(seed as i64, seed as i64);
    let pi = PI.0.as_ptr();
    let mut aes = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.cast()));
    let mut sum = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(8).cast()));

    macro_rules! absorb {
        ($block:expr) => {{
            let b = $block;
            aes = _mm_aesenc_si128(aes, b);
            sum = _mm_add_epi64(_mm_shuffle_epi8(sum, shuf), b);
        }};
    }

    let n = text.len();
    if n <= 16 {
        let mut buf = [0u8; LANE_SIZE];
        buf[..n].copy_from_slice(text);
        absorb!(_mm_loadu_si128(buf.as_ptr().cast()));
    } else if n <= 32 {
        absorb!(_mm_loadu_si128(text.as_ptr().cast()));
        let (lo, hi) = load_tail_shifted(text, 32 - n);
        absorb!(_mm_set_epi64x(hi, lo));
    } else if n <= 48 {
        absorb!(_mm_loadu_si128(text.as_ptr().cast()));
        absorb!(_mm_loadu_si128(text.as_ptr().add(16).cast()));
        let (lo, hi) = load_tail_shifted(text, 48 - n);
        absorb!(_mm_set_epi64x(hi, lo));
    } else {
        absorb!(_mm_loadu_si128(text.as_ptr().cast()));
        absorb!(_mm_loadu_si128(text.as_ptr().add(16).cast()));
        absorb!(_mm_loadu_si128(text.as_ptr().add(32).cast()));
        let (lo, hi) = load_tail_shifted(text, 64 - n);
        absorb!(_mm_set_epi64x(hi, lo));
    }

    finalize_lane(aes, sum, seed, n as u64)
}

// =============================================================================
// STREAMED SHORT FOLD
// =============================================================================

/// Fold a streamed state whose total input stayed below 64 bytes.
///
/// Only lane 0 has been touched; the staged bytes sit zero-padded in `ins`,
/// so plain 16-byte window loads reproduce the one-shot block dispatch.
// SAFETY: Requires AES/SSE2/SSSE3 (enforced by dispatcher). Window loads stay
// inside the 64-byte staging buffer (at most four windows).
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn fold_short(state: &HashState) -> u64 {
    let shuf = _mm_loadu_si128(SHUFFLE.0.as_ptr().cast());
    let mut aes = _mm_loadu_si128(state.aes[0].as_ptr().cast());
    let mut sum = _mm_loadu_si128(state.sum[0].as_ptr().cast());

    let n = state.ins_length as usize;
    let blocks = 1 + n.saturating_sub(1) / LANE_SIZE;
    for k in 0..blocks {
        let w = _mm_loadu_si128(state.ins.as_ptr().add(k * LANE_SIZE).cast());
        aes = _mm_aesenc_si128(aes, w);
        sum = _mm_add_epi64(_mm_shuffle_epi8(sum, shuf), w);
    }

    finalize_lane(aes, sum, state.seed(), state.ins_length)
}
