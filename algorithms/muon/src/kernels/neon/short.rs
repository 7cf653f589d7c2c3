//! NEON Short Path
//!
//! Single-lane kernel for inputs below 64 bytes, plus the matching fold for
//! streamed states whose total stayed short. Mirrors the AES-NI short path
//! instruction for instruction.

use super::ops::{add64, aes_round, lane_lo, load_pi, set_u64x2, shuffle};
use crate::kernels::constants::LANE_SIZE;
use crate::types::HashState;

use core::arch::aarch64::{uint8x16_t, vdupq_n_u64, veorq_u8, vld1q_u8, vreinterpretq_u8_u64};

// =============================================================================
// HELPERS
// =============================================================================

/// Load the trailing 16 bytes of `text` and shift the lane right by `shift`
/// bytes (as a little-endian 128-bit integer, high bytes become zero).
#[inline]
fn tail_shifted(text: &[u8], shift: usize) -> (u64, u64) {
    let mut w = [0u8; 16];
    w.copy_from_slice(&text[text.len() - 16..]);
    let v = u128::from_le_bytes(w) >> (8 * shift);
    (v as u64, (v >> 64) as u64)
}

/// Key bump plus the double mixing round shared by all finalization paths.
// SAFETY: NEON+AES guaranteed by callers.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn finalize_lane(aes: uint8x16_t, sum: uint8x16_t, seed: u64, total: u64) -> u64 {
    let key = set_u64x2(seed.wrapping_add(total), seed);
    let m = aes_round(sum, aes);
    lane_lo(aes_round(aes_round(m, key), m))
}

// =============================================================================
// ONE-SHOT SHORT PATH
// =============================================================================

/// Single-lane hash for inputs below 64 bytes.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Each branch only
// dereferences offsets its length guard admits.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn hash_short(text: &[u8], seed: u64) -> u64 {
    let seed_vec = vreinterpretq_u8_u64(vdupq_n_u64(seed));
    let mut aes = veorq_u8(seed_vec, load_pi(0));
    let mut sum = veorq_u8(seed_vec, load_pi(8));

    macro_rules! absorb {
        ($block:expr) => {{
            let b = $block;
            aes = aes_round(aes, b);
            sum = add64(shuffle(sum), b);
        }};
    }

    let n = text.len();
    if n <= 16 {
        let mut buf = [0u8; LANE_SIZE];
        buf[..n].copy_from_slice(text);
        absorb!(vld1q_u8(buf.as_ptr()));
    } else if n <= 32 {
        absorb!(vld1q_u8(text.as_ptr()));
        let (lo, hi) = tail_shifted(text, 32 - n);
        absorb!(set_u64x2(lo, hi));
    } else if n <= 48 {
        absorb!(vld1q_u8(text.as_ptr()));
        absorb!(vld1q_u8(text.as_ptr().add(16)));
        let (lo, hi) = tail_shifted(text, 48 - n);
        absorb!(set_u64x2(lo, hi));
    } else {
        absorb!(vld1q_u8(text.as_ptr()));
        absorb!(vld1q_u8(text.as_ptr().add(16)));
        absorb!(vld1q_u8(text.as_ptr().add(32)));
        let (lo, hi) = tail_shifted(text, 64 - n);
        absorb!(set_u64x2(lo, hi));
    }

    finalize_lane(aes, sum, seed, n as u64)
}

// =============================================================================
// STREAMED SHORT FOLD
// =============================================================================

/// Fold a streamed state whose total input stayed below 64 bytes. The staged
/// bytes sit zero-padded in `ins`, so 16-byte window loads reproduce the
/// one-shot block dispatch.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Window loads stay
// inside the 64-byte staging buffer.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn fold_short(state: &HashState) -> u64 {
    let mut aes = vld1q_u8(state.aes[0].as_ptr());
    let mut sum = vld1q_u8(state.sum[0].as_ptr());

    let n = state.ins_length as usize;
    let blocks = 1 + n.saturating_sub(1) / LANE_SIZE;
    for k in 0..blocks {
        let w = vld1q_u8(state.ins.as_ptr().add(k * LANE_SIZE));
        aes = aes_round(aes, w);
        sum = add64(shuffle(sum), w);
    }

    finalize_lane(aes, sum, state.seed(), state.ins_length)
}
