//! NEON Wide Path
//!
//! Four independent AES/sum chains over 64-byte blocks in eight vector
//! registers, with the same tree reduction as every other backend.

use super::ops::{add64, aes_round, lane_lo, load_pi, set_u64x2, shuffle};
use super::short;
use crate::kernels::constants::{BLOCK_SIZE, SHORT_THRESHOLD};
use crate::types::HashState;

use core::arch::aarch64::{
    uint8x16_t, vdupq_n_u64, veorq_u8, vld1q_u8, vreinterpretq_u8_u64, vst1q_u8,
};

// =============================================================================
// FINALIZATION
// =============================================================================

// SAFETY: NEON+AES guaranteed by callers.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
unsafe fn finalize_wide(aes: [uint8x16_t; 4], sum: [uint8x16_t; 4], seed: u64, total: u64) -> u64 {
    let m0 = aes_round(sum[0], aes[0]);
    let m1 = aes_round(sum[1], aes[1]);
    let m2 = aes_round(sum[2], aes[2]);
    let m3 = aes_round(sum[3], aes[3]);
    let m01 = aes_round(m0, m1);
    let m23 = aes_round(m2, m3);
    let key = set_u64x2(seed.wrapping_add(total), seed);
    let m = aes_round(m01, m23);
    lane_lo(aes_round(aes_round(m, key), m))
}

// =============================================================================
// ONE-SHOT WIDE PATH
// =============================================================================

/// Four-lane hash for inputs of 64 bytes and up.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Block pointers advance
// in 16-byte steps inside `chunks_exact(64)` chunks; the zero-padded tail
// block lives on the stack.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn hash_wide(text: &[u8], seed: u64) -> u64 {
    let seed_vec = vreinterpretq_u8_u64(vdupq_n_u64(seed));
    let mut aes0 = veorq_u8(seed_vec, load_pi(0));
    let mut aes1 = veorq_u8(seed_vec, load_pi(2));
    let mut aes2 = veorq_u8(seed_vec, load_pi(4));
    let mut aes3 = veorq_u8(seed_vec, load_pi(6));
    let mut sum0 = veorq_u8(seed_vec, load_pi(8));
    let mut sum1 = veorq_u8(seed_vec, load_pi(10));
    let mut sum2 = veorq_u8(seed_vec, load_pi(12));
    let mut sum3 = veorq_u8(seed_vec, load_pi(14));

    macro_rules! absorb_block {
        ($ptr:expr) => {{
            let p = $ptr;
            let b0 = vld1q_u8(p);
            let b1 = vld1q_u8(p.add(16));
            let b2 = vld1q_u8(p.add(32));
            let b3 = vld1q_u8(p.add(48));
            aes0 = aes_round(aes0, b0);
            aes1 = aes_round(aes1, b1);
            aes2 = aes_round(aes2, b2);
            aes3 = aes_round(aes3, b3);
            sum0 = add64(shuffle(sum0), b0);
            sum1 = add64(shuffle(sum1), b1);
            sum2 = add64(shuffle(sum2), b2);
            sum3 = add64(shuffle(sum3), b3);
        }};
    }

    let mut chunks = text.chunks_exact(BLOCK_SIZE);
    for chunk in &mut chunks {
        absorb_block!(chunk.as_ptr());
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut block = [0u8; BLOCK_SIZE];
        block[..tail.len()].copy_from_slice(tail);
        absorb_block!(block.as_ptr());
    }

    finalize_wide(
        [aes0, aes1, aes2, aes3],
        [sum0, sum1, sum2, sum3],
        seed,
        text.len() as u64,
    )
}

// =============================================================================
// STREAMING ENTRY POINTS
// =============================================================================

/// Absorb a run of complete 64-byte blocks into the wide lanes of `state`.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Lane loads and stores
// cover exactly the 16-byte state fields.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn absorb(state: &mut HashState, blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % BLOCK_SIZE, 0);
    let mut aes = [
        vld1q_u8(state.aes[0].as_ptr()),
        vld1q_u8(state.aes[1].as_ptr()),
        vld1q_u8(state.aes[2].as_ptr()),
        vld1q_u8(state.aes[3].as_ptr()),
    ];
    let mut sum = [
        vld1q_u8(state.sum[0].as_ptr()),
        vld1q_u8(state.sum[1].as_ptr()),
        vld1q_u8(state.sum[2].as_ptr()),
        vld1q_u8(state.sum[3].as_ptr()),
    ];

    for block in blocks.chunks_exact(BLOCK_SIZE) {
        for i in 0..4 {
            let b = vld1q_u8(block.as_ptr().add(i * 16));
            aes[i] = aes_round(aes[i], b);
            sum[i] = add64(shuffle(sum[i]), b);
        }
    }

    for i in 0..4 {
        vst1q_u8(state.aes[i].as_mut_ptr(), aes[i]);
        vst1q_u8(state.sum[i].as_mut_ptr(), sum[i]);
    }
}

/// Finalize a streamed state without mutating it.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Works on register
// copies of the lanes; the state itself is only read.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn fold(state: &HashState) -> u64 {
    if state.ins_length < SHORT_THRESHOLD as u64 {
        return short::fold_short(state);
    }

    let mut aes = [
        vld1q_u8(state.aes[0].as_ptr()),
        vld1q_u8(state.aes[1].as_ptr()),
        vld1q_u8(state.aes[2].as_ptr()),
        vld1q_u8(state.aes[3].as_ptr()),
    ];
    let mut sum = [
        vld1q_u8(state.sum[0].as_ptr()),
        vld1q_u8(state.sum[1].as_ptr()),
        vld1q_u8(state.sum[2].as_ptr()),
        vld1q_u8(state.sum[3].as_ptr()),
    ];

    // A non-empty tail sits zero-padded in the staging buffer.
    if state.ins_length % BLOCK_SIZE as u64 != 0 {
        for i in 0..4 {
            let b = vld1q_u8(state.ins.as_ptr().add(i * 16));
            aes[i] = aes_round(aes[i], b);
            sum[i] = add64(shuffle(sum[i]), b);
        }
    }

    finalize_wide(aes, sum, state.seed(), state.ins_length)
}
