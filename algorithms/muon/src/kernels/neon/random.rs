//! NEON Pseudo-Random Generator
//!
//! Counter mode, one AES round per 128-bit block, keyed by the cycling
//! `nonce ^ PI` pairs.

use super::ops::{aes_round, set_u64x2};
use crate::kernels::constants::{LANE_SIZE, PI};

use core::arch::aarch64::{uint8x16_t, vst1q_u8};

/// Fill `dst` deterministically from `nonce`.
// SAFETY: Requires NEON+AES (enforced by dispatcher). Full blocks store into
// exact 16-byte chunks; the final partial block goes through a stack buffer.
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub unsafe fn generate(dst: &mut [u8], nonce: u64) {
    let keys: [uint8x16_t; 4] = [
        set_u64x2(nonce ^ PI.0[0], nonce ^ PI.0[1]),
        set_u64x2(nonce ^ PI.0[2], nonce ^ PI.0[3]),
        set_u64x2(nonce ^ PI.0[4], nonce ^ PI.0[5]),
        set_u64x2(nonce ^ PI.0[6], nonce ^ PI.0[7]),
    ];

    let mut index = 0u64;
    let mut chunks = dst.chunks_exact_mut(LANE_SIZE);
    for chunk in &mut chunks {
        let counter = nonce.wrapping_add(index);
        let block = aes_round(set_u64x2(counter, counter), keys[(index % 4) as usize]);
        vst1q_u8(chunk.as_mut_ptr(), block);
        index += 1;
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let counter = nonce.wrapping_add(index);
        let block = aes_round(set_u64x2(counter, counter), keys[(index % 4) as usize]);
        let mut buf = [0u8; LANE_SIZE];
        vst1q_u8(buf.as_mut_ptr(), block);
        tail.copy_from_slice(&buf[..tail.len()]);
    }
}
