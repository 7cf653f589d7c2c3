//! NEON Byte-Sum
//!
//! `UADDLV` collapses each 16-byte chunk into one widened sum; the scalar
//! tail finishes the ragged end.

use crate::kernels::constants::LANE_SIZE;

use core::arch::aarch64::{vaddlvq_u8, vld1q_u8};

/// Wrapping 64-bit sum of input bytes.
// SAFETY: Requires NEON (enforced by dispatcher). Loads cover exactly the
// 16-byte chunks produced by `chunks_exact`.
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub unsafe fn bytesum(text: &[u8]) -> u64 {
    let mut total = 0u64;

    let mut chunks = text.chunks_exact(LANE_SIZE);
    for chunk in &mut chunks {
        total = total.wrapping_add(u64::from(vaddlvq_u8(vld1q_u8(chunk.as_ptr()))));
    }
    for &b in chunks.remainder() {
        total = total.wrapping_add(u64::from(b));
    }
    total
}
