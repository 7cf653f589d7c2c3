//! NEON lane primitives shared by the aarch64 kernel modules.

use crate::kernels::constants::{PI, SHUFFLE};

use core::arch::aarch64::{
    uint8x16_t, vaddq_u64, vaeseq_u8, vaesmcq_u8, vcombine_u64, vcreate_u64, vdupq_n_u8,
    veorq_u8, vgetq_lane_u64, vld1q_u64, vld1q_u8, vqtbl1q_u8, vreinterpretq_u64_u8,
    vreinterpretq_u8_u64,
};

/// One AES encryption round, bit-identical to x86 `AESENC`.
///
/// `AESE` with a zero key is `SubBytes(ShiftRows(block))`; `AESMC` applies
/// `MixColumns`; the trailing XOR adds the round key.
// SAFETY: NEON+AES guaranteed by callers (all kernel entry points are
// feature-gated by the dispatcher).
#[inline]
#[target_feature(enable = "neon")]
#[target_feature(enable = "aes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn aes_round(block: uint8x16_t, key: uint8x16_t) -> uint8x16_t {
    veorq_u8(vaesmcq_u8(vaeseq_u8(block, vdupq_n_u8(0))), key)
}

/// Build a lane from two little-endian 64-bit halves.
#[inline]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub(crate) unsafe fn set_u64x2(lo: u64, hi: u64) -> uint8x16_t {
    vreinterpretq_u8_u64(vcombine_u64(vcreate_u64(lo), vcreate_u64(hi)))
}

/// Lane-wise wrapping addition on the two 64-bit halves.
#[inline]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub(crate) unsafe fn add64(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
    vreinterpretq_u8_u64(vaddq_u64(vreinterpretq_u64_u8(a), vreinterpretq_u64_u8(b)))
}

/// The additive-lane byte permutation (`TBL` with the fixed mask).
#[inline]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub(crate) unsafe fn shuffle(v: uint8x16_t) -> uint8x16_t {
    vqtbl1q_u8(v, vld1q_u8(SHUFFLE.0.as_ptr()))
}

/// Load the π pair starting at `index` as one lane.
#[inline]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub(crate) unsafe fn load_pi(index: usize) -> uint8x16_t {
    vreinterpretq_u8_u64(vld1q_u64(PI.0.as_ptr().add(index)))
}

/// Low 64 bits of a lane.
#[inline]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
pub(crate) unsafe fn lane_lo(v: uint8x16_t) -> u64 {
    vgetq_lane_u64::<0>(vreinterpretq_u64_u8(v))
}
