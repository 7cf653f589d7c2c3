//! AES-NI Byte-Sum
//!
//! `PSADBW` against zero collapses 16 bytes into two 64-bit partial sums per
//! step; the scalar tail finishes the ragged end.

use crate::kernels::constants::LANE_SIZE;

use core::arch::x86_64::{
    _mm_add_epi64, _mm_cvtsi128_si64, _mm_loadu_si128, _mm_sad_epu8, _mm_setzero_si128,
    _mm_unpackhi_epi64,
};

/// Wrapping 64-bit sum of input bytes.
// SAFETY: Requires SSE2 (enforced by dispatcher). Loads cover exactly the
// 16-byte chunks produced by `chunks_exact`.
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
#[allow(clippy::cast_sign_loss)]
pub unsafe fn bytesum(text: &[u8]) -> u64 {
    let zero = _mm_setzero_si128();
    let mut acc = zero;

    let mut chunks = text.chunks_exact(LANE_SIZE);
    for chunk in &mut chunks {
        let v = _mm_loadu_si128(chunk.as_ptr().cast());
        acc = _mm_add_epi64(acc, _mm_sad_epu8(v, zero));
    }

    let hi = _mm_unpackhi_epi64(acc, acc);
    let mut total =
        (_mm_cvtsi128_si64(acc) as u64).wrapping_add(_mm_cvtsi128_si64(hi) as u64);
    for &b in chunks.remainder() {
        total = total.wrapping_add(u64::from(b));
    }
    total
}
