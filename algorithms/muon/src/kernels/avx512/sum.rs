//! AVX-512 Byte-Sum
//!
//! `VPSADBW` collapses 64 bytes into eight 64-bit partial sums per step; the
//! ragged end comes in through a zero-masked load instead of a scalar loop.

use crate::kernels::constants::BLOCK_SIZE;

use core::arch::x86_64::{
    _mm512_add_epi64, _mm512_loadu_si512, _mm512_maskz_loadu_epi8, _mm512_reduce_add_epi64,
    _mm512_sad_epu8, _mm512_setzero_si512,
};

/// Wrapping 64-bit sum of input bytes.
// SAFETY: Requires AVX-512F/BW (enforced by dispatcher). The masked tail
// load only touches `tail.len()` bytes.
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "avx512bw")]
#[allow(unsafe_code)]
#[allow(clippy::cast_sign_loss)]
pub unsafe fn bytesum(text: &[u8]) -> u64 {
    let zero = _mm512_setzero_si512();
    let mut acc = zero;

    let mut chunks = text.chunks_exact(BLOCK_SIZE);
    for chunk in &mut chunks {
        let v = _mm512_loadu_si512(chunk.as_ptr().cast());
        acc = _mm512_add_epi64(acc, _mm512_sad_epu8(v, zero));
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mask = (1u64 << tail.len()) - 1;
        let v = _mm512_maskz_loadu_epi8(mask, tail.as_ptr().cast());
        acc = _mm512_add_epi64(acc, _mm512_sad_epu8(v, zero));
    }

    _mm512_reduce_add_epi64(acc) as u64
}
