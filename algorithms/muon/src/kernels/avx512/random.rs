//! AVX-512 Pseudo-Random Generator
//!
//! Four counter-mode blocks per `VAESENC`: the lane keys are
//! `nonce ^ PI[0..8]`, exactly the four π pairs the scalar definition
//! cycles through, and the counter vector advances by four per step.

#![allow(clippy::cast_possible_wrap)]

use crate::kernels::constants::{BLOCK_SIZE, PI};

use core::arch::x86_64::{
    _mm512_add_epi64, _mm512_aesenc_epi128, _mm512_loadu_si512, _mm512_set1_epi64,
    _mm512_set_epi64, _mm512_storeu_si512, _mm512_xor_si512,
};

/// Fill `dst` deterministically from `nonce`.
// SAFETY: Requires AVX-512F + VAES (enforced by dispatcher). Full blocks
// store into exact 64-byte chunks; the final partial block goes through a
// stack buffer.
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "vaes")]
#[allow(unsafe_code)]
pub unsafe fn generate(dst: &mut [u8], nonce: u64) {
    let keys = _mm512_xor_si512(
        _mm512_set1_epi64(nonce as i64),
        _mm512_loadu_si512(PI.0.as_ptr().cast()),
    );
    // Lane i holds {nonce+i, nonce+i}; lanes are the low-to-high 128-bit
    // quarters, so the offsets read high-element-first here.
    let mut counter = _mm512_add_epi64(
        _mm512_set1_epi64(nonce as i64),
        _mm512_set_epi64(3, 3, 2, 2, 1, 1, 0, 0),
    );
    let step = _mm512_set1_epi64(4);

    let mut chunks = dst.chunks_exact_mut(BLOCK_SIZE);
    for chunk in &mut chunks {
        let block = _mm512_aesenc_epi128(counter, keys);
        _mm512_storeu_si512(chunk.as_mut_ptr().cast(), block);
        counter = _mm512_add_epi64(counter, step);
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let block = _mm512_aesenc_epi128(counter, keys);
        let mut buf = [0u8; BLOCK_SIZE];
        _mm512_storeu_si512(buf.as_mut_ptr().cast(), block);
        tail.copy_from_slice(&buf[..tail.len()]);
    }
}
