//! AES-NI Pseudo-Random Generator
//!
//! Counter mode: block `i` is one AES round over `{nonce+i, nonce+i}` keyed
//! by `nonce ^ PI`, with the four π key pairs cycling.

#![allow(clippy::cast_possible_wrap)]

use crate::kernels::constants::{LANE_SIZE, PI};

use core::arch::x86_64::{
    __m128i, _mm_aesenc_si128, _mm_loadu_si128, _mm_set1_epi64x, _mm_storeu_si128, _mm_xor_si128,
};

/// Fill `dst` deterministically from `nonce`.
// SAFETY: Requires AES/SSE2 (enforced by dispatcher). Full blocks store into
// exact 16-byte chunks; the final partial block goes through a stack buffer.
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub unsafe fn generate(dst: &mut [u8], nonce: u64) {
    let pi = PI.0.as_ptr();
    let nonce_vec = _mm_set1_epi64x(nonce as i64);
    let keys: [__m128i; 4] = [
        _mm_xor_si128(nonce_vec, _mm_loadu_si128(pi.cast())),
        _mm_xor_si128(nonce_vec, _mm_loadu_si128(pi.add(2).cast())),
        _mm_xor_si128(nonce_vec, _mm_loadu_si128(pi.add(4).cast())),
        _mm_xor_si128(nonce_vec, _mm_loadu_si128(pi.add(6).cast())),
    ];

    let mut index = 0u64;
    let mut chunks = dst.chunks_exact_mut(LANE_SIZE);
    for chunk in &mut chunks {
        let counter = _mm_set1_epi64x(nonce.wrapping_add(index) as i64);
        let block = _mm_aesenc_si128(counter, keys[(index % 4) as usize]);
        _mm_storeu_si128(chunk.as_mut_ptr().cast(), block);
        index += 1;
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let counter = _mm_set1_epi64x(nonce.wrapping_add(index) as i64);
        let block = _mm_aesenc_si128(counter, keys[(index % 4) as usize]);
        let mut buf = [0u8; LANE_SIZE];
        _mm_storeu_si128(buf.as_mut_ptr().cast(), block);
        tail.copy_from_slice(&buf[..tail.len()]);
    }
}
