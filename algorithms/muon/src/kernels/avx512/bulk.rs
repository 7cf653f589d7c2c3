//! AVX-512 Wide Path
//!
//! The four AES lanes and four additive lanes each occupy one ZMM register,
//! so a 64-byte block is absorbed by three instructions. The lane tree
//! reduction at the end drops back to XMM registers.

#![allow(clippy::cast_possible_wrap)]

use crate::kernels::aesni;
use crate::kernels::constants::{BLOCK_SIZE, PI, SHORT_THRESHOLD, SHUFFLE};
use crate::types::HashState;

use core::arch::x86_64::{
    __m512i, _mm512_add_epi64, _mm512_aesenc_epi128, _mm512_castsi512_si128,
    _mm512_extracti32x4_epi32, _mm512_loadu_si512, _mm512_maskz_loadu_epi8, _mm512_set1_epi64,
    _mm512_shuffle_epi8, _mm512_storeu_si512, _mm512_xor_si512, _mm_aesenc_si128,
    _mm_cvtsi128_si64, _mm_set_epi64x,
};

// =============================================================================
// FINALIZATION
// =============================================================================

/// Compute all four `m_i = aesenc(sum_i, aes_i)` in one instruction, then
/// tree-reduce the extracted lanes and run the shared key-bump rounds.
// SAFETY: AVX-512F/VAES + AES/SSE2 guaranteed by callers (feature-gated).
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "vaes")]
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn finalize_wide(aes: __m512i, sum: __m512i, seed: u64, total: u64) -> u64 {
    let m = _mm512_aesenc_epi128(sum, aes);
    let m0 = _mm512_castsi512_si128(m);
    let m1 = _mm512_extracti32x4_epi32::<1>(m);
    let m2 = _mm512_extracti32x4_epi32::<2>(m);
    let m3 = _mm512_extracti32x4_epi32::<3>(m);
    let m01 = _mm_aesenc_si128(m0, m1);
    let m23 = _mm_aesenc_si128(m2, m3);
    let key = _mm_set_epi64x(seed as i64, seed.wrapping_add(total) as i64);
    let folded = _mm_aesenc_si128(m01, m23);
    let out = _mm_aesenc_si128(_mm_aesenc_si128(folded, key), folded);
    _mm_cvtsi128_si64(out) as u64
}

// =============================================================================
// ONE-SHOT WIDE PATH
// =============================================================================

/// ZMM-resident hash for inputs of 64 bytes and up. The ragged tail comes in
/// through a zero-masked load, matching the zero-padded tail block of the
/// other backends.
// SAFETY: Requires AVX-512F/BW/VAES + AES/SSE2 (enforced by dispatcher).
// Full blocks load from `chunks_exact(64)`; the masked tail load only
// touches `tail.len()` bytes.
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "avx512bw")]
#[target_feature(enable = "vaes")]
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
pub(crate) unsafe fn hash_wide(text: &[u8], seed: u64) -> u64 {
    let shuf = _mm512_loadu_si512(SHUFFLE.0.as_ptr().cast());
    let seed_vec = _mm512_set1_epi64(seed as i64);
    let mut aes = _mm512_xor_si512(seed_vec, _mm512_loadu_si512(PI.0.as_ptr().cast()));
    let mut sum = _mm512_xor_si512(seed_vec, _mm512_loadu_si512(PI.0.as_ptr().add(8).cast()));

    let mut chunks = text.chunks_exact(BLOCK_SIZE);
    for chunk in &mut chunks {
        let block = _mm512_loadu_si512(chunk.as_ptr().cast());
        aes = _mm512_aesenc_epi128(aes, block);
        sum = _mm512_add_epi64(_mm512_shuffle_epi8(sum, shuf), block);
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mask = (1u64 << tail.len()) - 1;
        let block = _mm512_maskz_loadu_epi8(mask, tail.as_ptr().cast());
        aes = _mm512_aesenc_epi128(aes, block);
        sum = _mm512_add_epi64(_mm512_shuffle_epi8(sum, shuf), block);
    }

    finalize_wide(aes, sum, seed, text.len() as u64)
}

// =============================================================================
// STREAMING ENTRY POINTS
// =============================================================================

/// Absorb a run of complete 64-byte blocks into the wide lanes of `state`.
// SAFETY: Requires AVX-512F/BW/VAES (enforced by dispatcher). The four lane
// fields are contiguous, so one 512-bit load/store covers each register file.
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "avx512bw")]
#[target_feature(enable = "vaes")]
#[allow(unsafe_code)]
pub(crate) unsafe fn absorb(state: &mut HashState, blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % BLOCK_SIZE, 0);
    let shuf = _mm512_loadu_si512(SHUFFLE.0.as_ptr().cast());
    let mut aes = _mm512_loadu_si512(state.aes.as_ptr().cast());
    let mut sum = _mm512_loadu_si512(state.sum.as_ptr().cast());

    for block in blocks.chunks_exact(BLOCK_SIZE) {
        let b = _mm512_loadu_si512(block.as_ptr().cast());
        aes = _mm512_aesenc_epi128(aes, b);
        sum = _mm512_add_epi64(_mm512_shuffle_epi8(sum, shuf), b);
    }

    _mm512_storeu_si512(state.aes.as_mut_ptr().cast(), aes);
    _mm512_storeu_si512(state.sum.as_mut_ptr().cast(), sum);
}

/// Finalize a streamed state without mutating it.
// SAFETY: Requires AVX-512F/BW/VAES + AES/SSE2/SSSE3 (enforced by
// dispatcher). Works on register copies; the state is only read.
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "avx512bw")]
#[target_feature(enable = "vaes")]
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn fold(state: &HashState) -> u64 {
    if state.ins_length < SHORT_THRESHOLD as u64 {
        return aesni::short::fold_short(state);
    }

    let mut aes = _mm512_loadu_si512(state.aes.as_ptr().cast());
    let mut sum = _mm512_loadu_si512(state.sum.as_ptr().cast());

    // A non-empty tail sits zero-padded in the staging buffer.
    if state.ins_length % BLOCK_SIZE as u64 != 0 {
        let shuf = _mm512_loadu_si512(SHUFFLE.0.as_ptr().cast());
        let block = _mm512_loadu_si512(state.ins.as_ptr().cast());
        aes = _mm512_aesenc_epi128(aes, block);
        sum = _mm512_add_epi64(_mm512_shuffle_epi8(sum, shuf), block);
    }

    finalize_wide(aes, sum, state.seed(), state.ins_length)
}
