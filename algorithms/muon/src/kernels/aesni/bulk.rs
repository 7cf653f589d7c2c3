//! AES-NI Wide Path
//!
//! Four independent AES/sum chains over 64-byte blocks, kept in eight XMM
//! registers across the whole input, with a tree reduction at the end.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]

use super::short;
use crate::kernels::constants::{BLOCK_SIZE, PI, SHORT_THRESHOLD, SHUFFLE};
use crate::types::HashState;

use core::arch::x86_64::{
    __m128i, _mm_add_epi64, _mm_aesenc_si128, _mm_cvtsi128_si64, _mm_loadu_si128, _mm_set_epi64x,
    _mm_shuffle_epi8, _mm_storeu_si128, _mm_xor_si128,
};

// =============================================================================
// FINALIZATION
// =============================================================================

/// Reduce the four lane pairs to one (`m01`/`m23`/`m` tree), then run the
/// shared key-bump finalization.
// SAFETY: AES/SSE2 guaranteed by callers (all are feature-gated).
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[allow(unsafe_code)]
unsafe fn finalize_wide(aes: [__m128i; 4], sum: [__m128i; 4], seed: u64, total: u64) -> u64 {
    let m0 = _mm_aesenc_si128(sum[0], aes[0]);
    let m1 = _mm_aesenc_si128(sum[1], aes[1]);
    let m2 = _mm_aesenc_si128(sum[2], aes[2]);
    let m3 = _mm_aesenc_si128(sum[3], aes[3]);
    let m01 = _mm_aesenc_si128(m0, m1);
    let m23 = _mm_aesenc_si128(m2, m3);
    let key = _mm_set_epi64x(seed as i64, seed.wrapping_add(total) as i64);
    let m = _mm_aesenc_si128(m01, m23);
    let out = _mm_aesenc_si128(_mm_aesenc_si128(m, key), m);
    _mm_cvtsi128_si64(out) as u64
}

// =============================================================================
// ONE-SHOT WIDE PATH
// =============================================================================

/// Four-lane hash for inputs of 64 bytes and up.
// SAFETY: Requires AES/SSE2/SSSE3 (enforced by dispatcher). Block pointers
// advance in 16-byte steps within `chunks_exact(64)` chunks; the zero-padded
// tail block lives on the stack.
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn hash_wide(text: &[u8], seed: u64) -> u64 {
    let shuf = _mm_loadu_si128(SHUFFLE.0.as_ptr().cast());
    let seed_vec = _mm_set_epi64x(seed as i64, seed as i64);
    let pi = PI.0.as_ptr();

    let mut aes0 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.cast()));
    let mut aes1 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(2).cast()));
    let mut aes2 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(4).cast()));
    let mut aes3 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(6).cast()));
    let mut sum0 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(8).cast()));
    let mut sum1 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(10).cast()));
    let mut sum2 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(12).cast()));
    let mut sum3 = _mm_xor_si128(seed_vec, _mm_loadu_si128(pi.add(14).cast()));

    macro_rules! absorb_block {
        ($ptr:expr) => {{
            let p = $ptr;
            let b0 = _mm_loadu_si128(p.cast());
            let b1 = _mm_loadu_si128(p.add(16).cast());
            let b2 = _mm_loadu_si128(p.add(32).cast());
            let b3 = _mm_loadu_si128(p.add(48).cast());
            aes0 = _mm_aesenc_si128(aes0, b0);
            aes1 = _mm_aesenc_si128(aes1, b1);
            aes2 = _mm_aesenc_si128(aes2, b2);
            aes3 = _mm_aesenc_si128(aes3, b3);
            sum0 = _mm_add_epi64(_mm_shuffle_epi8(sum0, shuf), b0);
            sum1 = _mm_add_epi64(_mm_shuffle_epi8(sum1, shuf), b1);
            sum2 = _mm_add_epi64(_mm_shuffle_epi8(sum2, shuf), b2);
            sum3 = _mm_add_epi64(_mm_shuffle_epi8(sum3, shuf), b3);
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
// SAFETY: Requires AES/SSE2/SSSE3 (enforced by dispatcher). Lane loads and
// stores cover exactly the 16-byte state fields.
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn absorb(state: &mut HashState, blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % BLOCK_SIZE, 0);
    let shuf = _mm_loadu_si128(SHUFFLE.0.as_ptr().cast());

    let mut aes0 = _mm_loadu_si128(state.aes[0].as_ptr().cast());
    let mut aes1 = _mm_loadu_si128(state.aes[1].as_ptr().cast());
    let mut aes2 = _mm_loadu_si128(state.aes[2].as_ptr().cast());
    let mut aes3 = _mm_loadu_si128(state.aes[3].as_ptr().cast());
    let mut sum0 = _mm_loadu_si128(state.sum[0].as_ptr().cast());
    let mut sum1 = _mm_loadu_si128(state.sum[1].as_ptr().cast());
    let mut sum2 = _mm_loadu_si128(state.sum[2].as_ptr().cast());
    let mut sum3 = _mm_loadu_si128(state.sum[3].as_ptr().cast());

    for block in blocks.chunks_exact(BLOCK_SIZE) {
        let p = block.as_ptr();
        let b0 = _mm_loadu_si128(p.cast());
        let b1 = _mm_loadu_si128(p.add(16).cast());
        let b2 = _mm_loadu_si128(p.add(32).cast());
        let b3 = _mm_loadu_si128(p.add(48).cast());
        aes0 = _mm_aesenc_si128(aes0, b0);
        aes1 = _mm_aesenc_si128(aes1, b1);
        aes2 = _mm_aesenc_si128(aes2, b2);
        aes3 = _mm_aesenc_si128(aes3, b3);
        sum0 = _mm_add_epi64(_mm_shuffle_epi8(sum0, shuf), b0);
        sum1 = _mm_add_epi64(_mm_shuffle_epi8(sum1, shuf), b1);
        sum2 = _mm_add_epi64(_mm_shuffle_epi8(sum2, shuf), b2);
        sum3 = _mm_add_epi64(_mm_shuffle_epi8(sum3, shuf), b3);
    }

    _mm_storeu_si128(state.aes[0].as_mut_ptr().cast(), aes0);
    _mm_storeu_si128(state.aes[1].as_mut_ptr().cast(), aes1);
    _mm_storeu_si128(state.aes[2].as_mut_ptr().cast(), aes2);
    _mm_storeu_si128(state.aes[3].as_mut_ptr().cast(), aes3);
    _mm_storeu_si128(state.sum[0].as_mut_ptr().cast(), sum0);
    _mm_storeu_si128(state.sum[1].as_mut_ptr().cast(), sum1);
    _mm_storeu_si128(state.sum[2].as_mut_ptr().cast(), sum2);
    _mm_storeu_si128(state.sum[3].as_mut_ptr().cast(), sum3);
}

/// Finalize a streamed state without mutating it.
// SAFETY: Requires AES/SSE2/SSSE3 (enforced by dispatcher). Works on register
// copies of the lanes; the state itself is only read.
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub(crate) unsafe fn fold(state: &HashState) -> u64 {
    if state.ins_length < SHORT_THRESHOLD as u64 {
        return short::fold_short(state);
    }

    let mut aes = [
        _mm_loadu_si128(state.aes[0].as_ptr().cast()),
        _mm_loadu_si128(state.aes[1].as_ptr().cast()),
        _mm_loadu_si128(state.aes[2].as_ptr().cast()),
        _mm_loadu_si128(state.aes[3].as_ptr().cast()),
    ];
    let mut sum = [
        _mm_loadu_si128(state.sum[0].as_ptr().cast()),
        _mm_loadu_si128(state.sum[1].as_ptr().cast()),
        _mm_loadu_si128(state.sum[2].as_ptr().cast()),
        _mm_loadu_si128(state.sum[3].as_ptr().cast()),
    ];

    // A non-empty tail sits zero-padded in the staging buffer.
    if state.ins_length % BLOCK_SIZE as u64 != 0 {
        let shuf = _mm_loadu_si128(SHUFFLE.0.as_ptr().cast());
        let p = state.ins.as_ptr();
        let b = [
            _mm_loadu_si128(p.cast()),
            _mm_loadu_si128(p.add(16).cast()),
            _mm_loadu_si128(p.add(32).cast()),
            _mm_loadu_si128(p.add(48).cast()),
        ];
        for i in 0..4 {
            aes[i] = _mm_aesenc_si128(aes[i], b[i]);
            sum[i] = _mm_add_epi64(_mm_shuffle_epi8(sum[i], shuf), b[i]);
        }
    }

    finalize_wide(aes, sum, state.seed(), state.ins_length)
}
