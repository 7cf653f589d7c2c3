//! Portable reference implementation of Muon.
//!
//! Fully self-contained and safe: handles all input sizes on every target,
//! producing byte-identical results to the AES-NI, AVX-512, and NEON
//! backends. The hardware kernels are verified against this module.

use self::utils::{aesenc, U128};
use crate::kernels::constants::{BLOCK_SIZE, LANE_SIZE, NUM_LANES, PI, SHORT_THRESHOLD, SHUFFLE};
use crate::types::HashState;

pub(crate) mod utils;

// =============================================================================
// HELPERS
// =============================================================================

fn shuffle_mask() -> [u8; 16] {
    let mut mask = [0u8; 16];
    mask.copy_from_slice(&SHUFFLE.0[..16]);
    mask
}

/// One absorption: AES lane eats the block, additive lane is permuted and
/// then bumped by the block, lane-wise over the two 64-bit halves.
fn absorb_lane(aes: &mut U128, sum: &mut U128, block: U128, mask: &[u8; 16]) {
    *aes = aesenc(*aes, block);
    *sum = sum.shuffle(mask).add64(&block);
}

/// Shared tail of both finalization paths: bump the key by the total length,
/// then run the double mixing round keyed by the folded state on both sides.
/// A single round leaves measurable bias on the statistical suite.
fn finalize(aes: U128, sum: U128, key: U128, total: u64) -> u64 {
    let key = U128::from_u64s(key.lo().wrapping_add(total), key.hi());
    let m = aesenc(sum, aes);
    aesenc(aesenc(m, key), m).lo()
}

// =============================================================================
// SHORT PATH (LENGTH < 64)
// =============================================================================

/// Single-lane hash for short inputs.
///
/// Multiples of 16 are absorbed as exact blocks. A ragged tail re-reads the
/// last 16 input bytes and shifts them down in-register, so every byte is
/// covered without a data-dependent masked load.
fn hash_short(text: &[u8], seed: u64) -> u64 {
    let mask = shuffle_mask();
    let key = U128::from_u64s(seed, seed);
    let mut aes = U128::from_u64s(seed ^ PI.0[0], seed ^ PI.0[1]);
    let mut sum = U128::from_u64s(seed ^ PI.0[8], seed ^ PI.0[9]);

    let n = text.len();
    if n <= 16 {
        absorb_lane(&mut aes, &mut sum, U128::load_padded(text), &mask);
    } else if n <= 32 {
        absorb_lane(&mut aes, &mut sum, U128::load(text), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load_tail_shifted(text, 32 - n), &mask);
    } else if n <= 48 {
        absorb_lane(&mut aes, &mut sum, U128::load(text), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load(&text[16..]), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load_tail_shifted(text, 48 - n), &mask);
    } else {
        absorb_lane(&mut aes, &mut sum, U128::load(text), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load(&text[16..]), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load(&text[32..]), &mask);
        absorb_lane(&mut aes, &mut sum, U128::load_tail_shifted(text, 64 - n), &mask);
    }

    finalize(aes, sum, key, n as u64)
}

// =============================================================================
// WIDE PATH (LENGTH >= 64)
// =============================================================================

fn absorb_block(aes: &mut [U128; NUM_LANES], sum: &mut [U128; NUM_LANES], block: &[u8]) {
    let mask = shuffle_mask();
    for i in 0..NUM_LANES {
        let ins = U128::load(&block[i * LANE_SIZE..]);
        absorb_lane(&mut aes[i], &mut sum[i], ins, &mask);
    }
}

/// Tree-reduce the four lane pairs down to one, then finalize as usual.
fn finalize_wide(aes: &[U128; NUM_LANES], sum: &[U128; NUM_LANES], key: U128, total: u64) -> u64 {
    let m: [U128; NUM_LANES] = core::array::from_fn(|i| aesenc(sum[i], aes[i]));
    let m01 = aesenc(m[0], m[1]);
    let m23 = aesenc(m[2], m[3]);
    let key = U128::from_u64s(key.lo().wrapping_add(total), key.hi());
    let m = aesenc(m01, m23);
    aesenc(aesenc(m, key), m).lo()
}

fn hash_wide(text: &[u8], seed: u64) -> u64 {
    let key = U128::from_u64s(seed, seed);
    let mut aes: [U128; NUM_LANES] =
        core::array::from_fn(|i| U128::from_u64s(seed ^ PI.0[2 * i], seed ^ PI.0[2 * i + 1]));
    let mut sum: [U128; NUM_LANES] = core::array::from_fn(|i| {
        U128::from_u64s(seed ^ PI.0[8 + 2 * i], seed ^ PI.0[8 + 2 * i + 1])
    });

    let mut chunks = text.chunks_exact(BLOCK_SIZE);
    for chunk in &mut chunks {
        absorb_block(&mut aes, &mut sum, chunk);
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut block = [0u8; BLOCK_SIZE];
        block[..tail.len()].copy_from_slice(tail);
        absorb_block(&mut aes, &mut sum, &block);
    }

    finalize_wide(&aes, &sum, key, text.len() as u64)
}

// =============================================================================
// PUBLIC ENTRY POINTS
// =============================================================================

/// Portable single-shot hash. The reference definition for all backends.
pub fn hash(text: &[u8], seed: u64) -> u64 {
    if text.len() < SHORT_THRESHOLD {
        hash_short(text, seed)
    } else {
        hash_wide(text, seed)
    }
}

/// Wrapping 64-bit sum of input bytes.
pub fn bytesum(text: &[u8]) -> u64 {
    text.iter().fold(0u64, |acc, &b| acc.wrapping_add(u64::from(b)))
}

/// Fill `dst` deterministically from `nonce`: one AES round per 128-bit
/// block in counter mode, keyed by `nonce ^ PI`.
pub fn generate(dst: &mut [u8], nonce: u64) {
    let mut index = 0u64;
    let mut chunks = dst.chunks_exact_mut(LANE_SIZE);
    for chunk in &mut chunks {
        chunk.copy_from_slice(&random_block(nonce, index).b);
        index += 1;
    }
    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let block = random_block(nonce, index);
        tail.copy_from_slice(&block.b[..tail.len()]);
    }
}

fn random_block(nonce: u64, index: u64) -> U128 {
    let counter = nonce.wrapping_add(index);
    let input = U128::from_u64s(counter, counter);
    let pi = 2 * (index % 4) as usize;
    let key = U128::from_u64s(nonce ^ PI.0[pi], nonce ^ PI.0[pi + 1]);
    aesenc(input, key)
}

// =============================================================================
// STREAMING ENTRY POINTS
// =============================================================================

/// Absorb a run of complete 64-byte blocks into the wide lanes of `state`.
pub(crate) fn absorb(state: &mut HashState, blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % BLOCK_SIZE, 0);
    let mut aes: [U128; NUM_LANES] = core::array::from_fn(|i| U128 { b: state.aes[i] });
    let mut sum: [U128; NUM_LANES] = core::array::from_fn(|i| U128 { b: state.sum[i] });
    for block in blocks.chunks_exact(BLOCK_SIZE) {
        absorb_block(&mut aes, &mut sum, block);
    }
    for i in 0..NUM_LANES {
        state.aes[i] = aes[i].b;
        state.sum[i] = sum[i].b;
    }
}

/// Finalize a streamed state without mutating it.
///
/// Short totals replay the staged bytes through the single-lane path; the
/// staging buffer is zero beyond the tail, so 16-byte window loads match the
/// single-shot dispatch exactly. Wide totals absorb the zero-padded tail (if
/// any) into a copy of the lanes before reducing.
pub(crate) fn fold(state: &HashState) -> u64 {
    let total = state.ins_length;
    let key = U128 { b: state.key };

    if total < SHORT_THRESHOLD as u64 {
        let mask = shuffle_mask();
        let mut aes = U128 { b: state.aes[0] };
        let mut sum = U128 { b: state.sum[0] };
        let n = total as usize;
        let blocks = 1 + n.saturating_sub(1) / LANE_SIZE;
        for k in 0..blocks {
            let window = U128::load(&state.ins[k * LANE_SIZE..(k + 1) * LANE_SIZE]);
            absorb_lane(&mut aes, &mut sum, window, &mask);
        }
        return finalize(aes, sum, key, total);
    }

    let mut aes: [U128; NUM_LANES] = core::array::from_fn(|i| U128 { b: state.aes[i] });
    let mut sum: [U128; NUM_LANES] = core::array::from_fn(|i| U128 { b: state.sum[i] });
    if total % BLOCK_SIZE as u64 != 0 {
        absorb_block(&mut aes, &mut sum, &state.ins);
    }
    finalize_wide(&aes, &sum, key, total)
}
