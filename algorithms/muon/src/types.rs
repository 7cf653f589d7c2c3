//! Shared types used across the Muon library.

use crate::kernels::constants::{BLOCK_SIZE, LANE_SIZE, NUM_LANES, PI};
use static_assertions::const_assert_eq;

// =============================================================================
// HASH STATE
// =============================================================================

/// Incremental hash state: four AES lanes, four additive lanes, the seed-derived
/// round key, a 64-byte staging buffer, and a byte counter.
///
/// The layout is plain little-endian memory, so scalar and vectorized
/// backends read and write the identical representation. Bytes of `ins`
/// beyond `ins_length % 64` are zero between completed block absorptions; the
/// fold paths rely on that to treat the staged tail as zero-padded.
#[derive(Clone, Copy, Debug)]
#[repr(C, align(64))]
pub struct HashState {
    pub(crate) aes: [[u8; LANE_SIZE]; NUM_LANES],
    pub(crate) sum: [[u8; LANE_SIZE]; NUM_LANES],
    pub(crate) ins: [u8; BLOCK_SIZE],
    pub(crate) key: [u8; LANE_SIZE],
    pub(crate) ins_length: u64,
}

const_assert_eq!(core::mem::size_of::<HashState>(), 256);
const_assert_eq!(core::mem::align_of::<HashState>(), 64);

impl HashState {
    /// Fresh state keyed by `seed`: the AES lanes start at `seed ^ PI[0..8]`,
    /// the additive lanes at `seed ^ PI[8..16]`, the round key holds the seed
    /// in both halves.
    pub(crate) fn with_seed(seed: u64) -> Self {
        let mut aes = [[0u8; LANE_SIZE]; NUM_LANES];
        let mut sum = [[0u8; LANE_SIZE]; NUM_LANES];
        for i in 0..NUM_LANES {
            aes[i][..8].copy_from_slice(&(seed ^ PI.0[2 * i]).to_le_bytes());
            aes[i][8..].copy_from_slice(&(seed ^ PI.0[2 * i + 1]).to_le_bytes());
            sum[i][..8].copy_from_slice(&(seed ^ PI.0[8 + 2 * i]).to_le_bytes());
            sum[i][8..].copy_from_slice(&(seed ^ PI.0[8 + 2 * i + 1]).to_le_bytes());
        }
        let mut key = [0u8; LANE_SIZE];
        key[..8].copy_from_slice(&seed.to_le_bytes());
        key[8..].copy_from_slice(&seed.to_le_bytes());
        Self {
            aes,
            sum,
            ins: [0u8; BLOCK_SIZE],
            key,
            ins_length: 0,
        }
    }

    /// The seed this state was initialized with (both key halves hold it).
    pub(crate) fn seed(&self) -> u64 {
        let mut lo = [0u8; 8];
        lo.copy_from_slice(&self.key[..8]);
        u64::from_le_bytes(lo)
    }
}

// =============================================================================
// BACKEND INTERFACE
// =============================================================================

/// Function-pointer table one hardware backend fills in.
///
/// All backends (AVX-512, AES-NI, NEON) and the portable fallback expose the
/// same six entry points so the dispatcher can swap them at runtime. Every
/// entry computes the identical bits for identical inputs; dispatch is a
/// façade, never a semantic fork.
pub(crate) struct Backend {
    /// Human-readable backend name.
    pub name: &'static str,
    /// Single-shot seeded hash.
    pub hash: fn(&[u8], u64) -> u64,
    /// Wrapping 64-bit sum of input bytes.
    pub bytesum: fn(&[u8]) -> u64,
    /// Deterministic counter-mode filler keyed by a nonce.
    pub generate: fn(&mut [u8], u64),
    /// Absorb a run of complete 64-byte blocks into the wide lanes.
    /// `blocks.len()` must be a multiple of 64.
    pub absorb: fn(&mut HashState, &[u8]),
    /// Non-destructive finalization of the streamed state.
    pub fold: fn(&HashState) -> u64,
}
