//! Muon Kernel Constants
//!
//! The hash family carries exactly two numeric tables:
//!
//! - `PI`: the first 1024 bits of the hexadecimal expansion of π, read as
//!   sixteen little-endian `u64`s. Nothing-up-my-sleeve material for seed
//!   diversification and PRNG keying.
//! - `SHUFFLE`: a fixed byte permutation applied to the additive half of the
//!   state before every absorption, replicated once per 128-bit lane.
//!
//! Both tables are 64-byte aligned so every backend can issue full-width
//! aligned loads against them.

// =============================================================================
// ALIGNMENT WRAPPER
// =============================================================================

/// Wrapper forcing 64-byte alignment onto a constant table.
#[repr(C, align(64))]
pub struct Aligned64<T>(
    /// The wrapped table.
    pub T,
);

// =============================================================================
// STRUCTURAL CONSTANTS
// =============================================================================

/// Size of a single 128-bit lane in bytes.
pub const LANE_SIZE: usize = 16;

/// Size of one wide absorption block in bytes (four lanes).
pub const BLOCK_SIZE: usize = 64;

/// Number of parallel lanes in the wide state.
pub const NUM_LANES: usize = 4;

/// Inputs strictly below this length use the single-lane state.
///
/// Inputs of exactly `BLOCK_SIZE` bytes take the wide path so that the
/// single-shot result matches a fold over a streamed, already-absorbed
/// staging buffer.
pub const SHORT_THRESHOLD: usize = 64;

/// AES GF(2^8) reduction polynomial: x^8 + x^4 + x^3 + x + 1
pub const GF_POLY: u8 = 0x1b;

// =============================================================================
// PI TABLE
// =============================================================================

/// First 1024 bits of π in hexadecimal, as sixteen little-endian `u64`s.
///
/// `PI[0..8]` seeds the AES lanes and keys the PRNG; `PI[8..16]` seeds the
/// additive lanes.
pub static PI: Aligned64<[u64; 16]> = Aligned64([
    0x243F_6A88_85A3_08D3,
    0x1319_8A2E_0370_7344,
    0xA409_3822_299F_31D0,
    0x082E_FA98_EC4E_6C89,
    0x4528_21E6_38D0_1377,
    0xBE54_66CF_34E9_0C6C,
    0xC0AC_29B7_C97C_50DD,
    0x3F84_D5B5_B547_0917,
    0x9216_D5D9_8979_FB1B,
    0xD131_0BA6_98DF_B5AC,
    0x2FFD_72DB_D01A_DFB7,
    0xB8E1_AFED_6A26_7E96,
    0xBA7C_9045_F12C_7F99,
    0x24A1_9947_B391_6CF7,
    0x0801_F2E2_858E_FC16,
    0x6369_20D8_7157_4E69,
]);

// =============================================================================
// SHUFFLE PERMUTATION
// =============================================================================

/// Source-byte index for each destination byte of a 16-byte lane, replicated
/// four times so 512-bit backends can load it directly.
///
/// Matches `pshufb`/`vqtbl1q_u8` semantics: `dst[i] = src[SHUFFLE[i]]`.
#[rustfmt::skip]
pub static SHUFFLE: Aligned64<[u8; 64]> = Aligned64([
    0x04, 0x0b, 0x09, 0x06, 0x08, 0x0d, 0x0f, 0x05,
    0x0e, 0x03, 0x01, 0x0c, 0x00, 0x07, 0x0a, 0x02,
    0x04, 0x0b, 0x09, 0x06, 0x08, 0x0d, 0x0f, 0x05,
    0x0e, 0x03, 0x01, 0x0c, 0x00, 0x07, 0x0a, 0x02,
    0x04, 0x0b, 0x09, 0x06, 0x08, 0x0d, 0x0f, 0x05,
    0x0e, 0x03, 0x01, 0x0c, 0x00, 0x07, 0x0a, 0x02,
    0x04, 0x0b, 0x09, 0x06, 0x08, 0x0d, 0x0f, 0x05,
    0x0e, 0x03, 0x01, 0x0c, 0x00, 0x07, 0x0a, 0x02,
]);
