//! AVX-512 Kernel Module
//!
//! High-throughput implementation using AVX-512F/BW + VAES: the four lanes
//! of the wide state live in single ZMM registers, so one `VAESENC`, one
//! `VPSHUFB`, and one `VPADDQ` absorb a whole 64-byte block. Inputs below
//! the wide threshold have no 512-bit work to do and go through the AES-NI
//! short path, as does the short fold.

mod bulk;
mod random;
mod sum;

pub(crate) use bulk::{absorb, fold};
pub use random::generate;
pub use sum::bytesum;

use crate::kernels::aesni;
use crate::kernels::constants::SHORT_THRESHOLD;

/// One-shot hash: AES-NI single-lane path below [`SHORT_THRESHOLD`],
/// ZMM-resident four-lane path at and above it.
///
/// # Safety
/// Requires AVX-512F, AVX-512BW, VAES, plus AES/SSE2/SSSE3 for the short
/// path and the final reduction (enforced by the dispatcher).
#[target_feature(enable = "avx512f")]
#[target_feature(enable = "avx512bw")]
#[target_feature(enable = "vaes")]
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub unsafe fn hash(text: &[u8], seed: u64) -> u64 {
    if text.len() < SHORT_THRESHOLD {
        aesni::short::hash_short(text, seed)
    } else {
        bulk::hash_wide(text, seed)
    }
}
