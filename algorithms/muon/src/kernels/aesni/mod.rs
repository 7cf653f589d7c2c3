//! AES-NI Kernel Module
//!
//! 128-bit implementation using the `AESENC`, `PSHUFB`, and `PSADBW`
//! instructions. Low latency on short inputs, four independent AES chains
//! on long ones.

mod bulk;
mod random;
pub(crate) mod short;
mod sum;

pub(crate) use bulk::{absorb, fold};
pub use random::generate;
pub use sum::bytesum;

use crate::kernels::constants::SHORT_THRESHOLD;

/// One-shot hash: single-lane path below [`SHORT_THRESHOLD`], four-lane
/// path at and above it.
///
/// # Safety
/// Requires AES, SSE2, and SSSE3 (enforced by the dispatcher).
#[target_feature(enable = "aes")]
#[target_feature(enable = "sse2")]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub unsafe fn hash(text: &[u8], seed: u64) -> u64 {
    if text.len() < SHORT_THRESHOLD {
        short::hash_short(text, seed)
    } else {
        bulk::hash_wide(text, seed)
    }
}
