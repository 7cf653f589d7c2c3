#![cfg_attr(not(feature = "std"), no_std)]

//! # Muon
//!
//! Portable, high-throughput 64-bit hashing, byte-sum checksumming, and
//! counter-mode pseudo-random generation over one AES round per block.
//! Every backend (portable scalar, AES-NI, AVX-512 + VAES, NEON) produces
//! the same bits for the same input; the runtime dispatch only changes
//! throughput.

//! # Usage
//! ```rust
//! // 1. One-shot hashing
//! let h = muon::hash(b"Performance Matters");
//! assert_eq!(h, muon::hash_seeded(b"Performance Matters", 0));
//!
//! // 2. Streaming (big data / files)
//! use muon::Hasher;
//!
//! let mut hasher = Hasher::new();
//! hasher.update(b"Performance ");
//! hasher.update(b"Matters");
//! assert_eq!(hasher.finalize(), h);
//!
//! // 3. Checksums and deterministic filler
//! assert_eq!(muon::bytesum(b"hi"), 209);
//! let mut noise = [0u8; 64];
//! muon::generate(&mut noise, 0xC0FFEE);
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod engine;
// Re-export internal kernels for cross-backend tests, but hide from docs
#[doc(hidden)]
pub mod kernels; // Public for test/example use only
mod oneshot;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use oneshot::{bytesum, generate, hash, hash_seeded, verify};
pub use streaming::MuonHasher as Hasher;
pub use streaming::{MuonBuildHasher, MuonHasher};

/// Returns the name of the hardware backend currently in use.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::dispatcher::best().name
}
