//! Public API Layer
//!
//! Single-shot entry points. Each call resolves the best backend and runs
//! entirely on the caller's stack; nothing allocates.

use crate::engine::dispatcher;
use subtle::ConstantTimeEq;

// =============================================================================
// HASHING
// =============================================================================

/// Compute the 64-bit Muon hash of `input` with seed 0.
///
/// Identical on every platform and backend.
///
/// # Example
/// ```rust
/// let h = muon::hash(b"Performance Matters");
/// assert_eq!(h, muon::hash(b"Performance Matters"));
/// ```
#[must_use]
#[inline]
pub fn hash(input: &[u8]) -> u64 {
    hash_seeded(input, 0)
}

/// Compute the 64-bit Muon hash of `input` keyed by `seed`.
///
/// Used for randomized hashing (hash-flooding resistance in table use) and
/// `SMHasher` compatibility.
#[must_use]
#[inline]
pub fn hash_seeded(input: &[u8], seed: u64) -> u64 {
    (dispatcher::best().hash)(input, seed)
}

// =============================================================================
// BYTE-SUM
// =============================================================================

/// Wrapping 64-bit sum of every byte in `input`.
///
/// No seed, no padding; the empty slice sums to zero. Overflow wraps modulo
/// 2^64 but cannot occur for inputs below 2^56 bytes.
#[must_use]
#[inline]
pub fn bytesum(input: &[u8]) -> u64 {
    (dispatcher::best().bytesum)(input)
}

// =============================================================================
// PSEUDO-RANDOM GENERATION
// =============================================================================

/// Fill `dst` deterministically from `nonce`.
///
/// Two calls with the same nonce and the same destination length produce
/// identical buffers on every platform. Not a cryptographic generator.
///
/// # Example
/// ```rust
/// let mut buf = [0u8; 32];
/// muon::generate(&mut buf, 42);
/// ```
#[inline]
pub fn generate(dst: &mut [u8], nonce: u64) {
    (dispatcher::best().generate)(dst, nonce);
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Compare the hash of `input` against an expected value in constant time.
///
/// # Example
/// ```rust
/// let sum = muon::hash_seeded(b"payload", 7);
/// assert!(muon::verify(b"payload", 7, sum));
/// ```
#[must_use]
pub fn verify(input: &[u8], seed: u64, expected: u64) -> bool {
    hash_seeded(input, seed).ct_eq(&expected).into()
}
