//! Hardware Dispatcher
//!
//! Selects the fastest available backend (AVX-512, AES-NI, NEON, or
//! portable) for the current CPU. Every backend computes the same function;
//! the selection changes throughput, never output bits.

use crate::kernels;
use crate::types::Backend;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::types::HashState;

// =============================================================================
// DISPATCHER
// =============================================================================

/// Returns the fastest backend for this CPU. Always succeeds: the portable
/// implementation is the universal fallback.
pub(crate) fn best() -> &'static Backend {
    // 1. Runtime Dispatch (Std-only)
    #[cfg(all(feature = "std", target_arch = "x86_64"))]
    {
        let has_aesni = is_x86_feature_detected!("aes")
            && is_x86_feature_detected!("sse2")
            && is_x86_feature_detected!("ssse3");

        if has_aesni {
            // The 512-bit kernel leans on the AES-NI short path, so VAES
            // alone is not enough.
            let has_avx512 = is_x86_feature_detected!("avx512f")
                && is_x86_feature_detected!("avx512bw")
                && is_x86_feature_detected!("vaes");
            if has_avx512 {
                return &AVX512;
            }
            return &AESNI;
        }
    }

    #[cfg(all(feature = "std", target_arch = "aarch64"))]
    {
        if std::arch::is_aarch64_feature_detected!("aes") {
            return &NEON;
        }
    }

    // 2. Compile-Time Dispatch (no_std)
    #[cfg(not(feature = "std"))]
    {
        #[cfg(all(
            target_arch = "x86_64",
            target_feature = "avx512f",
            target_feature = "avx512bw",
            target_feature = "vaes",
            target_feature = "aes",
            target_feature = "sse2",
            target_feature = "ssse3"
        ))]
        return &AVX512;

        #[cfg(all(
            target_arch = "x86_64",
            not(all(
                target_feature = "avx512f",
                target_feature = "avx512bw",
                target_feature = "vaes"
            )),
            target_feature = "aes",
            target_feature = "sse2",
            target_feature = "ssse3"
        ))]
        return &AESNI;

        #[cfg(all(target_arch = "aarch64", target_feature = "aes"))]
        return &NEON;
    }

    // 3. Portable Fallback
    &PORTABLE
}

// =============================================================================
// BACKEND TABLES
// =============================================================================

static PORTABLE: Backend = Backend {
    name: "portable",
    hash: kernels::portable::hash,
    bytesum: kernels::portable::bytesum,
    generate: kernels::portable::generate,
    absorb: kernels::portable::absorb,
    fold: kernels::portable::fold,
};

#[cfg(target_arch = "x86_64")]
static AESNI: Backend = Backend {
    name: "aes-ni",
    hash: aesni_hash,
    bytesum: aesni_bytesum,
    generate: aesni_generate,
    absorb: aesni_absorb,
    fold: aesni_fold,
};

#[cfg(target_arch = "x86_64")]
static AVX512: Backend = Backend {
    name: "avx-512",
    hash: avx512_hash,
    bytesum: avx512_bytesum,
    generate: avx512_generate,
    absorb: avx512_absorb,
    fold: avx512_fold,
};

#[cfg(target_arch = "aarch64")]
static NEON: Backend = Backend {
    name: "neon",
    hash: neon_hash,
    bytesum: neon_bytesum,
    generate: neon_generate,
    absorb: neon_absorb,
    fold: neon_fold,
};

// =============================================================================
// SAFE WRAPPERS
// =============================================================================

// SAFETY (all AES-NI wrappers): only reachable through `best()` after CPUID
// validation of AES + SSE2 + SSSE3, or through a compile-time target_feature
// guarantee in no_std builds.
#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn aesni_hash(text: &[u8], seed: u64) -> u64 {
    unsafe { kernels::aesni::hash(text, seed) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn aesni_bytesum(text: &[u8]) -> u64 {
    unsafe { kernels::aesni::bytesum(text) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn aesni_generate(dst: &mut [u8], nonce: u64) {
    unsafe { kernels::aesni::generate(dst, nonce) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn aesni_absorb(state: &mut HashState, blocks: &[u8]) {
    unsafe { kernels::aesni::absorb(state, blocks) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn aesni_fold(state: &HashState) -> u64 {
    unsafe { kernels::aesni::fold(state) }
}

// SAFETY (all AVX-512 wrappers): only reachable through `best()` after
// CPUID validation of AVX-512F/BW + VAES plus the AES-NI short-path
// features, or through compile-time target_feature guarantees.
#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn avx512_hash(text: &[u8], seed: u64) -> u64 {
    unsafe { kernels::avx512::hash(text, seed) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn avx512_bytesum(text: &[u8]) -> u64 {
    unsafe { kernels::avx512::bytesum(text) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn avx512_generate(dst: &mut [u8], nonce: u64) {
    unsafe { kernels::avx512::generate(dst, nonce) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn avx512_absorb(state: &mut HashState, blocks: &[u8]) {
    unsafe { kernels::avx512::absorb(state, blocks) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn avx512_fold(state: &HashState) -> u64 {
    unsafe { kernels::avx512::fold(state) }
}

// SAFETY (all NEON wrappers): only reachable through `best()` after runtime
// detection of the aarch64 AES crypto extension, or through a compile-time
// target_feature guarantee.
#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
fn neon_hash(text: &[u8], seed: u64) -> u64 {
    unsafe { kernels::neon::hash(text, seed) }
}

#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
fn neon_bytesum(text: &[u8]) -> u64 {
    unsafe { kernels::neon::bytesum(text) }
}

#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
fn neon_generate(dst: &mut [u8], nonce: u64) {
    unsafe { kernels::neon::generate(dst, nonce) }
}

#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
fn neon_absorb(state: &mut HashState, blocks: &[u8]) {
    unsafe { kernels::neon::absorb(state, blocks) }
}

#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
fn neon_fold(state: &HashState) -> u64 {
    unsafe { kernels::neon::fold(state) }
}
