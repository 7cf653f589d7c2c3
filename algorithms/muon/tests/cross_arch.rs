//! Cross-Architecture Consistency Tests
//!
//! Verifies that the dispatched backend, the portable reference, and (where
//! the CPU allows) the AES-NI / AVX-512 / NEON kernels produce IDENTICAL
//! results for hashing, byte-sums, and pseudo-random generation. CPU
//! feature detection must never alter output bits.

#![allow(unsafe_code)]
#![allow(missing_docs)]
#![allow(clippy::pedantic, clippy::nursery)]

use muon::kernels;
use muon::{bytesum, generate, hash, hash_seeded};

fn scenarios() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("Empty", vec![]),
        ("Small (4 bytes)", b"Muon".to_vec()),
        ("Fifteen", vec![0x0Fu8; 15]),
        ("Exact Lane (16)", vec![0x10u8; 16]),
        ("Seventeen", vec![0x11u8; 17]),
        ("Tail Overlap (29)", (0u8..29).collect()),
        ("Exact Block (64)", vec![0u8; 64]),
        ("Unaligned (63)", vec![2u8; 63]),
        ("Unaligned (65)", vec![3u8; 65]),
        ("Two Blocks (128)", (0u8..128).collect()),
        ("Ragged (129)", vec![9u8; 129]),
        ("Large (4096)", vec![b'c'; 4096]),
        ("Prime Length (101)", vec![0u8; 101]),
        ("Megabyte", vec![0xAAu8; 1 << 20]),
    ]
}

// =============================================================================
// DISPATCHED VS PORTABLE
// =============================================================================

#[test]
fn test_hash_auto_vs_portable() {
    for (name, input) in scenarios() {
        for seed in [0u64, 1, 0xDEAD_BEEF, u64::MAX] {
            let auto = hash_seeded(&input, seed);
            let portable = kernels::portable::hash(&input, seed);
            assert_eq!(
                auto, portable,
                "hash mismatch auto vs portable: {name}, seed={seed:#x}"
            );
        }
    }
}

#[test]
fn test_bytesum_auto_vs_portable() {
    for (name, input) in scenarios() {
        assert_eq!(
            bytesum(&input),
            kernels::portable::bytesum(&input),
            "bytesum mismatch auto vs portable: {name}"
        );
    }
}

#[test]
fn test_generate_auto_vs_portable() {
    // Lengths around every block boundary the kernels care about, up to
    // several wide blocks.
    let lengths = [0usize, 1, 5, 15, 16, 17, 31, 32, 47, 48, 63, 64, 65, 127, 128, 256, 300];
    for len in lengths {
        for nonce in [0u64, 7, 0xC0FF_EE00_DDBA_5E64] {
            let mut auto = vec![0u8; len];
            let mut portable = vec![0u8; len];
            generate(&mut auto, nonce);
            kernels::portable::generate(&mut portable, nonce);
            assert_eq!(
                auto, portable,
                "generate mismatch auto vs portable: len={len}, nonce={nonce:#x}"
            );
        }
    }
}

// =============================================================================
// DIRECT KERNEL COMPARISON (x86_64)
// =============================================================================

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::*;

    fn has_aesni() -> bool {
        is_x86_feature_detected!("aes")
            && is_x86_feature_detected!("sse2")
            && is_x86_feature_detected!("ssse3")
    }

    fn has_avx512() -> bool {
        has_aesni()
            && is_x86_feature_detected!("avx512f")
            && is_x86_feature_detected!("avx512bw")
            && is_x86_feature_detected!("vaes")
    }

    #[test]
    fn test_aesni_matches_portable() {
        if !has_aesni() {
            println!("Skipping: AES-NI not supported.");
            return;
        }

        for (name, input) in scenarios() {
            for seed in [0u64, 42, u64::MAX] {
                // SAFETY: CPU features validated above.
                let h = unsafe { kernels::aesni::hash(&input, seed) };
                assert_eq!(
                    h,
                    kernels::portable::hash(&input, seed),
                    "AES-NI hash mismatch: {name}, seed={seed}"
                );
            }
            // SAFETY: CPU features validated above.
            let s = unsafe { kernels::aesni::bytesum(&input) };
            assert_eq!(s, kernels::portable::bytesum(&input), "AES-NI bytesum: {name}");
        }

        for len in [0usize, 5, 16, 33, 64, 100, 256] {
            let mut a = vec![0u8; len];
            let mut b = vec![0u8; len];
            // SAFETY: CPU features validated above.
            unsafe { kernels::aesni::generate(&mut a, 99) };
            kernels::portable::generate(&mut b, 99);
            assert_eq!(a, b, "AES-NI generate mismatch at len {len}");
        }
    }

    #[test]
    fn test_avx512_matches_aesni() {
        if !has_avx512() {
            println!("Skipping: AVX-512 not supported.");
            return;
        }

        for (name, input) in scenarios() {
            for seed in [0u64, 42, u64::MAX] {
                // SAFETY: CPU features validated above.
                let (wide, narrow) = unsafe {
                    (
                        kernels::avx512::hash(&input, seed),
                        kernels::aesni::hash(&input, seed),
                    )
                };
                assert_eq!(wide, narrow, "AVX-512 hash mismatch: {name}, seed={seed}");
            }
            // SAFETY: CPU features validated above.
            let (ws, ns) = unsafe {
                (
                    kernels::avx512::bytesum(&input),
                    kernels::aesni::bytesum(&input),
                )
            };
            assert_eq!(ws, ns, "AVX-512 bytesum mismatch: {name}");
        }

        for len in [0usize, 5, 16, 33, 64, 100, 256, 1000] {
            let mut a = vec![0u8; len];
            let mut b = vec![0u8; len];
            // SAFETY: CPU features validated above.
            unsafe {
                kernels::avx512::generate(&mut a, 1234);
                kernels::aesni::generate(&mut b, 1234);
            }
            assert_eq!(a, b, "AVX-512 generate mismatch at len {len}");
        }
    }
}

// =============================================================================
// DIRECT KERNEL COMPARISON (aarch64)
// =============================================================================

#[cfg(target_arch = "aarch64")]
mod arm {
    use super::*;

    #[test]
    fn test_neon_matches_portable() {
        if !std::arch::is_aarch64_feature_detected!("aes") {
            println!("Skipping: NEON AES extension not supported.");
            return;
        }

        for (name, input) in scenarios() {
            for seed in [0u64, 42, u64::MAX] {
                // SAFETY: CPU features validated above.
                let h = unsafe { kernels::neon::hash(&input, seed) };
                assert_eq!(
                    h,
                    kernels::portable::hash(&input, seed),
                    "NEON hash mismatch: {name}, seed={seed}"
                );
            }
            // SAFETY: CPU features validated above.
            let s = unsafe { kernels::neon::bytesum(&input) };
            assert_eq!(s, kernels::portable::bytesum(&input), "NEON bytesum: {name}");
        }

        for len in [0usize, 5, 16, 33, 64, 100, 256] {
            let mut a = vec![0u8; len];
            let mut b = vec![0u8; len];
            // SAFETY: CPU features validated above.
            unsafe { kernels::neon::generate(&mut a, 99) };
            kernels::portable::generate(&mut b, 99);
            assert_eq!(a, b, "NEON generate mismatch at len {len}");
        }
    }
}

// =============================================================================
// RANDOM LENGTHS
// =============================================================================

#[test]
fn test_random_lengths_agree() {
    // Simple pseudo-random generator to avoid seeding questions here.
    let mut rng = 0xDEAD_BEEF_CAFE_BABE_u64;
    let mut next_u64 = move || {
        rng = rng.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        rng
    };

    for _ in 0..200 {
        let len = (next_u64() % 8192) as usize;
        let mut input = vec![0u8; len];
        for b in &mut input {
            *b = (next_u64() & 0xFF) as u8;
        }
        let seed = next_u64();

        assert_eq!(
            hash_seeded(&input, seed),
            kernels::portable::hash(&input, seed),
            "hash mismatch auto vs portable on random input len={len}"
        );
        assert_eq!(
            bytesum(&input),
            kernels::portable::bytesum(&input),
            "bytesum mismatch auto vs portable on random input len={len}"
        );
    }
}
