//! Consistency & Regression Tests
//!
//! Verifies the core contract: for any partition of any input, the streamed
//! fold equals the single-shot hash, folding never disturbs the state, and
//! boundary lengths behave.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use muon::{hash, hash_seeded, Hasher};

/// Deterministic non-trivial filler.
fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8).collect()
}

// =============================================================================
// STREAMING CONSISTENCY
// =============================================================================

#[test]
fn test_streaming_matches_oneshot_at_boundaries() {
    // Every length where the block dispatch changes shape, plus both sides
    // of the staging-buffer and megabyte marks.
    let sizes = [
        0usize, 1, 15, 16, 17, 31, 32, 33, 47, 48, 49, 63, 64, 65, 127, 128, 129, 4095, 4096,
        4097, 1 << 20, (1 << 20) + 1,
    ];

    for &size in &sizes {
        let input = pattern(size);
        let expected = hash(&input);

        // Single update
        let mut hasher = Hasher::new();
        hasher.update(&input);
        assert_eq!(
            hasher.finalize(),
            expected,
            "single-update fold diverged at size {size}"
        );

        // Fixed-stride updates that straddle the 64-byte staging buffer
        let mut hasher = Hasher::new();
        for chunk in input.chunks(37) {
            hasher.update(chunk);
        }
        assert_eq!(
            hasher.finalize(),
            expected,
            "37-byte-stride fold diverged at size {size}"
        );

        // Byte-by-byte for the short range
        if size <= 256 {
            let mut hasher = Hasher::new();
            for &b in &input {
                hasher.update(&[b]);
            }
            assert_eq!(
                hasher.finalize(),
                expected,
                "byte-by-byte fold diverged at size {size}"
            );
        }
    }
}

#[test]
fn test_every_split_of_the_pangram() {
    let x = b"The quick brown fox jumps over the lazy dog";
    let expected = hash(x);

    for k in 0..=x.len() {
        let mut hasher = Hasher::new();
        hasher.update(&x[..k]);
        hasher.update(&x[k..]);
        assert_eq!(hasher.finalize(), expected, "split at {k} diverged");
    }
}

#[test]
fn test_empty_stream_equals_empty_hash() {
    for seed in [0u64, 1, 0xDEAD_BEEF] {
        let hasher = Hasher::with_seed(seed);
        assert_eq!(
            hasher.finalize(),
            hash_seeded(b"", seed),
            "empty fold diverged for seed {seed:#x}"
        );
    }
}

// =============================================================================
// FOLD IS AN OBSERVER
// =============================================================================

#[test]
fn test_fold_is_non_destructive() {
    let mut hasher = Hasher::new();
    hasher.update(b"The quick brown fox");

    let first = hasher.finalize();
    let second = hasher.finalize();
    assert_eq!(first, second, "two folds of the same state disagree");

    // Streaming may continue after a fold as if it never happened.
    hasher.update(b" jumps over the lazy dog");
    assert_eq!(
        hasher.finalize(),
        hash(b"The quick brown fox jumps over the lazy dog")
    );
}

#[test]
fn test_fold_observes_large_states_without_mutation() {
    // Exercise both fold regimes on a wide state: a block-aligned total and
    // a ragged one.
    for size in [256usize, 300] {
        let input = pattern(size);
        let mut hasher = Hasher::new();
        hasher.update(&input);
        let h1 = hasher.finalize();
        let h2 = hasher.finalize();
        assert_eq!(h1, h2, "wide fold mutated state at size {size}");
        assert_eq!(h1, hash(&input));
    }
}

// =============================================================================
// RESET & REGISTER EQUIVALENCE
// =============================================================================

#[test]
fn test_reset_restarts_the_stream() {
    let mut hasher = Hasher::with_seed(7);
    hasher.update(&pattern(1000));
    hasher.reset();
    hasher.update(b"abc");
    assert_eq!(hasher.finalize(), hash_seeded(b"abc", 7));
}

#[test]
fn test_register_equivalence_ignores_staged_tail() {
    let block = pattern(64);

    let mut a = Hasher::new();
    let mut b = Hasher::new();
    assert!(a.equivalent(&b), "fresh states with one seed must be equivalent");

    // Identical absorbed history, different staged tails: registers agree.
    a.update(&block);
    b.update(&block);
    a.update(b"tail-a");
    b.update(b"tail-b");
    assert!(a.equivalent(&b));

    // Different absorbed history: registers diverge.
    let mut c = Hasher::new();
    let mut d = c;
    c.update(&block);
    d.update(&pattern(65)[1..]);
    assert!(!c.equivalent(&d));

    // Different seeds diverge immediately.
    assert!(!Hasher::new().equivalent(&Hasher::with_seed(1)));
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn test_hash_is_deterministic_and_nonzero_spread() {
    let sizes = [0usize, 1, 63, 64, 65, 1024];
    for size in sizes {
        let input = pattern(size);
        assert_eq!(hash(&input), hash(&input), "not deterministic at {size}");
    }

    // Nearby lengths of the same stream must not collide.
    let input = pattern(1024);
    let mut seen = std::collections::HashSet::new();
    for len in 0..=1024 {
        assert!(
            seen.insert(hash(&input[..len])),
            "prefix collision at length {len}"
        );
    }
}
