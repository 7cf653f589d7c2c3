//! Integration tests for the seeding functionality.

use muon::{hash, hash_seeded, Hasher};

#[test]
fn test_seeding_influence() {
    let data = b"Seed Test Data for Avalanche Check";
    let h1 = hash_seeded(data, 0x1234_5678_9ABC_DEF0);
    let h2 = hash_seeded(data, 0x1234_5678_9ABC_DEF1);

    assert_ne!(
        h1, h2,
        "Different seeds must produce different hash outputs"
    );
}

#[test]
fn test_seed_zero_vs_default() {
    let data = b"Compatibility Check";
    assert_eq!(
        hash(data),
        hash_seeded(data, 0),
        "Default hash should be identical to seed 0"
    );
}

#[test]
fn test_seed_applies_to_every_length_regime() {
    // Seed must matter on the short path, the wide path, and the PRNG-free
    // empty input alike.
    for len in [0usize, 8, 48, 64, 500] {
        let data = vec![0xA5u8; len];
        assert_ne!(
            hash_seeded(&data, 1),
            hash_seeded(&data, 2),
            "seed ignored at length {len}"
        );
    }
}

#[test]
fn test_streaming_seeding() {
    let data = b"Streaming Seed Test";

    let mut hasher1 = Hasher::with_seed(1);
    hasher1.update(data);

    let mut hasher2 = Hasher::with_seed(2);
    hasher2.update(data);

    assert_ne!(
        hasher1.finalize(),
        hasher2.finalize(),
        "Different seeds in streaming mode must produce different outputs"
    );
    assert_eq!(hasher1.finalize(), hash_seeded(data, 1));
}
