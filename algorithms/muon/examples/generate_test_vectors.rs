//! Generator for Muon test vectors
//!
//! Captures the canonical 64-bit golden values from the reference build as
//! JSON. Run once on a trusted machine, commit the output, and every later
//! build on any backend and platform must reproduce it bit for bit.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use serde_json::json;

fn named_input(tag: &str) -> Vec<u8> {
    match tag {
        "EMPTY" => vec![],
        "ZEROS_15" => vec![0u8; 15],
        "ZEROS_16" => vec![0u8; 16],
        "ZEROS_17" => vec![0u8; 17],
        "ZEROS_63" => vec![0u8; 63],
        "ZEROS_64" => vec![0u8; 64],
        "ZEROS_65" => vec![0u8; 65],
        "LARGE_1KB" => vec![b'A'; 1024],
        "HUGE_1MB" => vec![b'A'; 1024 * 1024],
        "COUNTING_256" => (0u8..=255).collect(),
        other => other.as_bytes().to_vec(),
    }
}

fn main() {
    let tags = [
        "EMPTY",
        "abc",
        "hi",
        "The quick brown fox jumps over the lazy dog",
        "ZEROS_15",
        "ZEROS_16",
        "ZEROS_17",
        "ZEROS_63",
        "ZEROS_64",
        "ZEROS_65",
        "LARGE_1KB",
        "HUGE_1MB",
        "COUNTING_256",
    ];
    let seeds: [u64; 3] = [0, 1, 0xDEAD_BEEF];

    let mut vectors = Vec::new();
    for tag in tags {
        let input = named_input(tag);
        for seed in seeds {
            vectors.push(json!({
                "input": tag,
                "seed": seed,
                "hash": format!("{:016x}", muon::hash_seeded(&input, seed)),
                "bytesum": muon::bytesum(&input),
            }));
        }
    }

    // PRNG vectors: nonce and length pairs.
    let mut prng = Vec::new();
    for (nonce, len) in [(0u64, 5usize), (0, 64), (7, 100), (0xC0FFEE, 256)] {
        let mut buf = vec![0u8; len];
        muon::generate(&mut buf, nonce);
        prng.push(json!({
            "nonce": nonce,
            "len": len,
            "bytes": hex::encode(&buf),
        }));
    }

    let doc = json!({
        "backend": muon::active_backend(),
        "vectors": vectors,
        "generate": prng,
    });
    println!("{}", serde_json::to_string_pretty(&doc).unwrap());
}
