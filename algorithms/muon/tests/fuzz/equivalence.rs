use bolero::check;
use muon::kernels::portable;
use muon::{bytesum, generate, hash_seeded};

#[test]
fn fuzz_backend_equivalence() {
    check!()
        .with_type::<(Vec<u8>, u64)>()
        .for_each(|(data, seed)| {
            // The dispatched backend and the portable reference must agree
            // on every operation for arbitrary inputs.
            assert_eq!(
                hash_seeded(data, *seed),
                portable::hash(data, *seed),
                "hash diverged from reference"
            );

            assert_eq!(
                bytesum(data),
                portable::bytesum(data),
                "bytesum diverged from reference"
            );

            let expected: u64 = data
                .iter()
                .fold(0u64, |acc, &b| acc.wrapping_add(u64::from(b)));
            assert_eq!(bytesum(data), expected, "bytesum arithmetic wrong");
        });
}

#[test]
fn fuzz_generate_equivalence() {
    check!()
        .with_type::<(u16, u64)>()
        .for_each(|(len, nonce)| {
            let len = usize::from(*len) % 1024;
            let mut dispatched = vec![0u8; len];
            let mut reference = vec![0u8; len];
            generate(&mut dispatched, *nonce);
            portable::generate(&mut reference, *nonce);
            assert_eq!(dispatched, reference, "generate diverged from reference");
        });
}
