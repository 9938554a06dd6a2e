//! Cross-module property checks that don't belong to any single unit —
//! sign/verify round trips across many seeds, base-point precompute
//! agreement, and Ristretto hash-to-group well-formedness.

use ed25519_ristretto::curve::BASE_POINT;
use ed25519_ristretto::precompute;
use ed25519_ristretto::ristretto::RistrettoPoint;
use ed25519_ristretto::scalar::Scalar;
use ed25519_ristretto::{ed25519, utils};

fn deterministic_seeds(n: u8) -> Vec<[u8; 32]> {
    (0..n)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i;
            seed[31] = i.wrapping_mul(7).wrapping_add(1);
            seed
        })
        .collect()
}

#[test]
fn sign_and_verify_round_trip_across_many_seeds_and_messages() {
    for seed in deterministic_seeds(16) {
        let public_key = ed25519::get_public_key(&seed).unwrap();
        for message in [&b""[..], b"x", b"a longer message exercising SHA-512 chunking a bit"] {
            let signature = ed25519::sign(message, &seed).unwrap();
            assert!(ed25519::verify(&signature, message, &public_key));
        }
    }
}

#[test]
fn verify_fails_across_mismatched_message_and_key_pairs() {
    let seeds = deterministic_seeds(4);
    let message = b"the original message";
    let signature = ed25519::sign(message, &seeds[0]).unwrap();
    let other_public_key = ed25519::get_public_key(&seeds[1]).unwrap();

    assert!(!ed25519::verify(&signature, b"a different message", &ed25519::get_public_key(&seeds[0]).unwrap()));
    assert!(!ed25519::verify(&signature, message, &other_public_key));
}

#[test]
fn windowed_base_multiply_matches_variable_base_ladder() {
    for n in [0u64, 1, 2, 3, 5, 255, 65537, 1 << 40] {
        let k = Scalar::from_u64(n);
        let windowed = precompute::multiply_base(&k);
        let ladder = BASE_POINT.multiply_unsafe(&k);
        assert!(windowed.equals(&ladder), "mismatch at k={n}");
    }
}

#[test]
fn get_public_key_is_stable_across_window_widths() {
    let seeds = deterministic_seeds(8);
    let narrow: Vec<_> = seeds.iter().map(|s| ed25519::get_public_key(s).unwrap()).collect();

    utils::precompute_base_point(8);
    let wide: Vec<_> = seeds.iter().map(|s| ed25519::get_public_key(s).unwrap()).collect();
    utils::precompute_base_point(precompute::DEFAULT_WINDOW);

    assert_eq!(narrow, wide);
}

#[test]
fn ristretto_hash_to_group_produces_well_formed_canonical_elements() {
    let inputs: [[u8; 64]; 4] = [[0u8; 64], [1u8; 64], [0xffu8; 64], {
        let mut buf = [0u8; 64];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = i as u8;
        }
        buf
    }];

    for input in inputs {
        let p = RistrettoPoint::from_hash(&input);
        let encoded = p.encode();

        // The canonical Ristretto encoding of the identity is all-zero;
        // a hash input overwhelmingly unlikely to land exactly on it
        // should not either, giving a basic non-degeneracy sanity check.
        assert_ne!(encoded, [0u8; 32]);

        let decoded = RistrettoPoint::decode(&encoded).expect("hash-to-group output must decode");
        assert!(decoded.equals(&p));
        assert_eq!(decoded.encode(), encoded);
    }
}

#[test]
fn ristretto_encode_decode_round_trips_over_several_hash_inputs() {
    for seed in 0u8..32 {
        let mut input = [0u8; 64];
        input[0] = seed;
        input[32] = seed.wrapping_mul(3).wrapping_add(11);
        let p = RistrettoPoint::from_hash(&input);
        let encoded = p.encode();
        let decoded = RistrettoPoint::decode(&encoded).expect("must decode");
        assert_eq!(decoded.encode(), encoded);
    }
}
