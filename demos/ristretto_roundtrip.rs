//! Hash an arbitrary 64-byte input into the Ristretto255 group, encode it,
//! and confirm decoding reproduces the same element.

use ed25519_ristretto::ristretto::RistrettoPoint;

fn main() {
    let input = [7u8; 64];
    let point = RistrettoPoint::from_hash(&input);

    let encoded = point.encode();
    let decoded = RistrettoPoint::decode(&encoded).expect("hash-to-group output must decode");

    println!("Encoded: {}", hex::encode(encoded));
    println!("Round-trip ok: {}", decoded.equals(&point));
    assert!(decoded.equals(&point));
}
