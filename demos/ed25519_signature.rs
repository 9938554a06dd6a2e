//! Generate a key pair, sign a message, verify it, then show that
//! tampering with either the message or the signature is detected.

use ed25519_ristretto::{ed25519, utils};

fn main() {
    let seed = utils::random_private_key();
    let public_key = ed25519::get_public_key(&seed).expect("32-byte seed");
    println!("Public key: {}", hex::encode(public_key));

    let message = b"This is a test message.";
    println!("\nMessage: {}", String::from_utf8_lossy(message));

    let signature = ed25519::sign(message, &seed).expect("32-byte seed");
    println!("\nSignature: {}", hex::encode(signature));

    let is_valid = ed25519::verify(&signature, message, &public_key);
    println!("\nVerification result: {}", is_valid);
    assert!(is_valid);

    let tampered_message = b"This is a tampered message.";
    let tampered_is_valid = ed25519::verify(&signature, tampered_message, &public_key);
    println!("Verification with tampered message: {}", tampered_is_valid);
    assert!(!tampered_is_valid);

    let mut tampered_signature = signature;
    tampered_signature[0] ^= 1;
    let tampered_sig_is_valid = ed25519::verify(&tampered_signature, message, &public_key);
    println!("Verification with tampered signature: {}", tampered_sig_is_valid);
    assert!(!tampered_sig_is_valid);
}
