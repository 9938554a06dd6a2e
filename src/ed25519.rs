//! The Ed25519 signing protocol (RFC 8032 §5.1): key expansion, signing,
//! and verification, built on the scalar-mul engine and the SHA-512
//! collaborator.
//!
//! `verify` never surfaces a [`crate::error`] type: every internal
//! decoding failure funnels into a plain `false`, so a caller cannot use
//! this API to distinguish a malformed signature from a forged one.

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::curve::Point;
use crate::error::KeyError;
use crate::precompute::multiply_base;
use crate::scalar::Scalar;

fn sha512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}

/// Clamp the low 32-byte half of a seed's SHA-512 expansion per RFC 8032:
/// clear the lowest 3 bits of the first byte, clear the high bit of the
/// last byte, and set bit 254.
fn clamp(bytes: &mut [u8; 32]) {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
}

/// The expansion of a 32-byte seed into the scalar `a` used for scalar
/// multiplication and the `prefix` half mixed into the per-message nonce.
/// Lives only on the stack of `sign`/`get_public_key`; both fields are
/// wrapped in `Zeroizing` so they are scrubbed on drop on a best-effort
/// basis (see the crate-level caveat on what that guarantee does and does
/// not cover).
struct ExpandedSecretKey {
    a: Zeroizing<Scalar>,
    prefix: Zeroizing<[u8; 32]>,
}

impl ExpandedSecretKey {
    fn expand(seed: &[u8; 32]) -> Self {
        let mut h = sha512(&[&seed[..]]);
        let mut h_lo = [0u8; 32];
        h_lo.copy_from_slice(&h[0..32]);
        clamp(&mut h_lo);
        let a = Zeroizing::new(Scalar::from_bytes_mod_order(&h_lo));

        let mut prefix = [0u8; 32];
        prefix.copy_from_slice(&h[32..64]);

        h.zeroize();
        h_lo.zeroize();
        ExpandedSecretKey {
            a,
            prefix: Zeroizing::new(prefix),
        }
    }

    fn public_key_bytes(&self) -> [u8; 32] {
        multiply_base(&self.a).to_affine().to_bytes()
    }
}

/// Derive the 32-byte Ed25519 public key from a 32-byte seed.
pub fn get_public_key(seed: &[u8]) -> Result<[u8; 32], KeyError> {
    let seed: &[u8; 32] = seed.try_into().map_err(|_| KeyError::InvalidSeedLength)?;
    Ok(ExpandedSecretKey::expand(seed).public_key_bytes())
}

/// Sign `message` with the private key derived from the 32-byte `seed`,
/// per RFC 8032 §5.1.6: expand the seed, derive a deterministic nonce from
/// the prefix and message, commit to it as `R`, fold the Fiat-Shamir
/// challenge `k` into `s = r + k*a`.
pub fn sign(message: &[u8], seed: &[u8]) -> Result<[u8; 64], KeyError> {
    let seed: &[u8; 32] = seed.try_into().map_err(|_| KeyError::InvalidSeedLength)?;
    let expanded = ExpandedSecretKey::expand(seed);
    let public_key = expanded.public_key_bytes();

    let r = Scalar::from_bytes_mod_order(&sha512(&[&expanded.prefix[..], message]));
    let r_bytes = multiply_base(&r).to_affine().to_bytes();

    let k = Scalar::from_bytes_mod_order(&sha512(&[&r_bytes[..], &public_key[..], message]));
    let s = r + (k * (*expanded.a).clone());

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&r_bytes);
    signature[32..].copy_from_slice(&s.to_bytes_32());
    Ok(signature)
}

/// Verify a 64-byte `signature` over `message` against a 32-byte
/// `public_key`, per RFC 8032 §5.1.7's cofactorless check `s*B = R + k*A`.
/// Returns `false`, never an error, on any malformed input or failed
/// check — see the module-level caveat about oracle avoidance.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    if signature.len() != 64 {
        return false;
    }
    let (r_bytes, s_bytes) = signature.split_at(32);

    let a_point = match Point::from_bytes(public_key) {
        Ok(p) => p.to_extended(),
        Err(_) => return false,
    };

    let s_bytes: &[u8; 32] = match s_bytes.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };
    let s = match Scalar::from_canonical_bytes(s_bytes) {
        Some(s) => s,
        None => return false,
    };

    let r_point = match Point::from_bytes(r_bytes) {
        Ok(p) => p.to_extended(),
        Err(_) => return false,
    };

    let k = Scalar::from_bytes_mod_order(&sha512(&[r_bytes, public_key, message]));

    let lhs = multiply_base(&s).to_affine().to_bytes();
    let rhs = r_point.add(&a_point.multiply_unsafe(&k)).to_affine().to_bytes();

    lhs[..].ct_eq(&rhs[..]).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex32(s: &str) -> [u8; 32] {
        let v = hex::decode(s).unwrap();
        let mut out = [0u8; 32];
        out.copy_from_slice(&v);
        out
    }

    fn hex64(s: &str) -> [u8; 64] {
        let v = hex::decode(s).unwrap();
        let mut out = [0u8; 64];
        out.copy_from_slice(&v);
        out
    }

    // RFC 8032 section 7.1, test vector 1.
    #[test]
    fn rfc8032_vector_1() {
        let seed = hex32("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let expected_pk =
            hex32("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        let expected_sig = hex64(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        );

        let pk = get_public_key(&seed).unwrap();
        assert_eq!(pk, expected_pk);

        let sig = sign(b"", &seed).unwrap();
        assert_eq!(sig, expected_sig);
        assert!(verify(&sig, b"", &pk));
    }

    // RFC 8032 section 7.1, test vector 2.
    #[test]
    fn rfc8032_vector_2() {
        let seed = hex32("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
        let message = hex::decode("72").unwrap();
        let expected_sig = hex64(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        );

        let sig = sign(&message, &seed).unwrap();
        assert_eq!(sig, expected_sig);
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let seed = [7u8; 32];
        let pk = get_public_key(&seed).unwrap();
        let message = b"a message worth signing";
        let sig = sign(message, &seed).unwrap();
        assert!(verify(&sig, message, &pk));
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let seed = [7u8; 32];
        let pk = get_public_key(&seed).unwrap();
        let sig = sign(b"original", &seed).unwrap();
        assert!(!verify(&sig, b"tampered", &pk));
    }

    #[test]
    fn verify_rejects_flipped_signature_bit() {
        let seed = [3u8; 32];
        let pk = get_public_key(&seed).unwrap();
        let message = b"flip a bit, any bit";
        let mut sig = sign(message, &seed).unwrap();
        sig[0] ^= 1;
        assert!(!verify(&sig, message, &pk));
    }

    #[test]
    fn verify_rejects_wrong_length_signature() {
        let seed = [1u8; 32];
        let pk = get_public_key(&seed).unwrap();
        assert!(!verify(&[0u8; 63], b"m", &pk));
    }

    #[test]
    fn verify_rejects_s_greater_than_order() {
        let seed = [9u8; 32];
        let pk = get_public_key(&seed).unwrap();
        let message = b"s is pinned at the order";
        let mut sig = sign(message, &seed).unwrap();
        // Overwrite s with n's own little-endian bytes: n >= n, must be rejected.
        let mut n_bytes = [0u8; 32];
        let order_bytes = crate::scalar::ORDER.to_bytes_le();
        n_bytes[..order_bytes.len()].copy_from_slice(&order_bytes);
        sig[32..].copy_from_slice(&n_bytes);
        assert!(!verify(&sig, message, &pk));
    }

    #[test]
    fn get_public_key_rejects_wrong_length_seed() {
        assert!(matches!(
            get_public_key(&[0u8; 31]),
            Err(KeyError::InvalidSeedLength)
        ));
    }

    #[test]
    fn base_point_and_w8_precompute_agree_on_public_keys() {
        let seed = [42u8; 32];
        let default = get_public_key(&seed).unwrap();
        crate::precompute::precompute(&crate::curve::BASE_POINT, 8);
        let wide = get_public_key(&seed).unwrap();
        assert_eq!(default, wide);
        // restore the default window for any test running after this one.
        crate::precompute::precompute(&crate::curve::BASE_POINT, crate::precompute::DEFAULT_WINDOW);
    }
}
