//! The scalar ring Z/nZ, n = 2^252 + 27742317777372353535851937790883648493.
//!
//! [`Scalar`] is used for private-key-derived exponents, signature
//! components (`s`, the challenge `k`), and scalar-multiplication inputs.
//! There is no signed form; reduction mod n happens on every construction
//! from bytes, including the 64-byte SHA-512 outputs used as nonce/challenge.

use std::ops::{Add, Mul, Sub};

use num_bigint::BigUint;
use num_traits::{Num, One, Zero};
use once_cell::sync::Lazy;
use zeroize::Zeroize;

/// n = 2^252 + 27742317777372353535851937790883648493, the order of the
/// Ed25519 base point / the Ristretto255 prime-order group.
pub static ORDER: Lazy<BigUint> = Lazy::new(|| {
    BigUint::from_str_radix(
        "7237005577332262213973186563042994240857116359379907606001950938285454250989",
        10,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn new(n: BigUint) -> Self {
        Scalar(n % &*ORDER)
    }

    pub fn from_u64(n: u64) -> Self {
        Scalar::new(BigUint::from(n))
    }

    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    pub fn one() -> Self {
        Scalar(BigUint::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_biguint(&self) -> BigUint {
        self.0.clone()
    }

    /// Reduce an arbitrary-length little-endian byte string mod n. Used for
    /// both 32-byte clamped secret scalars and 64-byte SHA-512 digests.
    pub fn from_bytes_mod_order(bytes: &[u8]) -> Self {
        Scalar::new(BigUint::from_bytes_le(bytes))
    }

    /// Parse exactly 32 little-endian bytes as a scalar without reducing;
    /// fails if the value is not already `< n` (used by signature
    /// verification, which must reject `s >= n` rather than silently
    /// wrapping it).
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let n = BigUint::from_bytes_le(bytes);
        if n < *ORDER {
            Some(Scalar(n))
        } else {
            None
        }
    }

    pub fn to_bytes_32(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    /// Little-endian bit `i` of this scalar's 256-bit zero-padded
    /// representation, used by the scalar-mul engine's windowing.
    pub fn bit(&self, i: u32) -> bool {
        self.0.bit(i as u64)
    }
}

impl Add for Scalar {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Scalar((self.0 + rhs.0) % &*ORDER)
    }
}
impl Add<&Scalar> for &Scalar {
    type Output = Scalar;
    fn add(self, rhs: &Scalar) -> Scalar {
        Scalar((&self.0 + &rhs.0) % &*ORDER)
    }
}

impl Sub for Scalar {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Scalar(self.0 - rhs.0)
        } else {
            Scalar(&*ORDER + self.0 - rhs.0)
        }
    }
}

impl Mul for Scalar {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Scalar((self.0 * rhs.0) % &*ORDER)
    }
}
impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar((&self.0 * &rhs.0) % &*ORDER)
    }
}

/// Logical zeroization: replaces the value with 0 so a `Zeroizing<Scalar>`
/// no longer carries key material after drop. `BigUint`'s own heap buffer
/// is not guaranteed to be wiped (it has no `Zeroize` impl of its own),
/// the same best-effort caveat the rest of this crate's secret handling
/// documents.
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = BigUint::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reduces_64_byte_input() {
        let bytes = [0xffu8; 64];
        let s = Scalar::from_bytes_mod_order(&bytes);
        assert!(s.to_biguint() < *ORDER);
    }

    #[test]
    fn canonical_bytes_reject_out_of_range() {
        let mut too_big = ORDER.to_bytes_le();
        too_big.resize(32, 0);
        let arr: [u8; 32] = too_big.try_into().unwrap();
        assert!(Scalar::from_canonical_bytes(&arr).is_none());
    }

    #[test]
    fn add_sub_are_inverse() {
        let a = Scalar::from_u64(123);
        let b = Scalar::from_u64(456);
        let sum = &a + &b;
        assert_eq!(sum - a, b);
    }

    #[test]
    fn bit_matches_shift() {
        let s = Scalar::from_u64(0b1010);
        assert!(!s.bit(0));
        assert!(s.bit(1));
        assert!(!s.bit(2));
        assert!(s.bit(3));
    }

    #[test]
    fn zeroize_clears_to_zero() {
        let mut s = Scalar::from_u64(0xdead_beef);
        s.zeroize();
        assert!(s.is_zero());
    }
}
