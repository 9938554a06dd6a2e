//! Arithmetic in the prime field F_p, p = 2^255 - 19.
//!
//! [`FieldElement`] wraps a reduced `BigUint` in `[0, p)`. Every externally
//! observable value is already reduced; the only place a non-canonical
//! integer can enter is [`FieldElement::from_le_bytes_canonical`], which
//! rejects it outright.

use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::{Num, One, Zero};
use once_cell::sync::Lazy;

/// p = 2^255 - 19.
pub static P: Lazy<BigUint> = Lazy::new(|| {
    BigUint::from_str_radix(
        "57896044618658097711785492504343953926634992332820282019728792003956564819949",
        10,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn new(n: BigUint) -> Self {
        FieldElement(n % &*P)
    }

    pub fn from_u64(n: u64) -> Self {
        FieldElement::new(BigUint::from(n))
    }

    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn to_biguint(&self) -> BigUint {
        self.0.clone()
    }

    pub fn square(&self) -> Self {
        FieldElement((&self.0 * &self.0) % &*P)
    }

    /// self^e mod p, for an arbitrary non-negative exponent.
    pub fn pow(&self, e: &BigUint) -> Self {
        FieldElement(self.0.modpow(e, &*P))
    }

    /// Multiplicative inverse via Fermat's little theorem: self^(p-2).
    /// By convention 0^-1 = 0; the caller decides whether that is an error.
    pub fn invert(&self) -> Self {
        if self.is_zero() {
            return FieldElement::zero();
        }
        let exp = &*P - BigUint::from(2u32);
        self.pow(&exp)
    }

    /// Least-significant bit of the canonical little-endian encoding. This is
    /// the "sign" convention used throughout RFC 8032 and Ristretto255: it
    /// must match the reference bit-for-bit or every downstream encoding
    /// breaks interoperability.
    pub fn is_negative(&self) -> bool {
        self.0.bit(0)
    }

    /// Conditionally negate `self`, returning `-self` when `choice` is true.
    pub fn conditional_negate(&self, choice: bool) -> Self {
        if choice {
            -self.clone()
        } else {
            self.clone()
        }
    }

    /// The non-negative representative of a value known up to sign: negate
    /// if the low bit of the canonical encoding is set.
    pub fn to_nonnegative(&self) -> Self {
        self.conditional_negate(self.is_negative())
    }

    /// Parse a little-endian byte slice into a field element, rejecting any
    /// input that does not already represent a value `< p` (non-canonical).
    pub fn from_le_bytes_canonical(bytes: &[u8]) -> Option<Self> {
        let n = BigUint::from_bytes_le(bytes);
        if n < *P {
            Some(FieldElement(n))
        } else {
            None
        }
    }

    /// Parse a little-endian byte slice, reducing mod p rather than
    /// rejecting an out-of-range value. Used internally when building
    /// candidate values before a canonicity check, never at a decode
    /// boundary that must reject non-canonical input.
    pub fn from_le_bytes_reduced(bytes: &[u8]) -> Self {
        FieldElement::new(BigUint::from_bytes_le(bytes))
    }

    /// Serialize to little-endian bytes, zero-padded/truncated to `len`.
    pub fn to_le_bytes_len(&self, len: usize) -> Vec<u8> {
        let mut b = self.0.to_bytes_le();
        b.resize(len, 0u8);
        b
    }

    pub fn to_bytes_32(&self) -> [u8; 32] {
        let v = self.to_le_bytes_len(32);
        let mut out = [0u8; 32];
        out.copy_from_slice(&v);
        out
    }
}

/// a - b mod p, without relying on checked subtraction of BigUint.
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        a + p - b
    }
}

impl Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self {
        FieldElement(sub_mod(&P, &self.0, &P))
    }
}
impl Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement(sub_mod(&P, &self.0, &P))
    }
}

impl Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        FieldElement((self.0 + rhs.0) % &*P)
    }
}
impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((self.0 + &rhs.0) % &*P)
    }
}
impl Add<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement((&self.0 + rhs.0) % &*P)
    }
}
impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &rhs.0) % &*P)
    }
}

impl Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        FieldElement(sub_mod(&self.0, &rhs.0, &P))
    }
}
impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement(sub_mod(&self.0, &rhs.0, &P))
    }
}
impl Sub<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement(sub_mod(&self.0, &rhs.0, &P))
    }
}
impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement(sub_mod(&self.0, &rhs.0, &P))
    }
}

impl Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        FieldElement((self.0 * rhs.0) % &*P)
    }
}
impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((self.0 * &rhs.0) % &*P)
    }
}
impl Mul<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement((&self.0 * rhs.0) % &*P)
    }
}
impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % &*P)
    }
}

/// sqrt(-1) mod p. p = 2^255 - 19 is 1 mod 4, so -1 is a quadratic residue.
pub static SQRT_M1: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "19681161376707505956807079304988542015446066515923890162744021073123829784752",
            10,
        )
        .unwrap(),
    )
});

/// Combined inverse-square-root of a ratio, following the p ≡ 5 (mod 8)
/// recipe shared by RFC 8032 and the Ristretto255 reference implementation.
///
/// Returns `(true, r)` with `r^2 * v == u` when `u/v` is a nonzero square.
/// Returns `(false, r)` otherwise, where `r` is still well-defined and is
/// what Ristretto decoding uses to detect and reject a non-square ratio.
pub fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (bool, FieldElement) {
    // (p-5)/8, used because p = 2^255-19 is 5 (mod 8).
    static P_MINUS_5_DIV_8: Lazy<BigUint> = Lazy::new(|| (&*P - BigUint::from(5u32)) >> 3);

    let v3 = v.square() * v;
    let v7 = v3.square() * v;
    let uv7 = u * &v7;
    let mut r = uv7.pow(&P_MINUS_5_DIV_8) * u * &v3;

    let check = v * r.square();
    let i = &*SQRT_M1;

    let correct_sign = check == *u;
    let flipped_sign = check == -u.clone();
    let flipped_sign_i = check == (-u.clone()) * i;

    if flipped_sign || flipped_sign_i {
        r = r * i;
    }

    let was_square = correct_sign || flipped_sign;
    let r = r.to_nonnegative();
    (was_square, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_add_sub_roundtrip() {
        let a = FieldElement::from_u64(123456789);
        let b = FieldElement::from_u64(987654321);
        let c = a.clone() + b.clone();
        assert_eq!(c - b, a);
    }

    #[test]
    fn field_neg_is_additive_inverse() {
        let a = FieldElement::from_u64(42);
        assert!((a.clone() + (-a)).is_zero());
    }

    #[test]
    fn field_invert_is_multiplicative_inverse() {
        let a = FieldElement::from_u64(7);
        let inv = a.invert();
        assert!((a * inv).is_one());
    }

    #[test]
    fn field_invert_of_zero_is_zero() {
        assert!(FieldElement::zero().invert().is_zero());
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        let minus_one = -FieldElement::one();
        assert_eq!(SQRT_M1.square(), minus_one);
    }

    #[test]
    fn sqrt_ratio_of_a_square_recovers_root() {
        let t = FieldElement::from_u64(12345);
        let u = t.square();
        let v = FieldElement::one();
        let (is_square, r) = sqrt_ratio_i(&u, &v);
        assert!(is_square);
        assert_eq!(r.square(), u);
    }

    #[test]
    fn canonical_byte_rejection() {
        let mut too_big = P.to_bytes_le();
        too_big.resize(32, 0);
        assert!(FieldElement::from_le_bytes_canonical(&too_big).is_none());
    }
}
