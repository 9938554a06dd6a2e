//! The twisted Edwards curve −x² + y² = 1 + d·x²·y² (Curve25519 in Edwards
//! form, a = −1) and its two point representations: affine [`Point`] and
//! the extended projective [`ExtendedPoint`] used for exception-free
//! addition.

use std::ops::Neg;

use num_bigint::BigUint;
use num_traits::Num;
use once_cell::sync::Lazy;

use crate::error::DecodeError;
use crate::field::{self, FieldElement};
use crate::scalar::Scalar;

/// d = −121665/121666 mod p.
pub static EDWARDS_D: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "37095705934669439343138083508754565189542113879843219016388785533085940283555",
            10,
        )
        .unwrap(),
    )
});

/// Curve25519's cofactor: the full Edwards curve group has order h·n.
pub const COFACTOR: u32 = 8;

/// 1 + d*x2*y2, the shared denominator of the curve equation's right-hand
/// side and the unified addition formulas.
fn curve_rhs(x2: &FieldElement, y2: &FieldElement) -> FieldElement {
    FieldElement::one() + &*EDWARDS_D * x2 * y2
}

/// An affine point (x, y) on the twisted Edwards curve. Not guaranteed to
/// lie in the prime-order subgroup unless it was produced by signing, key
/// derivation, or explicit subgroup checking — [`Point::from_bytes`] accepts
/// any on-curve point, including low-order ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    x: FieldElement,
    y: FieldElement,
}

impl Point {
    /// Construct from (x, y), checking the curve equation −x²+y² = 1+dx²y².
    pub fn new(x: FieldElement, y: FieldElement) -> Option<Self> {
        let x2 = x.square();
        let y2 = y.square();
        let lhs = y2.clone() - &x2;
        let rhs = curve_rhs(&x2, &y2);
        if lhs == rhs {
            Some(Point { x, y })
        } else {
            None
        }
    }

    pub fn identity() -> Self {
        Point {
            x: FieldElement::zero(),
            y: FieldElement::one(),
        }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Recover x from y and a sign bit by solving x² = (y²−1)/(d·y²+1).
    fn solve_x(y: &FieldElement, sign: bool) -> Option<FieldElement> {
        let y2 = y.square();
        let num = y2.clone() - FieldElement::one();
        let den = &*EDWARDS_D * &y2 + FieldElement::one();
        if den.is_zero() {
            return None;
        }
        let x2 = num * den.invert();
        let (is_square, mut x) = field::sqrt_ratio_i(&x2, &FieldElement::one());
        if !is_square {
            return None;
        }
        if x.is_negative() != sign {
            x = -x;
        }
        Some(x)
    }

    /// Decode 32 bytes per RFC 8032: y little-endian with the sign of x
    /// packed into the top bit of the last byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != 32 {
            return Err(DecodeError::InvalidLength);
        }
        let sign = (bytes[31] >> 7) & 1 == 1;
        let mut y_bytes = [0u8; 32];
        y_bytes.copy_from_slice(bytes);
        y_bytes[31] &= 0x7f;
        let y = FieldElement::from_le_bytes_canonical(&y_bytes).ok_or(DecodeError::NonCanonical)?;
        let x = Point::solve_x(&y, sign).ok_or(DecodeError::NotOnCurve)?;
        Ok(Point { x, y })
    }

    /// Encode to 32 bytes: y with the sign of x in the top bit.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = self.y.to_bytes_32();
        if self.x.is_negative() {
            out[31] |= 0x80;
        } else {
            out[31] &= 0x7f;
        }
        out
    }

    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: self.x.clone(),
            y: self.y.clone(),
            z: FieldElement::one(),
            t: &self.x * &self.y,
        }
    }

    /// Convert to the Montgomery u-coordinate: u = (1+y)/(1-y) mod p. This
    /// is the one Edwards→Montgomery operation this crate offers; it does
    /// not implement the X25519 Diffie-Hellman ladder (see crate docs).
    pub fn to_x25519(&self) -> [u8; 32] {
        let one = FieldElement::one();
        let num = one.clone() + &self.y;
        let den = one - &self.y;
        let u = num * den.invert();
        u.to_bytes_32()
    }
}

/// A point in extended projective coordinates (X, Y, Z, T) with x = X/Z,
/// y = Y/Z, x·y = T/Z. Enables addition formulas with no exceptional cases
/// within the prime-order subgroup. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ExtendedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl ExtendedPoint {
    pub fn identity() -> Self {
        ExtendedPoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::one(),
            t: FieldElement::zero(),
        }
    }

    pub fn from_affine(p: &Point) -> Self {
        p.to_extended()
    }

    pub fn to_affine(&self) -> Point {
        let z_inv = self.z.invert();
        Point {
            x: &self.x * &z_inv,
            y: &self.y * &z_inv,
        }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }
    pub fn y(&self) -> &FieldElement {
        &self.y
    }
    pub fn z(&self) -> &FieldElement {
        &self.z
    }
    pub fn t(&self) -> &FieldElement {
        &self.t
    }

    /// Cross-multiplied affine equality: X1*Z2 = X2*Z1 and Y1*Z2 = Y2*Z1.
    pub fn equals(&self, other: &ExtendedPoint) -> bool {
        let x1z2 = &self.x * &other.z;
        let x2z1 = &other.x * &self.z;
        let y1z2 = &self.y * &other.z;
        let y2z1 = &other.y * &self.z;
        x1z2 == x2z1 && y1z2 == y2z1
    }

    pub fn negate(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: -self.x.clone(),
            y: self.y.clone(),
            z: self.z.clone(),
            t: -self.t.clone(),
        }
    }

    /// Unified twisted-Edwards addition, "add-2008-hwcd-3" specialized to
    /// a = −1: complete over the whole curve group, no exceptional inputs.
    pub fn add(&self, other: &ExtendedPoint) -> ExtendedPoint {
        let a = &self.x * &other.x;
        let b = &self.y * &other.y;
        let c = &*EDWARDS_D * &self.t * &other.t;
        let d = &self.z * &other.z;
        let e = (&self.x + &self.y) * (&other.x + &other.y) - &a - &b;
        let f = &d - &c;
        let g = &d + &c;
        let h = &b + &a; // H = B - a*A, a = -1

        ExtendedPoint {
            x: &e * &f,
            y: &g * &h,
            z: &f * &g,
            t: &e * &h,
        }
    }

    /// Point doubling ("dbl-2008-hwcd"), specialized to a = −1.
    pub fn double(&self) -> ExtendedPoint {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square() + self.z.square();
        let h = &a + &b;
        let e = (&self.x + &self.y).square() - &h; // 2*X*Y
        let g = &b - &a;
        let f = &c - &g;

        ExtendedPoint {
            x: &e * &f,
            y: &g * &h,
            z: &g * &f,
            t: &e * &h,
        }
    }

    pub fn subtract(&self, other: &ExtendedPoint) -> ExtendedPoint {
        self.add(&other.negate())
    }

    /// Variable-base double-and-add. Does not consult any precomputed
    /// table; control flow depends on the scalar's bits, so this must not
    /// be used with a secret scalar unless the caller separately hardens
    /// against timing leakage (hence the `_unsafe` name — `k` is assumed
    /// public, as it always is during signature verification).
    pub fn multiply_unsafe(&self, k: &Scalar) -> ExtendedPoint {
        let mut result = ExtendedPoint::identity();
        let mut addend = self.clone();
        let bits = k.to_biguint().bits().max(1);
        for i in 0..bits {
            if k.bit(i as u32) {
                result = result.add(&addend);
            }
            addend = addend.double();
        }
        result
    }
}

impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
impl Eq for ExtendedPoint {}

impl Neg for ExtendedPoint {
    type Output = ExtendedPoint;
    fn neg(self) -> ExtendedPoint {
        self.negate()
    }
}
impl Neg for &ExtendedPoint {
    type Output = ExtendedPoint;
    fn neg(self) -> ExtendedPoint {
        self.negate()
    }
}

/// Gx from RFC 8032 / the Ristretto255 test vectors.
pub static BASE_X: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "15112221349535400772501151409588531511454012693041857206046113283949847762202",
            10,
        )
        .unwrap(),
    )
});

/// Gy from RFC 8032 / the Ristretto255 test vectors.
pub static BASE_Y: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "46316835694926478169428394003475163141307993866256225615783033603165251855960",
            10,
        )
        .unwrap(),
    )
});

/// The Ed25519 base point B, as an `ExtendedPoint` ready for scalar
/// multiplication.
pub static BASE_POINT: Lazy<ExtendedPoint> = Lazy::new(|| {
    Point::new(BASE_X.clone(), BASE_Y.clone())
        .expect("hard-coded base point must satisfy the curve equation")
        .to_extended()
});
