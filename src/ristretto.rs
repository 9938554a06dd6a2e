//! Ristretto255: a prime-order group built as a quotient of the Curve25519
//! Edwards curve, eliminating the cofactor-8 small-subgroup cofactor
//! headaches that bite raw Edwards-point protocols.
//!
//! [`RistrettoPoint`] wraps an [`ExtendedPoint`] that is not necessarily
//! itself canonical — many `ExtendedPoint`s map to the same
//! `RistrettoPoint` — and exposes the bit-exact 32-byte encode/decode and
//! the two-Elligator-maps-and-add hash-to-group construction.

use num_bigint::BigUint;
use num_traits::Num;
use once_cell::sync::Lazy;

use crate::curve::{ExtendedPoint, EDWARDS_D};
use crate::error::RistrettoDecodeError;
use crate::field::{self, FieldElement, SQRT_M1};

/// 1/sqrt(a - d) = 1/sqrt(-1 - d), used in the encode/decode rotation step.
pub static INVSQRT_A_MINUS_D: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "54469307008909316920995813868745141605393597292927456921205312896311721017578",
            10,
        )
        .unwrap(),
    )
});

/// sqrt((a - d) - 1) = sqrt(-d - 2), used by the Elligator map.
pub static SQRT_AD_MINUS_ONE: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "25063068953384623474111414158702152701244531502492656460079210482610430750235",
            10,
        )
        .unwrap(),
    )
});

/// (1-d)^2, used by the Elligator map's denominator.
pub static ONE_MINUS_D_SQ: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "1159843021668779879193775521855586647937357759715417654439879720876111806838",
            10,
        )
        .unwrap(),
    )
});

/// (d-1)^2, used by the Elligator map's numerator.
pub static D_MINUS_ONE_SQ: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::from_str_radix(
            "40440834346308536858101042469323190826248399146238708352240133220865137265952",
            10,
        )
        .unwrap(),
    )
});

#[derive(Debug, Clone)]
pub struct RistrettoPoint(ExtendedPoint);

impl RistrettoPoint {
    pub fn identity() -> Self {
        RistrettoPoint(ExtendedPoint::identity())
    }

    pub fn inner(&self) -> &ExtendedPoint {
        &self.0
    }

    pub fn add(&self, other: &RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self.0.add(&other.0))
    }

    pub fn negate(&self) -> RistrettoPoint {
        RistrettoPoint(self.0.negate())
    }

    /// Canonical Ristretto equality: decode-independent, computed directly
    /// from the X,Y coordinates of the two (possibly different) Edwards
    /// representatives. X1*Y2 = X2*Y1 is necessary and sufficient here — a
    /// validly-encoded Ristretto point can never have Y1*Y2 = X1*X2 = 0.
    pub fn equals(&self, other: &RistrettoPoint) -> bool {
        let a = &self.0;
        let b = &other.0;
        (a.x() * b.y()) == (b.x() * a.y())
    }

    /// Encode this point to its canonical 32-byte Ristretto representation.
    pub fn encode(&self) -> [u8; 32] {
        let p = &self.0;
        let u1 = (p.z() + p.y()) * (p.z() - p.y());
        let u2 = p.x() * p.y();
        let (_, inv) = field::sqrt_ratio_i(&FieldElement::one(), &(u1.clone() * u2.square()));
        let d1 = &u1 * &inv;
        let d2 = &u2 * &inv;
        let z_inv = &(&d1 * &d2) * p.t();

        let t_zinv = p.t() * &z_inv;
        let rotate = t_zinv.is_negative();

        let (x, y, d2) = if rotate {
            (
                p.y() * &*SQRT_M1,
                p.x() * &*SQRT_M1,
                &d2 * &*INVSQRT_A_MINUS_D,
            )
        } else {
            (p.x().clone(), p.y().clone(), d2)
        };

        let x_zinv = &x * &z_inv;
        let y = y.conditional_negate(x_zinv.is_negative());

        let s = ((p.z() - &y) * &d1).to_nonnegative();
        s.to_bytes_32()
    }

    /// Decode 32 bytes per the Ristretto255 reference recipe.
    pub fn decode(bytes: &[u8]) -> Result<Self, RistrettoDecodeError> {
        if bytes.len() != 32 {
            return Err(RistrettoDecodeError::InvalidLength);
        }
        let s = FieldElement::from_le_bytes_canonical(bytes)
            .ok_or(RistrettoDecodeError::NonCanonical)?;
        if s.is_negative() {
            return Err(RistrettoDecodeError::NegativeS);
        }

        let ss = s.square();
        let u1 = FieldElement::one() - &ss;
        let u2 = FieldElement::one() + &ss;
        let u2_sq = u2.square();

        let v = -(&*EDWARDS_D * &u1.square()) - &u2_sq;
        let (was_square, inv) = field::sqrt_ratio_i(&FieldElement::one(), &v);
        if !was_square {
            return Err(RistrettoDecodeError::NotSquare);
        }

        let dx = &inv * &u2;
        let dy = &(&inv * &dx) * &v;

        let x = (&(&s + &s) * &dx).to_nonnegative();
        let y = &u1 * &dy;
        let t = &x * &y;

        if t.is_negative() || y.is_zero() {
            return Err(RistrettoDecodeError::ResidualCheckFailed);
        }

        Ok(RistrettoPoint(ExtendedPoint {
            x,
            y,
            z: FieldElement::one(),
            t,
        }))
    }

    /// Map a 64-byte hash to a group element via two Elligator applications
    /// and a point addition, giving a well-distributed hash-to-group.
    pub fn from_hash(bytes: &[u8; 64]) -> Self {
        let mut r0 = [0u8; 32];
        let mut r1 = [0u8; 32];
        r0.copy_from_slice(&bytes[0..32]);
        r1.copy_from_slice(&bytes[32..64]);

        let p0 = elligator(&FieldElement::from_le_bytes_reduced(&r0));
        let p1 = elligator(&FieldElement::from_le_bytes_reduced(&r1));
        RistrettoPoint(p0.add(&p1))
    }
}

/// The Ristretto255 Elligator map: field element -> curve point.
fn elligator(r0: &FieldElement) -> ExtendedPoint {
    let one = FieldElement::one();
    let r = &*SQRT_M1 * r0.square();
    let ns = (&r + &one) * &*ONE_MINUS_D_SQ;
    let c = -one.clone();
    let d = (&c - (&*EDWARDS_D * &r)) * (&r + &*EDWARDS_D);

    let (was_square, s) = field::sqrt_ratio_i(&ns, &d);
    let s_prime = -(&s * r0).to_nonnegative();

    let s = if was_square { s } else { s_prime };
    let c = if was_square { c } else { r.clone() };

    let n = &c * &(&r - &one) * &*D_MINUS_ONE_SQ - &d;
    let s2 = s.square();

    let w0 = (&s + &s) * &d;
    let w1 = &n * &*SQRT_AD_MINUS_ONE;
    let w2 = &one - &s2;
    let w3 = &one + &s2;

    ExtendedPoint {
        x: &w0 * &w3,
        y: &w2 * &w1,
        z: &w1 * &w3,
        t: &w0 * &w2,
    }
}
