//! Typed failure values for every decoding and key-handling boundary.
//!
//! `verify` never surfaces any of these: RFC 8032 and the Ristretto255
//! reference deliberately avoid giving an attacker an oracle that
//! distinguishes a malformed signature from a forged one, so every error
//! below is funneled into a plain `bool` at that one boundary.

use thiserror::Error;

/// Failures from decoding a 32-byte Edwards point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input was not exactly 32 bytes.
    #[error("encoded point must be 32 bytes")]
    InvalidLength,
    /// The y-coordinate bytes do not represent a value `< p`.
    #[error("encoded point is not a canonical field element")]
    NonCanonical,
    /// No x exists for the given y under the curve equation, or the
    /// recovered x did not have the requested sign.
    #[error("encoded point is not on the curve")]
    NotOnCurve,
}

/// Failures from decoding a 32-byte Ristretto255 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RistrettoDecodeError {
    /// The input was not exactly 32 bytes.
    #[error("encoded element must be 32 bytes")]
    InvalidLength,
    /// Re-encoding the parsed field element does not reproduce the input.
    #[error("encoded element is not a canonical field element")]
    NonCanonical,
    /// The encoded field element has its sign bit set (s must be
    /// non-negative).
    #[error("encoded element is negative")]
    NegativeS,
    /// `-d*u1^2 - u2^2` is not a square; the 32 bytes do not correspond to
    /// any Ristretto255 element.
    #[error("encoded element does not correspond to a valid group element")]
    NotSquare,
    /// The candidate point failed the residual consistency checks imposed
    /// by the Ristretto255 decode recipe.
    #[error("decoded candidate failed residual Ristretto checks")]
    ResidualCheckFailed,
}

/// Failures from Ed25519 key material of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// A seed was not exactly 32 bytes.
    #[error("seed must be 32 bytes")]
    InvalidSeedLength,
    /// A signature was not exactly 64 bytes.
    #[error("signature must be 64 bytes")]
    InvalidSignatureLength,
}
