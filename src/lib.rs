//! Pure Rust Ed25519 signatures (RFC 8032) and Ristretto255 group
//! arithmetic over Curve25519.
//!
//! The crate is organized bottom-up: [`field`] (arithmetic mod
//! `2^255 - 19`) and [`scalar`] (arithmetic mod the group order) underpin
//! [`curve`] (the twisted Edwards group, in both affine and extended
//! projective form) and [`precompute`] (variable-base and windowed
//! base-point scalar multiplication). [`ed25519`] and [`ristretto`] are
//! built on top of those: the former is the RFC 8032 signing protocol,
//! the latter the prime-order-group encoding used by protocols that need
//! one without cofactor headaches.
//!
//! ```
//! use ed25519_ristretto::{ed25519, utils};
//!
//! let seed = utils::random_private_key();
//! let public_key = ed25519::get_public_key(&seed).unwrap();
//! let signature = ed25519::sign(b"hello", &seed).unwrap();
//! assert!(ed25519::verify(&signature, b"hello", &public_key));
//! ```
//!
//! This crate does not promise constant-time execution beyond the final
//! signature comparison in [`ed25519::verify`] (see that module's docs);
//! it does not implement batch verification, key blinding, cofactored
//! verification, or the X25519 Diffie-Hellman ladder — only the
//! Edwards-to-Montgomery u-coordinate conversion needed to interoperate
//! with code that does ([`curve::Point::to_x25519`]).

pub mod curve;
pub mod ed25519;
pub mod error;
pub mod field;
pub mod precompute;
pub mod ristretto;
pub mod scalar;
pub mod utils;

pub use curve::{ExtendedPoint, Point};
pub use ed25519::{get_public_key, sign, verify};
pub use error::{DecodeError, KeyError, RistrettoDecodeError};
pub use field::FieldElement;
pub use ristretto::RistrettoPoint;
pub use scalar::Scalar;
