//! Standalone helpers adjoining the core: cryptographically random seed
//! generation and the opt-in precompute-table control surface.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::curve::{ExtendedPoint, BASE_POINT};
use crate::precompute;

/// Generate a cryptographically random 32-byte Ed25519 seed, suitable for
/// [`crate::ed25519::get_public_key`] and [`crate::ed25519::sign`].
pub fn random_private_key() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// (Re-)build and cache the windowed scalar-multiplication table for
/// `point` at window width `window`, replacing whatever table was
/// previously cached for that `(point, window)` pair. This is an opt-in
/// operation for callers who want to trade memory for speed (wider
/// windows) or warm the cache ahead of time; it is not required for
/// correctness.
pub fn precompute(window: u32, point: &ExtendedPoint) {
    precompute::precompute(point, window);
}

/// Same as [`precompute`], specialized to the Ed25519 base point.
pub fn precompute_base_point(window: u32) {
    precompute::precompute(&BASE_POINT, window);
}
