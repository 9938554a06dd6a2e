//! Windowed base-point scalar multiplication, backed by a process-wide
//! precomputation cache.
//!
//! For a fixed base point B and window width W, [`PrecomputeTable`] stores
//! every `k * 2^(W*i) * B` for `i` in `0..ceil(256/W)` and `k` in
//! `1..2^W`. Multiplying by a scalar then reduces to ⌈256/W⌉ table lookups
//! and additions — no per-bit doubling, since the doublings are baked into
//! the table at construction time.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::curve::{ExtendedPoint, BASE_POINT};
use crate::scalar::Scalar;

/// Default window width, matching the spec's recommended balance of table
/// size against multiplication speed.
pub const DEFAULT_WINDOW: u32 = 4;

pub struct PrecomputeTable {
    window: u32,
    window_count: u32,
    /// table[i * (2^W - 1) + (k - 1)] = k * 2^(W*i) * B
    entries: Vec<ExtendedPoint>,
}

impl PrecomputeTable {
    /// Build the table for `base` at window width `window`. Window 0 and
    /// windows wider than the scalar's bit budget are rejected by the
    /// caller-facing `precompute` function, not here.
    pub fn build(base: &ExtendedPoint, window: u32) -> Self {
        let window_count = (256 + window - 1) / window;
        let digits_per_window = (1u32 << window) - 1;

        let mut entries = Vec::with_capacity((digits_per_window * window_count) as usize);
        let mut window_base = base.clone();
        for _ in 0..window_count {
            let mut running = window_base.clone();
            entries.push(running.clone());
            for _ in 1..digits_per_window {
                running = running.add(&window_base);
                entries.push(running.clone());
            }
            for _ in 0..window {
                window_base = window_base.double();
            }
        }

        PrecomputeTable {
            window,
            window_count,
            entries,
        }
    }

    fn entry(&self, window_index: u32, digit: u32) -> &ExtendedPoint {
        let digits_per_window = (1u32 << self.window) - 1;
        &self.entries[(window_index * digits_per_window + (digit - 1)) as usize]
    }

    /// Multiply this table's base point by `k` using the windowed method:
    /// split `k` into `window_count` windows of `window` bits, sum each
    /// window's precomputed contribution with no intermediate doublings.
    pub fn multiply(&self, k: &Scalar) -> ExtendedPoint {
        let mut result = ExtendedPoint::identity();
        for window_index in 0..self.window_count {
            let digit = extract_window(k, window_index, self.window);
            if digit != 0 {
                result = result.add(self.entry(window_index, digit));
            }
        }
        result
    }
}

/// Extract the `window`-bit digit at `window_index` from the scalar's
/// little-endian bit representation (zero-padded to 256 bits).
fn extract_window(k: &Scalar, window_index: u32, window: u32) -> u32 {
    let start = window_index * window;
    let mut digit = 0u32;
    for b in 0..window {
        if k.bit(start + b) {
            digit |= 1 << b;
        }
    }
    digit
}

type CacheKey = (Vec<u8>, u32);

static CACHE: Lazy<RwLock<HashMap<CacheKey, Arc<PrecomputeTable>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn point_identity_bytes(point: &ExtendedPoint) -> Vec<u8> {
    point.to_affine().to_bytes().to_vec()
}

/// Fetch (building and caching if necessary) the table for `point` at
/// `window`. Concurrent callers racing to build the same (point, window)
/// key compute byte-identical tables, so last-writer-wins on the cache
/// slot is safe.
fn table_for(point: &ExtendedPoint, window: u32) -> Arc<PrecomputeTable> {
    let key = (point_identity_bytes(point), window);
    if let Some(table) = CACHE.read().unwrap().get(&key) {
        return table.clone();
    }
    let table = Arc::new(PrecomputeTable::build(point, window));
    CACHE.write().unwrap().insert(key, table.clone());
    table
}

/// Scalar-multiply the Ed25519 base point using the cached precomputation
/// table at the default window width.
pub fn multiply_base(k: &Scalar) -> ExtendedPoint {
    table_for(&BASE_POINT, DEFAULT_WINDOW).multiply(k)
}

/// Explicitly (re-)build and cache the table for `point` at window width
/// `window`, discarding any previously cached table for that (point,
/// window) pair. This is the opt-in `utils.precompute` entry point; the
/// replacement is built fully before the cache's write lock is taken, so
/// concurrent readers see either the old table or the new one, never a
/// torn one.
pub fn precompute(point: &ExtendedPoint, window: u32) {
    let key = (point_identity_bytes(point), window);
    let table = Arc::new(PrecomputeTable::build(point, window));
    CACHE.write().unwrap().insert(key, table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_point_multiply_matches_unsafe() {
        for n in [1u64, 2, 3, 17, 255, 1024] {
            let k = Scalar::from_u64(n);
            let fast = multiply_base(&k);
            let slow = BASE_POINT.multiply_unsafe(&k);
            assert!(fast.equals(&slow), "mismatch for k={n}");
        }
    }

    #[test]
    fn different_windows_agree() {
        let k = Scalar::from_u64(123456789);
        let w4 = table_for(&BASE_POINT, 4).multiply(&k);
        let w8 = table_for(&BASE_POINT, 8).multiply(&k);
        assert!(w4.equals(&w8));
    }

    #[test]
    fn explicit_precompute_replaces_cache_entry() {
        let k = Scalar::from_u64(999);
        let before = multiply_base(&k);
        precompute(&BASE_POINT, DEFAULT_WINDOW);
        let after = multiply_base(&k);
        assert!(before.equals(&after));
    }

    #[test]
    fn zero_scalar_multiplies_to_identity() {
        let k = Scalar::zero();
        let result = multiply_base(&k);
        assert!(result.equals(&ExtendedPoint::identity()));
    }
}
