//! RNG module - random sources and the piece spawner
//!
//! The engine only needs "a uniform integer in an inclusive range". That seam is
//! the [`RandomSource`] trait, implemented by:
//!
//! - [`SimpleRng`]: a deterministic LCG for tests and replays
//! - `fastrand::Rng`: the entropy-seeded generator used by the terminal binary
//!
//! [`spawn_piece`] draws a uniform shape from the catalog and a uniform palette color.

use crate::pieces::Tetromino;
use crate::types::{PieceKind, PALETTE};

/// Uniform integer source consumed by the engine.
pub trait RandomSource {
    /// Uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn range(&mut self, min: u32, max: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // LCG low bits cycle quickly; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_range(max - min + 1)
    }
}

impl RandomSource for fastrand::Rng {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.u32(min..=max)
    }
}

/// Draw a fresh piece: uniform shape among the 7 kinds, then a uniform color.
pub fn spawn_piece<R: RandomSource + ?Sized>(rng: &mut R) -> Tetromino {
    let index = rng.range(1, PieceKind::ALL.len() as u32);
    // Out-of-range sources fall back to the last catalog entry.
    let kind = PieceKind::from_index(index).unwrap_or(PieceKind::T);
    let color = PALETTE[rng.range(0, PALETTE.len() as u32 - 1) as usize % PALETTE.len()];
    Tetromino::new(kind, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..2_000 {
            let v = rng.range(1, 7);
            assert!((1..=7).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every kind should show up: {:?}", seen);
    }

    #[test]
    fn fastrand_implements_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            let v = RandomSource::range(&mut rng, 0, 16);
            assert!(v <= 16);
        }
    }

    #[test]
    fn spawned_piece_starts_unrotated_with_palette_color() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..50 {
            let piece = spawn_piece(&mut rng);
            assert_eq!(piece.rotation(), 0);
            assert!(PALETTE.contains(&piece.color));
        }
    }
}
