//! Randomness used to jitter click distances.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed floats.
pub trait RandomSource {
    /// A value in `[low, high]`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Thread-local generator seeded from the OS once per thread.
#[derive(Debug, Clone)]
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        sample(&mut self.0, low, high)
    }
}

/// Reproducible generator for replays.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        sample(&mut self.0, low, high)
    }
}

fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high <= low || high.is_nan() || low.is_nan() {
        return low;
    }
    rng.random_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let mut rng = ThreadRandom::new();
        for _ in 0..1000 {
            let v = rng.uniform(100.0, 120.0);
            assert!((100.0..=120.0).contains(&v));
        }
    }

    #[test]
    fn test_empty_range() {
        let mut rng = SeededRandom::new(7);
        assert_eq!(rng.uniform(5.0, 5.0), 5.0);
        assert_eq!(rng.uniform(5.0, 1.0), 5.0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }
}
