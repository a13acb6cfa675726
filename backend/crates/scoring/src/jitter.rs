use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the multiplicative noise applied to pillar scores.
pub trait Jitter {
    /// Draw a factor in `[min, max]`.
    fn sample(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform jitter backed by any `rand` generator.
pub struct RandomJitter<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Always returns the same factor, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.0.clamp(min, max)
    }
}
