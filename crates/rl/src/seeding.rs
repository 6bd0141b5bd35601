//! Seeded random sources owned by environments.
//!
//! Every environment draws from its own [`StdRng`] so that episodes are
//! reproducible from a seed and independent of any global generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a generator from `seed`, or from a fresh random seed.
///
/// Returns the generator together with the seed actually used.
#[must_use]
pub fn np_random(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}

/// One draw from `N(0, 1)` by the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the radius argument in (0, 1]
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// `n` independent draws from `U[low, high)`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

/// `n` independent draws from `N(0, 1)`.
pub fn standard_normal_vec<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| standard_normal(rng)).collect()
}
