//! Continuous box-shaped spaces.

use rand::Rng;

use crate::seeding::standard_normal;

/// A one-dimensional box `[low, high]` per component. Bounds may be
/// infinite.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpace {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl BoxSpace {
    /// # Panics
    ///
    /// Panics if the bounds differ in length or any `low > high`.
    #[must_use]
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Self {
        assert_eq!(low.len(), high.len());
        assert!(low.iter().zip(&high).all(|(l, h)| l <= h), "low must not exceed high");
        Self { low, high }
    }

    /// `n` components, each spanning the whole real line.
    #[must_use]
    pub fn unbounded(n: usize) -> Self {
        Self::new(vec![f64::NEG_INFINITY; n], vec![f64::INFINITY; n])
    }

    #[must_use]
    pub fn shape(&self) -> [usize; 1] {
        [self.low.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.low.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    #[must_use]
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    #[must_use]
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Every component has finite bounds on both sides.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(&self.high).all(|b| b.is_finite())
    }

    /// `x` has the right length and lies inside the box.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.len()
            && x
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (l, h))| (*l..=*h).contains(v))
    }

    /// Draw a random element.
    ///
    /// Bounded components are uniform, unbounded ones standard normal and
    /// half-bounded ones exponential away from the finite bound.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&l, &h)| match (l.is_finite(), h.is_finite()) {
                (true, true) if l == h => l,
                (true, true) => rng.gen_range(l..h),
                (false, false) => standard_normal(rng),
                (true, false) => l + exponential(rng),
                (false, true) => h - exponential(rng),
            })
            .collect()
    }
}

fn exponential<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    -(1.0 - rng.gen::<f64>()).ln()
}
