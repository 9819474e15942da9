//! Empirical categorical distribution for weighted sampling.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distributions::{Distribution as _, WeightedIndex};

/// A categorical distribution estimated from observed values: each distinct
/// value is drawn with probability proportional to its frequency in the
/// observations.
#[derive(Debug, Clone)]
pub struct EmpiricalDist<T> {
    values: Vec<T>,
    weights: WeightedIndex<usize>,
}

impl<T: Ord + Clone> EmpiricalDist<T> {
    /// Estimates the distribution from observations. Returns `None` when
    /// the iterator is empty.
    pub fn from_observations<I: IntoIterator<Item = T>>(observations: I) -> Option<Self> {
        let mut counts: BTreeMap<T, usize> = BTreeMap::new();
        for value in observations {
            *counts.entry(value).or_default() += 1;
        }
        if counts.is_empty() {
            return None;
        }
        let (values, counts): (Vec<T>, Vec<usize>) = counts.into_iter().unzip();
        // counts are all positive, so WeightedIndex construction cannot fail
        let weights = WeightedIndex::new(&counts).ok()?;
        Some(Self { values, weights })
    }
}

impl<T> EmpiricalDist<T> {
    /// Draws one value, weighted by empirical frequency.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.values[self.weights.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    #[test]
    fn empty_observations_yield_none() {
        assert!(EmpiricalDist::<String>::from_observations(Vec::new()).is_none());
    }

    #[test]
    fn sampling_tracks_observed_frequencies() {
        // 80/20 split should be reproduced within sampling tolerance.
        let mut observations = vec!["Centro"; 80];
        observations.extend(vec!["Retiro"; 20]);
        let dist = EmpiricalDist::from_observations(observations).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let draws = 10_000;
        let centro = (0..draws)
            .filter(|_| *dist.sample(&mut rng) == "Centro")
            .count();
        let frequency = centro as f64 / f64::from(draws);
        assert!(
            (frequency - 0.8).abs() < 0.02,
            "expected ~0.8, got {frequency}"
        );
    }

    #[test]
    fn single_value_always_sampled() {
        let dist = EmpiricalDist::from_observations(vec![1u32, 1, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(*dist.sample(&mut rng), 1);
        }
    }
}
