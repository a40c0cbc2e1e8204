// Seeded sampling of case subsets and case pairs
//
// Every random draw of a learning run comes from the one generator owned by a
// `Sampler`, so the draw order (and therefore the learned rule set) is fully
// determined by the seed.

use crate::error::{LeradError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Default seed for reproducible runs
pub const DEFAULT_SEED: u64 = 23;

/// Deterministic pseudo-random sampler
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `size` distinct indices from `0..population`, in draw order
    ///
    /// Indices are drawn uniformly and repeats are rejected.
    pub fn sample_indices(&mut self, population: usize, size: usize) -> Result<Vec<usize>> {
        if size > population {
            return Err(LeradError::InvalidSampleSize {
                requested: size,
                available: population,
            });
        }

        let mut seen = HashSet::with_capacity(size);
        let mut indices = Vec::with_capacity(size);
        while indices.len() < size {
            let index = self.rng.gen_range(0..population);
            if seen.insert(index) {
                indices.push(index);
            }
        }
        Ok(indices)
    }

    /// Draw `size` distinct items, in draw order
    pub fn sample_subset<'a, T>(&mut self, items: &'a [T], size: usize) -> Result<Vec<&'a T>> {
        Ok(self
            .sample_indices(items.len(), size)?
            .into_iter()
            .map(|i| &items[i])
            .collect())
    }

    /// Draw `count` ordered pairs of distinct positions
    ///
    /// Pairs are drawn with replacement; a draw whose two indices coincide is
    /// rejected and redrawn. Needs at least two items whenever `count > 0`.
    pub fn sample_pairs<'a, T>(
        &mut self,
        items: &'a [T],
        count: usize,
    ) -> Result<Vec<(&'a T, &'a T)>> {
        if count > 0 && items.len() < 2 {
            return Err(LeradError::InvalidSampleSize {
                requested: 2,
                available: items.len(),
            });
        }

        let mut pairs = Vec::with_capacity(count);
        while pairs.len() < count {
            let first = self.rng.gen_range(0..items.len());
            let second = self.rng.gen_range(0..items.len());
            if first == second {
                continue;
            }
            pairs.push((&items[first], &items[second]));
        }
        Ok(pairs)
    }

    /// Random permutation of `items`
    pub fn permute<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        // Drawing the full population can never exceed it.
        self.sample_indices(items.len(), items.len())
            .unwrap_or_default()
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_indices_are_distinct_and_in_range() {
        let mut sampler = Sampler::new(7);
        let indices = sampler.sample_indices(20, 12).unwrap();
        assert_eq!(indices.len(), 12);
        let unique: HashSet<_> = indices.iter().collect();
        assert_eq!(unique.len(), 12);
        assert!(indices.iter().all(|&i| i < 20));
    }

    #[test]
    fn test_sample_indices_rejects_oversized_request() {
        let mut sampler = Sampler::new(7);
        match sampler.sample_indices(3, 4) {
            Err(LeradError::InvalidSampleSize {
                requested,
                available,
            }) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("Expected InvalidSampleSize, got {other:?}"),
        }
    }

    #[test]
    fn test_full_sample_is_permutation() {
        let mut sampler = Sampler::new(1);
        let mut indices = sampler.sample_indices(10, 10).unwrap();
        indices.sort_unstable();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let items: Vec<u32> = (0..50).collect();
        let mut a = Sampler::new(42);
        let mut b = Sampler::new(42);
        assert_eq!(
            a.sample_subset(&items, 10).unwrap(),
            b.sample_subset(&items, 10).unwrap()
        );
        assert_eq!(
            a.sample_pairs(&items, 10).unwrap(),
            b.sample_pairs(&items, 10).unwrap()
        );
    }

    #[test]
    fn test_pairs_never_repeat_a_position() {
        // Equal values at different positions are allowed, same position is not
        let items = vec!["a", "b"];
        let mut sampler = Sampler::new(3);
        let pairs = sampler.sample_pairs(&items, 25).unwrap();
        assert_eq!(pairs.len(), 25);
        assert!(pairs.iter().all(|(x, y)| x != y));
    }

    #[test]
    fn test_pairs_need_two_items() {
        let mut sampler = Sampler::new(3);
        assert!(sampler.sample_pairs(&["only"], 1).is_err());
        assert!(sampler.sample_pairs(&["only"], 0).unwrap().is_empty());
    }

    #[test]
    fn test_permute_keeps_all_items() {
        let mut sampler = Sampler::new(5);
        let mut permuted = sampler.permute(&[3usize, 1, 4, 1, 5]);
        permuted.sort_unstable();
        assert_eq!(permuted, vec![1, 1, 3, 4, 5]);
        assert!(sampler.permute::<usize>(&[]).is_empty());
    }
}
