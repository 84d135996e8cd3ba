//! Reproducible sampling of rows for previews.

use log::debug;

/// The seed used when none is provided.
pub const DEFAULT_SEED: u32 = 42;

/// Draws `size` distinct positions out of `0..population`, without replacement.
///
/// Every position gets a key derived from a cryptographic hash of the seed and
/// the position, and the positions with the smallest keys are picked. The
/// sample is reproducible for a fixed seed.
///
/// The positions are returned in the order in which they were drawn. If `size`
/// is larger than the population, the whole population is returned.
pub fn sample_indices(population: usize, size: usize, seed: u32) -> Vec<usize> {
    let mut keyed: Vec<(String, usize)> = (0..population)
        .map(|idx| {
            let key = format!("{:08}{:016}", seed, idx);
            (sha256::digest(key.as_str()), idx)
        })
        .collect();
    keyed.sort();
    let res: Vec<usize> = keyed.into_iter().take(size).map(|(_, idx)| idx).collect();
    debug!(
        "sample_indices: population: {} size: {} seed: {} -> {:?}",
        population, size, seed, res
    );
    res
}

/// Picks a sample of the given values, in draw order.
pub fn sample<T: Clone>(values: &[T], size: usize, seed: u32) -> Vec<T> {
    sample_indices(values.len(), size, seed)
        .into_iter()
        .map(|idx| values[idx].clone())
        .collect()
}

/// Clamps a requested preview size to what the data can provide.
///
/// At least one element is shown when there is any data.
pub fn clamp_sample_size(requested: usize, available: usize) -> usize {
    if available == 0 {
        0
    } else {
        requested.clamp(1, available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_sample() {
        let a = sample_indices(50, 10, DEFAULT_SEED);
        let b = sample_indices(50, 10, DEFAULT_SEED);
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn no_duplicates_and_in_range() {
        let s = sample_indices(20, 20, 7);
        let uniq: HashSet<usize> = s.iter().cloned().collect();
        assert_eq!(uniq.len(), 20);
        assert!(s.iter().all(|idx| *idx < 20));
    }

    #[test]
    fn different_seeds_differ() {
        let a = sample_indices(100, 10, 1);
        let b = sample_indices(100, 10, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn oversized_request() {
        assert_eq!(sample_indices(3, 10, 0).len(), 3);
        assert!(sample_indices(0, 10, 0).is_empty());
    }

    #[test]
    fn sample_values() {
        let values = vec!["a", "b", "c", "d"];
        let s = sample(&values, 2, DEFAULT_SEED);
        assert_eq!(s.len(), 2);
        assert!(s.iter().all(|v| values.contains(v)));
    }

    #[test]
    fn clamp() {
        assert_eq!(clamp_sample_size(10, 0), 0);
        assert_eq!(clamp_sample_size(0, 5), 1);
        assert_eq!(clamp_sample_size(10, 5), 5);
        assert_eq!(clamp_sample_size(3, 5), 3);
    }
}
