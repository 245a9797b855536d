use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Source of uniform randomness for shuffles and coin flips.
///
/// Every `rand` generator is a `RandomSource`; tests can plug in
/// [`SequenceRandom`] to script the exact draws.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn index_below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "index_below(0)");
        let idx = (self.next_uniform() * n as f64) as usize;
        idx.min(n - 1)
    }

    /// Fair coin.
    fn coin_flip(&mut self) -> bool {
        self.next_uniform() < 0.5
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Seeded when `seed` is given, otherwise from OS entropy.
pub fn quiz_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Replays a fixed list of uniform values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        SequenceRandom { values: values.into(), cursor: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Fisher-Yates shuffle of a copy; `items` is left untouched.
pub fn shuffled<T: Clone, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.index_below(i + 1);
        out.swap(i, j);
    }
    out
}

/// Up to `n` elements drawn uniformly without replacement.
pub fn choose_distinct<T: Clone, R: RandomSource + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut picked = shuffled(items, rng);
    picked.truncate(n);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn shuffle_leaves_input_untouched_and_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let input: Vec<u32> = (0..20).collect();
        let out = shuffled(&input, &mut rng);

        assert_eq!(input, (0..20).collect::<Vec<_>>());
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn shuffle_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<u32> {
            let mut rng = StdRng::seed_from_u64(seed);
            shuffled(&(0..10).collect::<Vec<u32>>(), &mut rng)
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        // All 6 permutations of 3 elements should show up near 1/6 of the time.
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let trials = 60_000;
        for _ in 0..trials {
            *counts.entry(shuffled(&[1u8, 2, 3], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 1.0 / 6.0).abs() < 0.01, "{perm:?} drawn {share:.3} of the time");
        }
    }

    #[test]
    fn sequence_random_replays_and_wraps() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_uniform(), 0.1);
        assert_eq!(rng.next_uniform(), 0.9);
        assert_eq!(rng.next_uniform(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn index_below_stays_in_range_at_the_top_edge() {
        let mut rng = SequenceRandom::new(vec![1.0]);
        assert_eq!(rng.index_below(4), 3);
    }

    #[test]
    fn scripted_zero_draws_rotate_left() {
        // With every draw at 0.0, each step swaps position i with 0.
        let mut rng = SequenceRandom::new(vec![0.0]);
        assert_eq!(shuffled(&[1, 2, 3], &mut rng), vec![2, 3, 1]);
    }

    #[test]
    fn choose_distinct_caps_at_input_len() {
        let mut rng = StdRng::seed_from_u64(3);
        let picked = choose_distinct(&["a", "b"], 3, &mut rng);
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
    }
}
