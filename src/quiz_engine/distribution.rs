//! How a quiz is split between the target rank and the ranks below it.
//!
//! Each tier maps a range of "previous levels" (eligible ranks below the
//! target) to the share of questions drawn from each rank, nearest first.
//! Index 0 is always the target rank itself.

/// One row of [`DISTRIBUTION_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionTier {
    pub min_previous: usize,
    /// `None` = open-ended.
    pub max_previous: Option<usize>,
    pub weights: &'static [f64],
}

impl DistributionTier {
    fn covers(&self, previous_levels: usize) -> bool {
        previous_levels >= self.min_previous
            && self.max_previous.map_or(true, |max| previous_levels <= max)
    }
}

/// Ranks more than four below the target get no share, however many exist.
pub const DISTRIBUTION_TABLE: &[DistributionTier] = &[
    DistributionTier { min_previous: 0, max_previous: Some(0), weights: &[1.0] },
    DistributionTier { min_previous: 1, max_previous: Some(1), weights: &[0.70, 0.30] },
    DistributionTier { min_previous: 2, max_previous: Some(2), weights: &[0.60, 0.25, 0.15] },
    DistributionTier { min_previous: 3, max_previous: Some(3), weights: &[0.60, 0.25, 0.10, 0.05] },
    DistributionTier { min_previous: 4, max_previous: None,    weights: &[0.50, 0.30, 0.10, 0.05, 0.05] },
];

/// Shares for a target with `previous_levels` lower ranks.
pub fn distribution(previous_levels: usize) -> &'static [f64] {
    DISTRIBUTION_TABLE
        .iter()
        .find(|tier| tier.covers(previous_levels))
        .map(|tier| tier.weights)
        .unwrap_or(&[1.0])
}

/// Planned draw per rank: `floor(share × requested)`, nearest rank first.
pub fn target_counts(previous_levels: usize, requested: usize) -> Vec<usize> {
    distribution(previous_levels)
        .iter()
        .map(|share| (share * requested as f64).floor() as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_previous_level_once() {
        for previous in 0..=12 {
            let hits = DISTRIBUTION_TABLE.iter().filter(|t| t.covers(previous)).count();
            assert_eq!(hits, 1, "previous_levels={previous} matched {hits} tiers");
        }
    }

    #[test]
    fn shares_never_exceed_one() {
        for previous in 0..=12 {
            let total: f64 = distribution(previous).iter().sum();
            assert!(total <= 1.0 + 1e-9, "previous_levels={previous} sums to {total}");
        }
    }

    #[test]
    fn known_rows() {
        assert_eq!(distribution(0), &[1.0]);
        assert_eq!(distribution(1), &[0.70, 0.30]);
        assert_eq!(distribution(2), &[0.60, 0.25, 0.15]);
        assert_eq!(distribution(3), &[0.60, 0.25, 0.10, 0.05]);
        assert_eq!(distribution(4), &[0.50, 0.30, 0.10, 0.05, 0.05]);
        assert_eq!(distribution(12), distribution(4));
    }

    #[test]
    fn target_counts_floor_each_share() {
        assert_eq!(target_counts(0, 10), vec![10]);
        assert_eq!(target_counts(1, 10), vec![7, 3]);
        assert_eq!(target_counts(2, 10), vec![6, 2, 1]);
        assert_eq!(target_counts(3, 10), vec![6, 2, 1, 0]);
        assert_eq!(target_counts(4, 10), vec![5, 3, 1, 0, 0]);
        assert_eq!(target_counts(2, 100), vec![60, 25, 15]);
        assert_eq!(target_counts(5, 0), vec![0, 0, 0, 0, 0]);
    }
}
