//! Overload term split.
//!
//! Splits a faculty member's overload units across two terms so that the
//! first-term share is a whole multiple of the unit block (3 by default).
//!
//! # Selection
//! Over every candidate `a ∈ {0, m, 2m, ...} ∩ [0, total]` with
//! `b = total - a`, prefer in order:
//! 1. `b` also a multiple of `m`
//! 2. smallest gap `|a - b|`
//! 3. largest `a` (front-load the first term)
//!
//! Whether `b` is a multiple of `m` depends only on `total`, so the winner
//! is always one of the multiples adjacent to `total / 2`. Only those few
//! candidates are scored, which keeps the split O(1) for any total.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default unit block for term loads.
pub const DEFAULT_UNIT_MULTIPLE: u32 = 3;

/// Overload units assigned to each term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverloadSplit {
    /// First-term units.
    pub first: f64,
    /// Second-term units.
    pub second: f64,
}

impl OverloadSplit {
    /// Creates a new split.
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    /// Sum of both terms.
    #[inline]
    pub fn total(&self) -> f64 {
        self.first + self.second
    }

    /// Absolute difference between terms.
    #[inline]
    pub fn gap(&self) -> f64 {
        (self.first - self.second).abs()
    }
}

/// Splits `total` overload units with the default block of 3.
///
/// # Examples
///
/// ```
/// use u_timetable::load::{split_overload, OverloadSplit};
///
/// assert_eq!(split_overload(9.0), OverloadSplit::new(6.0, 3.0));
/// assert_eq!(split_overload(0.0), OverloadSplit::new(0.0, 0.0));
/// ```
pub fn split_overload(total: f64) -> OverloadSplit {
    split_overload_with(total, DEFAULT_UNIT_MULTIPLE)
}

/// Splits `total` overload units with first-term share a multiple of
/// `multiple`.
///
/// Non-positive or non-finite totals give `{0, 0}`. A `multiple` of 0
/// places everything in the first term.
pub fn split_overload_with(total: f64, multiple: u32) -> OverloadSplit {
    if !total.is_finite() || total <= 0.0 {
        return OverloadSplit::default();
    }
    if multiple == 0 {
        return OverloadSplit::new(total, 0.0);
    }

    let step = f64::from(multiple);
    let max_k = (total / step).floor();
    let half_k = (total / (2.0 * step)).floor();

    [half_k - 1.0, half_k, half_k + 1.0, half_k + 2.0]
        .into_iter()
        .filter(|&k| (0.0..=max_k).contains(&k))
        .map(|k| {
            let first = k * step;
            OverloadSplit::new(first, total - first)
        })
        .max_by(|a, b| compare_candidates(a, b, step))
        .unwrap_or(OverloadSplit::new(total, 0.0))
}

/// Orders candidates so that the preferred split compares greatest.
fn compare_candidates(a: &OverloadSplit, b: &OverloadSplit, step: f64) -> Ordering {
    let a_div = is_multiple(a.second, step);
    let b_div = is_multiple(b.second, step);

    a_div
        .cmp(&b_div)
        .then_with(|| b.gap().total_cmp(&a.gap()))
        .then_with(|| a.first.total_cmp(&b.first))
}

fn is_multiple(value: f64, step: f64) -> bool {
    value % step == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_split_nine_prefers_front_loaded_even_split() {
        assert_eq!(split_overload(9.0), OverloadSplit::new(6.0, 3.0));
    }

    #[test]
    fn test_split_small_totals() {
        assert_eq!(split_overload(3.0), OverloadSplit::new(3.0, 0.0));
        assert_eq!(split_overload(6.0), OverloadSplit::new(3.0, 3.0));
        assert_eq!(split_overload(2.0), OverloadSplit::new(0.0, 2.0));
    }

    #[test]
    fn test_split_no_double_multiple() {
        // 10: b never divisible → smallest gap (6/4)
        assert_eq!(split_overload(10.0), OverloadSplit::new(6.0, 4.0));
        // 4.5: candidates 0/4.5, 3/1.5
        assert_eq!(split_overload(4.5), OverloadSplit::new(3.0, 1.5));
    }

    #[test]
    fn test_split_twelve_equal() {
        assert_eq!(split_overload(12.0), OverloadSplit::new(6.0, 6.0));
        assert_eq!(split_overload(15.0), OverloadSplit::new(9.0, 6.0));
    }

    #[test]
    fn test_split_degenerate_totals() {
        assert_eq!(split_overload(0.0), OverloadSplit::default());
        assert_eq!(split_overload(-3.0), OverloadSplit::default());
        assert_eq!(split_overload(f64::NAN), OverloadSplit::default());
        assert_eq!(split_overload(f64::INFINITY), OverloadSplit::default());
    }

    #[test]
    fn test_split_custom_multiple() {
        assert_eq!(split_overload_with(8.0, 2), OverloadSplit::new(4.0, 4.0));
        assert_eq!(split_overload_with(7.0, 0), OverloadSplit::new(7.0, 0.0));
    }

    #[test]
    fn test_split_matches_exhaustive_search() {
        fn exhaustive(total: f64, multiple: u32) -> OverloadSplit {
            let step = f64::from(multiple);
            (0..=(total / step).floor() as u64)
                .map(|k| OverloadSplit::new(k as f64 * step, total - k as f64 * step))
                .max_by(|a, b| compare_candidates(a, b, step))
                .unwrap()
        }

        for multiple in 1..=5 {
            for halves in 1..=240 {
                let total = f64::from(halves) * 0.5;
                assert_eq!(
                    split_overload_with(total, multiple),
                    exhaustive(total, multiple),
                    "total {total} multiple {multiple}"
                );
            }
        }
    }

    #[test]
    fn test_split_huge_totals() {
        assert_eq!(
            split_overload(1e12),
            OverloadSplit::new(500_000_000_001.0, 499_999_999_999.0)
        );

        let split = split_overload(f64::MAX);
        assert!(split.first.is_finite() && split.second.is_finite());
        assert!(split.first > 0.0 && split.second >= 0.0);
    }

    #[test]
    fn test_split_exactness_integer_totals() {
        for total in 0..=60 {
            let total = f64::from(total);
            let split = split_overload(total);
            assert_eq!(split.total(), total);
            assert_eq!(split.first % 3.0, 0.0, "total {total}");
            assert!(split.first >= 0.0 && split.second >= 0.0);
        }
    }

    #[test]
    fn test_split_exactness_fractional_totals() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let total = (rng.random_range(1..=120) as f64) * 0.5;
            let split = split_overload(total);
            assert!((split.total() - total).abs() < 1e-9);
            assert_eq!(split.first % 3.0, 0.0);
            assert!(split.second >= 0.0);
        }
    }
}
