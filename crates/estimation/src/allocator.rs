//! Integer question allocation by the largest remainder method.
//!
//! Each category gets `floor(share * total)` questions; the units left over
//! go one each to the categories with the largest fractional remainders.
//! Equal remainders are broken by cognitive level declaration order
//! (Remember first), so identical inputs always allocate identically.

use cogspec_core::{CognitiveLevel, Distribution, QuestionAllocation};
use std::cmp::Ordering;
use tracing::debug;

/// Split `total` questions across levels in proportion to `distribution`.
///
/// The result always sums to exactly `total`. Raw counts are `share * total`
/// taken literally. When that cannot reach `total` (floors already exceed it,
/// or more than one unit per level is left over) the shares are first
/// rescaled by their own sum. Negative shares count as zero; a distribution
/// with no positive share is treated as uniform.
pub fn allocate(distribution: &Distribution, total: u32) -> QuestionAllocation {
    let shares = distribution.map(|_, v| if v.is_finite() { v.max(0.0) } else { 0.0 });
    let n = f64::from(total);

    let literal = shares.map(|_, share| share * n);
    let raw = if shares.sum() > 0.0 && reaches_total(&literal, total) {
        literal
    } else {
        debug!("Rescaling shares summing to {} before allocating {}", shares.sum(), total);
        normalized(&shares).map(|_, share| share * n)
    };

    let mut allocation = raw.map(|_, r| r.floor() as u32);
    let remainder = total.saturating_sub(allocation.total()) as usize;

    let mut order = CognitiveLevel::ALL;
    order.sort_by(|a, b| {
        let fa = raw[*a] - raw[*a].floor();
        let fb = raw[*b] - raw[*b].floor();
        fb.partial_cmp(&fa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(b))
    });

    for level in order.iter().cycle().take(remainder) {
        allocation[*level] += 1;
    }

    debug!(
        "Allocated {} questions as {:?} (remainder {})",
        total,
        allocation.to_array(),
        remainder
    );
    allocation
}

/// Whether flooring `raw` leaves between 0 and 6 units to hand out.
fn reaches_total(raw: &Distribution, total: u32) -> bool {
    let floors: f64 = raw.to_array().iter().map(|r| r.floor()).sum();
    let n = f64::from(total);
    floors <= n && n - floors <= CognitiveLevel::ALL.len() as f64
}

fn normalized(shares: &Distribution) -> Distribution {
    let sum = shares.sum();
    if sum > 0.0 {
        shares.map(|_, v| v / sum)
    } else {
        Distribution::new([1.0 / 6.0; 6])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::RuleTables;
    use cogspec_core::AbilityLevel;
    use proptest::prelude::*;

    fn standard() -> Distribution {
        RuleTables::standard().baseline(AbilityLevel::Standard)
    }

    #[test]
    fn test_standard_twenty() {
        let a = allocate(&standard(), 20);
        assert_eq!(a.to_array(), [2, 4, 7, 5, 1, 1]);
        assert_eq!(a.total(), 20);
    }

    #[test]
    fn test_single_question_goes_to_largest_share() {
        let a = allocate(&standard(), 1);
        assert_eq!(a.to_array(), [0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_tied_remainders() {
        let d = Distribution::new([0.3333, 0.3333, 0.1667, 0.1667, 0.0, 0.0]);
        let a = allocate(&d, 10);
        assert_eq!(a.to_array(), [3, 3, 2, 2, 0, 0]);
    }

    #[test]
    fn test_exact_ties_break_by_declaration_order() {
        let d = Distribution::new([0.25, 0.25, 0.25, 0.25, 0.0, 0.0]);
        // four equal remainders of 0.5, two units to hand out
        assert_eq!(allocate(&d, 6).to_array(), [2, 2, 1, 1, 0, 0]);
        // uniform: one unit, Remember wins
        assert_eq!(allocate(&Distribution::new([1.0; 6]), 1).to_array(), [1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_ties_use_literal_shares_when_sum_is_below_one() {
        // sums to 0.99: raw 1.5, 2.5, 2.5, 1.5, 1.0, 0.9 leaves three units
        let d = Distribution::new([0.15, 0.25, 0.25, 0.15, 0.10, 0.09]);
        assert_eq!(allocate(&d, 10).to_array(), [2, 3, 2, 1, 1, 1]);
    }

    #[test]
    fn test_floors_above_total_fall_back_to_rescaling() {
        // raw 26, 26, 19, 10, 10, 10 floors to 101
        let d = Distribution::new([0.26, 0.26, 0.19, 0.10, 0.10, 0.10]);
        let a = allocate(&d, 100);
        assert_eq!(a.total(), 100);
        assert_eq!(a.to_array(), [26, 25, 19, 10, 10, 10]);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(allocate(&standard(), 0), QuestionAllocation::default());
    }

    #[test]
    fn test_degenerate_distribution_is_uniform() {
        let a = allocate(&Distribution::default(), 8);
        assert_eq!(a.to_array(), [2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_sum_above_one_still_exact() {
        // a rigor-floor style distribution that drifts above 1.0
        let d = Distribution::new([0.26, 0.26, 0.19, 0.10, 0.10, 0.10]);
        for total in [1, 7, 10, 99, 100] {
            assert_eq!(allocate(&d, total).total(), total);
        }
    }

    #[test]
    fn test_deterministic() {
        let d = Distribution::new([0.17, 0.17, 0.17, 0.17, 0.16, 0.16]);
        let first = allocate(&d, 13);
        for _ in 0..10 {
            assert_eq!(allocate(&d, 13), first);
        }
    }

    fn arb_distribution() -> impl Strategy<Value = Distribution> {
        prop::array::uniform6(0.01f64..1.0).prop_map(|values| {
            let sum: f64 = values.iter().sum();
            Distribution::new(values.map(|v| v / sum))
        })
    }

    proptest! {
        #[test]
        fn prop_allocation_sums_exactly(d in arb_distribution(), total in 1u32..=1000) {
            let a = allocate(&d, total);
            prop_assert_eq!(a.total(), total);
        }

        #[test]
        fn prop_allocation_within_one_of_raw_share(d in arb_distribution(), total in 1u32..=1000) {
            let a = allocate(&d, total);
            for (level, count) in a.iter() {
                let raw = d[level] * f64::from(total);
                prop_assert!((f64::from(count) - raw).abs() <= 1.0 + 1e-6);
            }
        }

        #[test]
        fn prop_allocation_is_deterministic(d in arb_distribution(), total in 1u32..=1000) {
            prop_assert_eq!(allocate(&d, total), allocate(&d, total));
        }
    }
}
