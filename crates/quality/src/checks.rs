//! Batch-level conformance checks.
//!
//! Each check sees the accepted problems, their statistics and the caller's
//! targets, and reports zero or more errors. Checks never depend on each
//! other's outcome.

use cogspec_core::{
    AssessmentTargets, BatchError, BatchErrorKind, BatchStatistics, Distribution, IssueDetail,
    ValidatedProblem,
};

/// Slack for float comparisons against tolerance edges.
const EPSILON: f64 = 1e-9;

/// Everything a batch check may look at.
#[derive(Debug, Clone, Copy)]
pub struct BatchContext<'a> {
    /// Problems that passed field validation.
    pub problems: &'a [ValidatedProblem],
    /// Statistics over `problems`.
    pub statistics: &'a BatchStatistics,
    /// Caller's targets.
    pub targets: &'a AssessmentTargets,
}

/// A batch-level check.
pub trait BatchCheck {
    /// Check name, for logs.
    fn name(&self) -> &'static str;

    /// Run the check.
    fn run(&self, ctx: &BatchContext<'_>) -> Vec<BatchError>;
}

/// Sequence positions must be exactly `0..n`, in any input order.
///
/// Skipped when no item carries a position; fails when only some do.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceContiguity;

impl BatchCheck for SequenceContiguity {
    fn name(&self) -> &'static str {
        "sequence-contiguity"
    }

    fn run(&self, ctx: &BatchContext<'_>) -> Vec<BatchError> {
        let n = ctx.problems.len();
        let mut positions: Vec<u32> = ctx.problems.iter().filter_map(|p| p.sequence_position).collect();
        if positions.is_empty() {
            return Vec::new();
        }

        let unpositioned = n - positions.len();
        positions.sort_unstable();
        if unpositioned == 0 && positions.iter().enumerate().all(|(i, &p)| p as usize == i) {
            return Vec::new();
        }

        let missing: Vec<usize> = (0..n)
            .filter(|i| positions.binary_search(&(*i as u32)).is_err())
            .collect();
        let duplicated: Vec<u32> = positions
            .windows(2)
            .filter(|w| w[0] == w[1])
            .map(|w| w[0])
            .collect();
        let beyond: Vec<u32> = positions.iter().copied().filter(|&p| p as usize >= n).collect();

        let mut problems = Vec::new();
        if unpositioned > 0 {
            problems.push(format!("{} item(s) without a position", unpositioned));
        }
        if !missing.is_empty() {
            problems.push(format!("missing {:?}", missing));
        }
        if !duplicated.is_empty() {
            problems.push(format!("duplicated {:?}", duplicated));
        }
        if !beyond.is_empty() {
            problems.push(format!("beyond the end {:?}", beyond));
        }

        vec![BatchError {
            kind: BatchErrorKind::SequenceNotContiguous,
            message: format!(
                "sequence positions are not contiguous from 0 to {}: {}",
                n.saturating_sub(1),
                problems.join(", ")
            ),
            level: None,
            detail: IssueDetail::versus(positions.len() as f64, n as f64)
                .with_bounds(0.0, n.saturating_sub(1) as f64),
        }]
    }
}

/// Total time must lie within `target * (1 ± tolerance)`.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    /// Relative tolerance, e.g. 0.10 for ±10%.
    pub tolerance: f64,
}

impl BatchCheck for TimeBudget {
    fn name(&self) -> &'static str {
        "time-budget"
    }

    fn run(&self, ctx: &BatchContext<'_>) -> Vec<BatchError> {
        let target = ctx.targets.total_time;
        let actual = ctx.statistics.total_time as f64;
        let min = target * (1.0 - self.tolerance);
        let max = target * (1.0 + self.tolerance);

        if actual + EPSILON >= min && actual - EPSILON <= max {
            return Vec::new();
        }
        vec![BatchError {
            kind: BatchErrorKind::TimeOutOfRange,
            message: format!(
                "total time {} min is outside {:.1}-{:.1} min ({} min ± {:.0}%)",
                actual,
                min,
                max,
                target,
                self.tolerance * 100.0
            ),
            level: None,
            detail: IssueDetail::versus(actual, target).with_bounds(min, max),
        }]
    }
}

/// Each level's observed share must be within an absolute tolerance of its
/// target share. Levels are judged independently; the whole-distribution
/// sum is not checked here.
#[derive(Debug, Clone, Copy)]
pub struct DistributionConformance {
    /// Absolute tolerance per level, in share units.
    pub tolerance: f64,
}

impl DistributionConformance {
    /// Compare an observed distribution against a target.
    pub fn compare(&self, observed: &Distribution, target: &Distribution) -> Vec<BatchError> {
        observed
            .iter()
            .filter_map(|(level, actual)| {
                let expected = target[level];
                if (actual - expected).abs() <= self.tolerance + EPSILON {
                    return None;
                }
                Some(BatchError {
                    kind: BatchErrorKind::DistributionMismatch,
                    message: format!(
                        "{} share is {:.1}%, target {:.1}% ± {:.1} points",
                        level,
                        actual * 100.0,
                        expected * 100.0,
                        self.tolerance * 100.0
                    ),
                    level: Some(level),
                    detail: IssueDetail::versus(actual, expected)
                        .with_bounds((expected - self.tolerance).max(0.0), expected + self.tolerance),
                })
            })
            .collect()
    }
}

impl BatchCheck for DistributionConformance {
    fn name(&self) -> &'static str {
        "distribution-conformance"
    }

    fn run(&self, ctx: &BatchContext<'_>) -> Vec<BatchError> {
        self.compare(&ctx.statistics.level_fractions, &ctx.targets.distribution)
    }
}

/// Item count must equal the expected count, when one is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemCount;

impl BatchCheck for ItemCount {
    fn name(&self) -> &'static str {
        "item-count"
    }

    fn run(&self, ctx: &BatchContext<'_>) -> Vec<BatchError> {
        let actual = ctx.problems.len();
        match ctx.targets.expected_count {
            Some(expected) if expected != actual => vec![BatchError {
                kind: BatchErrorKind::CountMismatch,
                message: format!("batch has {} items, expected {}", actual, expected),
                level: None,
                detail: IssueDetail::versus(actual as f64, expected as f64),
            }],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_statistics;
    use cogspec_core::{CognitiveLevel, ResponseType};

    fn problem(position: Option<u32>, minutes: u32, level: CognitiveLevel) -> ValidatedProblem {
        ValidatedProblem {
            id: format!("q{:?}", position),
            cognitive_level: level,
            complexity: 0.5,
            time_estimate: minutes,
            difficulty: 2,
            response_type: ResponseType::ShortAnswer,
            content: "Define photosynthesis.".to_string(),
            sequence_position: position,
        }
    }

    fn run(check: &dyn BatchCheck, problems: &[ValidatedProblem], targets: &AssessmentTargets) -> Vec<BatchError> {
        let statistics = compute_statistics(problems);
        check.run(&BatchContext {
            problems,
            statistics: &statistics,
            targets,
        })
    }

    fn targets(total_time: f64) -> AssessmentTargets {
        AssessmentTargets::new(total_time, Distribution::new([0.0, 0.0, 1.0, 0.0, 0.0, 0.0]))
    }

    #[test]
    fn test_contiguous_in_any_order() {
        let batch: Vec<_> = [2, 0, 1].into_iter().map(|p| problem(Some(p), 1, CognitiveLevel::Apply)).collect();
        assert!(run(&SequenceContiguity, &batch, &targets(3.0)).is_empty());
    }

    #[test]
    fn test_gap_detected() {
        let batch: Vec<_> = [0, 1, 3].into_iter().map(|p| problem(Some(p), 1, CognitiveLevel::Apply)).collect();
        let errors = run(&SequenceContiguity, &batch, &targets(3.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BatchErrorKind::SequenceNotContiguous);
        assert!(errors[0].message.contains("missing [2]"));
        assert!(errors[0].message.contains("beyond the end [3]"));
    }

    #[test]
    fn test_duplicate_detected() {
        let batch: Vec<_> = [0, 1, 1].into_iter().map(|p| problem(Some(p), 1, CognitiveLevel::Apply)).collect();
        let errors = run(&SequenceContiguity, &batch, &targets(3.0));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("duplicated [1]"));
    }

    #[test]
    fn test_partial_positions_rejected_and_absent_positions_skipped() {
        let partial = vec![problem(Some(0), 1, CognitiveLevel::Apply), problem(None, 1, CognitiveLevel::Apply)];
        let errors = run(&SequenceContiguity, &partial, &targets(2.0));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("1 item(s) without a position"));

        let none = vec![problem(None, 1, CognitiveLevel::Apply), problem(None, 1, CognitiveLevel::Apply)];
        assert!(run(&SequenceContiguity, &none, &targets(2.0)).is_empty());
    }

    #[test]
    fn test_time_budget_edges_inclusive() {
        let check = TimeBudget { tolerance: 0.10 };
        // 33 is exactly +10% of 30
        let batch: Vec<_> = (0..3).map(|i| problem(Some(i), 11, CognitiveLevel::Apply)).collect();
        assert!(run(&check, &batch, &targets(30.0)).is_empty());
        // 27 is exactly -10%
        let batch: Vec<_> = (0..3).map(|i| problem(Some(i), 9, CognitiveLevel::Apply)).collect();
        assert!(run(&check, &batch, &targets(30.0)).is_empty());
    }

    #[test]
    fn test_time_budget_twenty_percent_over() {
        let check = TimeBudget { tolerance: 0.10 };
        let batch: Vec<_> = (0..3).map(|i| problem(Some(i), 12, CognitiveLevel::Apply)).collect();
        let errors = run(&check, &batch, &targets(30.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BatchErrorKind::TimeOutOfRange);
        assert_eq!(errors[0].detail.actual, Some(36.0));
        assert_eq!(errors[0].detail.expected, Some(30.0));
    }

    #[test]
    fn test_distribution_per_category() {
        let check = DistributionConformance { tolerance: 0.05 };
        let target = Distribution::new([0.10, 0.20, 0.35, 0.25, 0.05, 0.05]);

        let close = Distribution::new([0.15, 0.15, 0.35, 0.25, 0.05, 0.05]);
        assert!(check.compare(&close, &target).is_empty());

        let off = Distribution::new([0.20, 0.20, 0.25, 0.25, 0.05, 0.05]);
        let errors = check.compare(&off, &target);
        let levels: Vec<_> = errors.iter().filter_map(|e| e.level).collect();
        assert_eq!(levels, vec![CognitiveLevel::Remember, CognitiveLevel::Apply]);
        assert!(errors.iter().all(|e| e.kind == BatchErrorKind::DistributionMismatch));
    }

    #[test]
    fn test_distribution_tolerance_is_additive_not_relative() {
        // 10 points over a 50% target fails even though it is only 20% relative
        let check = DistributionConformance { tolerance: 0.05 };
        let target = Distribution::new([0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);
        let observed = Distribution::new([0.6, 0.4, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(check.compare(&observed, &target).len(), 2);
    }

    #[test]
    fn test_item_count() {
        let batch: Vec<_> = (0..4).map(|i| problem(Some(i), 1, CognitiveLevel::Apply)).collect();
        assert!(run(&ItemCount, &batch, &targets(4.0)).is_empty());
        assert!(run(&ItemCount, &batch, &targets(4.0).with_expected_count(4)).is_empty());

        let errors = run(&ItemCount, &batch, &targets(4.0).with_expected_count(5));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, BatchErrorKind::CountMismatch);
    }
}
