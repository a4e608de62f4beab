//! Batch statistics over accepted problems.

use cogspec_core::{BatchStatistics, Distribution, QuestionAllocation, ValidatedProblem};
use std::collections::BTreeMap;

/// Aggregate counts, sums and histograms for a batch.
///
/// An empty batch yields all-zero statistics.
pub fn compute_statistics(problems: &[ValidatedProblem]) -> BatchStatistics {
    let item_count = problems.len();
    if item_count == 0 {
        return BatchStatistics::default();
    }

    let mut level_counts = QuestionAllocation::default();
    let mut difficulty_histogram = BTreeMap::new();
    let mut response_type_histogram = BTreeMap::new();
    let mut total_time: u64 = 0;
    let mut complexity_sum = 0.0;

    for problem in problems {
        level_counts[problem.cognitive_level] += 1;
        *difficulty_histogram.entry(problem.difficulty).or_insert(0) += 1;
        *response_type_histogram.entry(problem.response_type).or_insert(0) += 1;
        total_time += u64::from(problem.time_estimate);
        complexity_sum += problem.complexity;
    }

    let n = item_count as f64;
    let level_fractions: Distribution = level_counts.map(|_, count| f64::from(count) / n);

    BatchStatistics {
        item_count,
        total_time,
        mean_time: total_time as f64 / n,
        mean_complexity: complexity_sum / n,
        level_counts,
        level_fractions,
        difficulty_histogram,
        response_type_histogram,
    }
}
