//! Batch conformance validation.

use cogspec_core::{
    AssessmentTargets, BatchValidationResult, GeneratedProblem, ValidatedProblem,
};
use tracing::{debug, info, warn};

use crate::checks::{
    BatchCheck, BatchContext, DistributionConformance, ItemCount, SequenceContiguity, TimeBudget,
};
use crate::config::BatchConfig;
use crate::field::ProblemValidator;
use crate::stats::compute_statistics;

/// Validates a generated batch against assessment targets.
///
/// Runs field validation on every item first. If any item fails, the
/// batch-level checks are skipped: statistics over malformed items are not
/// meaningful. Otherwise sequencing, time budget, distribution and count
/// are all checked and every failure is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchValidator {
    config: BatchConfig,
}

impl BatchValidator {
    /// Create a validator with default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Validate `problems` against `targets`.
    pub fn validate(
        &self,
        problems: &[GeneratedProblem],
        targets: &AssessmentTargets,
    ) -> BatchValidationResult {
        let field_validator = ProblemValidator::new(self.config.field_bounds);

        let mut accepted: Vec<ValidatedProblem> = Vec::with_capacity(problems.len());
        let mut item_errors = Vec::new();
        let mut invalid_items = 0;

        for (index, problem) in problems.iter().enumerate() {
            match field_validator.accept(problem, index) {
                Ok(valid) => accepted.push(valid),
                Err(result) => {
                    invalid_items += 1;
                    item_errors.extend(result.errors);
                }
            }
        }

        if invalid_items > 0 {
            warn!(
                "{} of {} items failed field validation; skipping batch checks",
                invalid_items,
                problems.len()
            );
            return BatchValidationResult {
                valid: false,
                total_items: problems.len(),
                valid_items: accepted.len(),
                invalid_items,
                item_errors,
                batch_errors: Vec::new(),
                statistics: None,
            };
        }

        let statistics = compute_statistics(&accepted);
        let ctx = BatchContext {
            problems: &accepted,
            statistics: &statistics,
            targets,
        };

        let mut batch_errors = Vec::new();
        for check in self.checks() {
            let errors = check.run(&ctx);
            debug!("Batch check {}: {} error(s)", check.name(), errors.len());
            batch_errors.extend(errors);
        }

        let valid = batch_errors.is_empty();
        info!(
            "Validated batch of {} items: {} ({} batch error(s))",
            accepted.len(),
            if valid { "conforms" } else { "does not conform" },
            batch_errors.len()
        );

        BatchValidationResult {
            valid,
            total_items: problems.len(),
            valid_items: accepted.len(),
            invalid_items: 0,
            item_errors,
            batch_errors,
            statistics: Some(statistics),
        }
    }

    fn checks(&self) -> [Box<dyn BatchCheck>; 4] {
        [
            Box::new(SequenceContiguity),
            Box::new(TimeBudget {
                tolerance: self.config.time_tolerance,
            }),
            Box::new(DistributionConformance {
                tolerance: self.config.distribution_tolerance,
            }),
            Box::new(ItemCount),
        ]
    }
}
