//! Specification stage: turn a coarse request into checkable targets.

use cogspec_core::{
    AbilityLevel, AssessmentTargets, AssessmentType, Distribution, Emphasis, EngineError,
    QuestionAllocation, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::allocator::allocate;
use crate::estimator::{AppliedRule, Estimator};
use crate::sum_check::{SumCheck, DEFAULT_SUM_TOLERANCE};
use crate::tables::{ComplexityRange, RuleTables};

/// What the caller asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationRequest {
    pub level: AbilityLevel,
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub emphasis: Emphasis,
    /// Time budget in minutes
    pub time_budget: u32,
    /// Explicit item count; estimated from the time budget when absent
    #[serde(default)]
    pub item_count: Option<u32>,
}

impl SpecificationRequest {
    /// Create a balanced request without an explicit item count.
    pub fn new(level: AbilityLevel, assessment_type: AssessmentType, time_budget: u32) -> Self {
        Self {
            level,
            assessment_type,
            emphasis: Emphasis::Balanced,
            time_budget,
            item_count: None,
        }
    }

    /// Set the emphasis.
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Set an explicit item count.
    pub fn with_item_count(mut self, count: u32) -> Self {
        self.item_count = Some(count);
        self
    }
}

/// A precise, machine-checkable content specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSpecification {
    pub request: SpecificationRequest,
    pub distribution: Distribution,
    /// Rule that shaped the distribution
    pub rule: AppliedRule,
    pub sum_check: SumCheck,
    /// Item count implied by the time budget and pacing
    pub estimated_item_count: u32,
    /// Item count the allocation was made for
    pub item_count: u32,
    pub allocation: QuestionAllocation,
    pub complexity_range: ComplexityRange,
}

impl ContentSpecification {
    /// Targets for verifying a batch generated against this specification.
    pub fn targets(&self) -> AssessmentTargets {
        AssessmentTargets::new(f64::from(self.request.time_budget), self.distribution)
            .with_expected_count(self.item_count as usize)
    }
}

/// Item count implied by a time budget at the assessment's pacing.
///
/// Zero minutes yield zero items; any positive budget yields at least one.
pub fn estimate_item_count(time_budget: u32, assessment_type: AssessmentType) -> u32 {
    if time_budget == 0 {
        return 0;
    }
    let estimate = (f64::from(time_budget) * assessment_type.questions_per_minute()).round();
    (estimate as u32).max(1)
}

/// Chains estimation, the sum guard and allocation.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    estimator: Estimator<'a>,
    sum_tolerance: f64,
}

impl<'a> Planner<'a> {
    /// Create a planner over the given tables.
    pub fn new(tables: &'a RuleTables) -> Self {
        Self {
            estimator: Estimator::new(tables),
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }

    /// Set the tolerance of the post-estimation sum check.
    pub fn with_sum_tolerance(mut self, tolerance: f64) -> Self {
        self.sum_tolerance = tolerance;
        self
    }

    /// Produce a content specification.
    ///
    /// A failing sum check is reported in the result rather than as an
    /// error; it indicates a table defect, not a bad request.
    pub fn plan(&self, request: &SpecificationRequest) -> Result<ContentSpecification> {
        let estimated_item_count = estimate_item_count(request.time_budget, request.assessment_type);
        let item_count = request.item_count.unwrap_or(estimated_item_count);
        if item_count == 0 {
            return Err(EngineError::InvalidRequest(
                "item count is zero: supply a positive time budget or item count".to_string(),
            ));
        }

        let estimation = self.estimator.estimate_detailed(request.level, request.emphasis)?;
        let sum_check = SumCheck::with_tolerance(&estimation.distribution, self.sum_tolerance);
        if !sum_check.valid {
            warn!(
                "Estimated distribution for {:?} / {:?} failed the sum check: {}",
                request.level, request.emphasis, sum_check.sum
            );
        }

        let allocation = allocate(&estimation.distribution, item_count);
        let complexity_range = self.estimator.tables().complexity_range(request.level);

        info!(
            "Planned {} items for {:?} {:?} ({:?}): {:?}",
            item_count,
            request.level,
            request.assessment_type,
            request.emphasis,
            allocation.to_array()
        );

        Ok(ContentSpecification {
            request: request.clone(),
            distribution: estimation.distribution,
            rule: estimation.rule,
            sum_check,
            estimated_item_count,
            item_count,
            allocation,
            complexity_range,
        })
    }
}

impl Default for Planner<'static> {
    fn default() -> Self {
        Self::new(RuleTables::standard())
    }
}
