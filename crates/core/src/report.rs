//! Validation reports - per-item and batch-level findings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::distribution::{Distribution, QuestionAllocation};
use crate::level::{CognitiveLevel, ResponseType};

/// Kinds of per-item field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldErrorKind {
    /// Required field absent
    MissingField,
    /// Numeric value outside its allowed range or window
    OutOfRange,
    /// Value has the wrong shape (e.g. fractional where an integer is required)
    WrongType,
    /// Tag is not part of its closed set
    UnknownVariant,
    /// Complexity at or beyond the soft limits
    ComplexityExtreme,
    /// Content is blank after trimming
    EmptyContent,
}

impl FieldErrorKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldErrorKind::MissingField => "missing-field",
            FieldErrorKind::OutOfRange => "out-of-range",
            FieldErrorKind::WrongType => "wrong-type",
            FieldErrorKind::UnknownVariant => "unknown-variant",
            FieldErrorKind::ComplexityExtreme => "complexity-extreme",
            FieldErrorKind::EmptyContent => "empty-content",
        }
    }
}

/// Kinds of batch-level conformance errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchErrorKind {
    DistributionMismatch,
    TimeOutOfRange,
    SequenceNotContiguous,
    CountMismatch,
}

impl BatchErrorKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchErrorKind::DistributionMismatch => "distribution-mismatch",
            BatchErrorKind::TimeOutOfRange => "time-out-of-range",
            BatchErrorKind::SequenceNotContiguous => "sequence-not-contiguous",
            BatchErrorKind::CountMismatch => "count-mismatch",
        }
    }
}

/// Numeric context attached to an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl IssueDetail {
    /// Detail carrying only the offending value.
    pub fn actual(actual: f64) -> Self {
        Self {
            actual: Some(actual),
            ..Default::default()
        }
    }

    /// Offending value against an expected one.
    pub fn versus(actual: f64, expected: f64) -> Self {
        Self {
            actual: Some(actual),
            expected: Some(expected),
            ..Default::default()
        }
    }

    /// Attach the allowed bounds.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// One problem with one field of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Position of the item in the submitted batch
    pub index: usize,
    /// Item identifier, when it was supplied
    pub problem_id: Option<String>,
    /// Offending field name
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
    #[serde(default)]
    pub detail: IssueDetail,
}

/// Outcome of validating a single problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub index: usize,
    pub problem_id: Option<String>,
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Build a result from collected errors; valid iff there are none.
    pub fn from_errors(index: usize, problem_id: Option<String>, errors: Vec<FieldError>) -> Self {
        Self {
            index,
            problem_id,
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether any error of the given kind was reported for `field`.
    pub fn has(&self, field: &str, kind: FieldErrorKind) -> bool {
        self.errors.iter().any(|e| e.field == field && e.kind == kind)
    }
}

/// A batch-level conformance failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchError {
    pub kind: BatchErrorKind,
    pub message: String,
    /// Category concerned, for distribution mismatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<CognitiveLevel>,
    #[serde(default)]
    pub detail: IssueDetail,
}

/// Aggregates over a batch of accepted problems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub item_count: usize,
    /// Sum of time estimates in minutes
    pub total_time: u64,
    pub mean_time: f64,
    pub mean_complexity: f64,
    /// Items per cognitive level
    pub level_counts: QuestionAllocation,
    /// Observed share per cognitive level
    pub level_fractions: Distribution,
    /// Items per difficulty rating
    pub difficulty_histogram: BTreeMap<u8, usize>,
    /// Items per response type
    pub response_type_histogram: BTreeMap<ResponseType, usize>,
}

/// Outcome of validating a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchValidationResult {
    pub valid: bool,
    pub total_items: usize,
    pub valid_items: usize,
    pub invalid_items: usize,
    pub item_errors: Vec<FieldError>,
    pub batch_errors: Vec<BatchError>,
    /// Present only when batch-level checks ran
    pub statistics: Option<BatchStatistics>,
}

impl BatchValidationResult {
    /// Whether any batch-level error of the given kind was reported.
    pub fn has_batch_error(&self, kind: BatchErrorKind) -> bool {
        self.batch_errors.iter().any(|e| e.kind == kind)
    }

    /// Total number of errors at both levels.
    pub fn error_count(&self) -> usize {
        self.item_errors.len() + self.batch_errors.len()
    }
}
