//! cogspec core data models.
//!
//! This crate defines the data structures shared by the estimation and
//! quality layers: the closed tag sets, per-level maps, generated problems
//! and the validation reports produced for them.

#![warn(missing_docs)]

// Tag sets
mod level;

// Per-level maps
mod distribution;

// Problems and targets
mod problem;

// Reports and errors
mod report;
mod error;

// Re-exports
pub use level::{AbilityLevel, AssessmentType, CognitiveLevel, Emphasis, ResponseType, UnknownTag};
pub use distribution::{Deltas, Distribution, LevelMap, QuestionAllocation};
pub use problem::{AssessmentTargets, GeneratedProblem, Lenient, ValidatedProblem};
pub use report::{
    BatchError, BatchErrorKind, BatchStatistics, BatchValidationResult,
    FieldError, FieldErrorKind, IssueDetail, ValidationResult,
};
pub use error::{EngineError, Result};
