//! Batch Quality Assurance
//!
//! Per-item field validation, batch statistics and batch conformance
//! checks for generated problems.

#![warn(missing_docs)]

pub mod config;
pub mod field;
pub mod stats;
pub mod checks;
pub mod batch;

pub use config::{BatchConfig, FieldBounds};
pub use field::ProblemValidator;
pub use stats::compute_statistics;
pub use checks::{
    BatchCheck, BatchContext, DistributionConformance, ItemCount, SequenceContiguity, TimeBudget,
};
pub use batch::BatchValidator;
