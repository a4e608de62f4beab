//! Engine error type.

use crate::level::{AbilityLevel, Emphasis};

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while deriving a content specification.
///
/// Validation of generated batches never produces these; batch findings are
/// reported as data in a `BatchValidationResult`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Every category clamped to zero during additive emphasis
    #[error("degenerate normalization: {level:?} with {emphasis:?} clamps every category to zero")]
    DegenerateNormalization {
        level: AbilityLevel,
        emphasis: Emphasis,
    },

    /// An estimated distribution does not sum to ~1.0
    #[error("distribution sum {sum:.4} is outside 1.0 ± {tolerance}")]
    DistributionSumInvalid { sum: f64, tolerance: f64 },

    /// Request cannot be planned
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
