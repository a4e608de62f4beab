//! Whole-distribution sum check, used as a guard right after estimation.
//!
//! Not to be confused with per-category conformance of an observed batch,
//! which lives in the quality crate.

use cogspec_core::{Distribution, EngineError, Result};
use serde::{Deserialize, Serialize};

/// Default allowed deviation of a distribution's sum from 1.0.
pub const DEFAULT_SUM_TOLERANCE: f64 = 0.02;

/// Outcome of checking that a distribution sums to ~1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumCheck {
    pub valid: bool,
    pub sum: f64,
    pub tolerance: f64,
    pub error: Option<String>,
}

impl SumCheck {
    /// Check with the default tolerance.
    pub fn run(distribution: &Distribution) -> Self {
        Self::with_tolerance(distribution, DEFAULT_SUM_TOLERANCE)
    }

    /// Check that `|sum - 1.0| <= tolerance`.
    pub fn with_tolerance(distribution: &Distribution, tolerance: f64) -> Self {
        let sum = distribution.sum();
        let valid = (sum - 1.0).abs() <= tolerance;
        let error = (!valid).then(|| {
            EngineError::DistributionSumInvalid { sum, tolerance }.to_string()
        });
        Self {
            valid,
            sum,
            tolerance,
            error,
        }
    }

    /// Convert to a `Result`, failing with `DistributionSumInvalid`.
    pub fn into_result(self) -> Result<f64> {
        if self.valid {
            Ok(self.sum)
        } else {
            Err(EngineError::DistributionSumInvalid {
                sum: self.sum,
                tolerance: self.tolerance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_distribution_is_valid() {
        let check = SumCheck::run(&Distribution::new([0.1, 0.2, 0.35, 0.25, 0.05, 0.05]));
        assert!(check.valid);
        assert!(check.error.is_none());
        assert!((check.sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_within_tolerance() {
        let check = SumCheck::run(&Distribution::new([0.1, 0.2, 0.35, 0.25, 0.05, 0.065]));
        assert!(check.valid);
    }

    #[test]
    fn test_outside_tolerance() {
        let check = SumCheck::run(&Distribution::new([0.1, 0.2, 0.35, 0.25, 0.05, 0.10]));
        assert!(!check.valid);
        assert!(check.error.as_deref().unwrap_or_default().contains("1.0500"));
        assert!(matches!(
            check.into_result(),
            Err(EngineError::DistributionSumInvalid { .. })
        ));
    }

    #[test]
    fn test_custom_tolerance() {
        let d = Distribution::new([0.1, 0.2, 0.35, 0.25, 0.05, 0.10]);
        assert!(SumCheck::with_tolerance(&d, 0.05 + 1e-9).valid);
        assert!(!SumCheck::with_tolerance(&d, 0.01).valid);
    }
}
