//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Per-item bounds applied by the field validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    /// Shortest acceptable time estimate, minutes
    pub min_time: u32,
    /// Longest acceptable time estimate, minutes
    pub max_time: u32,
    /// Complexity must be strictly above this
    pub complexity_soft_min: f64,
    /// Complexity must be strictly below this
    pub complexity_soft_max: f64,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            min_time: 1,
            max_time: 120,
            complexity_soft_min: 0.1,
            complexity_soft_max: 0.9,
        }
    }
}

impl FieldBounds {
    /// Set the accepted time window.
    pub fn with_time_window(mut self, min_time: u32, max_time: u32) -> Self {
        self.min_time = min_time;
        self.max_time = max_time;
        self
    }

    /// Set the soft complexity window (exclusive on both ends).
    pub fn with_complexity_window(mut self, soft_min: f64, soft_max: f64) -> Self {
        self.complexity_soft_min = soft_min;
        self.complexity_soft_max = soft_max;
        self
    }
}

/// Configuration for batch conformance validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Per-item bounds
    pub field_bounds: FieldBounds,
    /// Allowed relative deviation of total time from the budget
    pub time_tolerance: f64,
    /// Allowed absolute deviation of each level's share, as a fraction
    pub distribution_tolerance: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            field_bounds: FieldBounds::default(),
            time_tolerance: 0.10,
            distribution_tolerance: 0.05,
        }
    }
}

impl BatchConfig {
    /// Set the per-item bounds.
    pub fn with_field_bounds(mut self, bounds: FieldBounds) -> Self {
        self.field_bounds = bounds;
        self
    }

    /// Set the relative time tolerance.
    pub fn with_time_tolerance(mut self, tolerance: f64) -> Self {
        self.time_tolerance = tolerance;
        self
    }

    /// Set the per-level distribution tolerance.
    pub fn with_distribution_tolerance(mut self, tolerance: f64) -> Self {
        self.distribution_tolerance = tolerance;
        self
    }
}
