//! Static rule tables - baselines, emphasis deltas and complexity ranges.
//!
//! The shipped tables are built once per process and never mutated. The
//! estimator takes a `&RuleTables`, so tests and callers can substitute
//! their own.

use cogspec_core::{AbilityLevel, Deltas, Distribution, Emphasis};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Complexity window a level's problems should fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityRange {
    pub min: f64,
    pub max: f64,
}

impl ComplexityRange {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

const REMEDIAL: Distribution = Distribution::new([0.25, 0.30, 0.30, 0.10, 0.05, 0.00]);
const STANDARD: Distribution = Distribution::new([0.10, 0.20, 0.35, 0.25, 0.05, 0.05]);
const HONORS: Distribution = Distribution::new([0.05, 0.15, 0.30, 0.30, 0.12, 0.08]);
const AP: Distribution = Distribution::new([0.05, 0.10, 0.25, 0.30, 0.18, 0.12]);

// No row raises Create: levels without a Create baseline must stay at zero.
const BALANCED: Deltas = Deltas::new([0.0; 6]);
const CONCEPTUAL: Deltas = Deltas::new([-0.08, 0.13, -0.10, 0.05, 0.0, 0.0]);
const PROCEDURAL: Deltas = Deltas::new([0.05, -0.05, 0.15, -0.10, -0.05, 0.0]);
const APPLIED: Deltas = Deltas::new([-0.05, -0.05, 0.10, 0.05, 0.0, -0.05]);

/// Baseline distributions per ability level plus deltas per additive emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    baselines: [Distribution; 4],
    deltas: [Deltas; 4],
    complexity: [ComplexityRange; 4],
}

impl RuleTables {
    /// The shipped tables, initialised on first use.
    pub fn standard() -> &'static RuleTables {
        static TABLES: OnceLock<RuleTables> = OnceLock::new();
        TABLES.get_or_init(RuleTables::default)
    }

    /// Baseline distribution for a level.
    pub fn baseline(&self, level: AbilityLevel) -> Distribution {
        self.baselines[level_slot(level)]
    }

    /// Deltas for an emphasis, or `None` for exam-style which has none.
    pub fn deltas(&self, emphasis: Emphasis) -> Option<Deltas> {
        emphasis_slot(emphasis).map(|slot| self.deltas[slot])
    }

    /// Expected complexity range for a level.
    pub fn complexity_range(&self, level: AbilityLevel) -> ComplexityRange {
        self.complexity[level_slot(level)]
    }

    /// Replace the baseline for a level.
    pub fn with_baseline(mut self, level: AbilityLevel, baseline: Distribution) -> Self {
        self.baselines[level_slot(level)] = baseline;
        self
    }

    /// Replace the deltas for an additive emphasis. Exam-style is ignored.
    pub fn with_deltas(mut self, emphasis: Emphasis, deltas: Deltas) -> Self {
        if let Some(slot) = emphasis_slot(emphasis) {
            self.deltas[slot] = deltas;
        }
        self
    }

    /// Replace the complexity range for a level.
    pub fn with_complexity_range(mut self, level: AbilityLevel, range: ComplexityRange) -> Self {
        self.complexity[level_slot(level)] = range;
        self
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            baselines: [REMEDIAL, STANDARD, HONORS, AP],
            deltas: [BALANCED, CONCEPTUAL, PROCEDURAL, APPLIED],
            complexity: [
                ComplexityRange::new(0.15, 0.40),
                ComplexityRange::new(0.30, 0.60),
                ComplexityRange::new(0.45, 0.75),
                ComplexityRange::new(0.55, 0.85),
            ],
        }
    }
}

fn level_slot(level: AbilityLevel) -> usize {
    match level {
        AbilityLevel::Remedial => 0,
        AbilityLevel::Standard => 1,
        AbilityLevel::Honors => 2,
        AbilityLevel::Ap => 3,
    }
}

fn emphasis_slot(emphasis: Emphasis) -> Option<usize> {
    match emphasis {
        Emphasis::Balanced => Some(0),
        Emphasis::Conceptual => Some(1),
        Emphasis::Procedural => Some(2),
        Emphasis::Applied => Some(3),
        Emphasis::ExamStyle => None,
    }
}
