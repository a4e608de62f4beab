//! Per-cognitive-level maps: fractional distributions and integer allocations.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::level::CognitiveLevel;

/// A value for each of the six cognitive levels.
///
/// Serializes as an object keyed by level name.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelMap<T> {
    pub remember: T,
    pub understand: T,
    pub apply: T,
    pub analyze: T,
    pub evaluate: T,
    pub create: T,
}

impl<T: Copy> LevelMap<T> {
    /// Build a map from six values in declaration order.
    pub const fn new(values: [T; 6]) -> Self {
        let [remember, understand, apply, analyze, evaluate, create] = values;
        Self {
            remember,
            understand,
            apply,
            analyze,
            evaluate,
            create,
        }
    }

    /// Build a map by evaluating `f` for every level.
    pub fn from_fn(mut f: impl FnMut(CognitiveLevel) -> T) -> Self {
        Self::new(CognitiveLevel::ALL.map(&mut f))
    }

    /// Values in declaration order.
    pub fn to_array(&self) -> [T; 6] {
        [
            self.remember,
            self.understand,
            self.apply,
            self.analyze,
            self.evaluate,
            self.create,
        ]
    }

    /// Iterate `(level, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CognitiveLevel, T)> + '_ {
        CognitiveLevel::ALL.into_iter().map(move |level| (level, self[level]))
    }

    /// Apply `f` to every value.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(CognitiveLevel, T) -> U) -> LevelMap<U> {
        LevelMap::from_fn(|level| f(level, self[level]))
    }
}

impl<T> Index<CognitiveLevel> for LevelMap<T> {
    type Output = T;

    fn index(&self, level: CognitiveLevel) -> &T {
        match level {
            CognitiveLevel::Remember => &self.remember,
            CognitiveLevel::Understand => &self.understand,
            CognitiveLevel::Apply => &self.apply,
            CognitiveLevel::Analyze => &self.analyze,
            CognitiveLevel::Evaluate => &self.evaluate,
            CognitiveLevel::Create => &self.create,
        }
    }
}

impl<T> IndexMut<CognitiveLevel> for LevelMap<T> {
    fn index_mut(&mut self, level: CognitiveLevel) -> &mut T {
        match level {
            CognitiveLevel::Remember => &mut self.remember,
            CognitiveLevel::Understand => &mut self.understand,
            CognitiveLevel::Apply => &mut self.apply,
            CognitiveLevel::Analyze => &mut self.analyze,
            CognitiveLevel::Evaluate => &mut self.evaluate,
            CognitiveLevel::Create => &mut self.create,
        }
    }
}

/// Fractional share of question volume per level.
///
/// Expected to sum to roughly 1.0; how close is a caller decision, see the
/// sum check in the estimation crate.
pub type Distribution = LevelMap<f64>;

/// Whole question counts per level. Sums exactly to the requested total.
pub type QuestionAllocation = LevelMap<u32>;

/// Signed per-level adjustments applied by an emphasis.
pub type Deltas = LevelMap<f64>;

impl LevelMap<f64> {
    /// Sum of all six fractions.
    pub fn sum(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Analyze + Evaluate, the share of higher-order judgement work.
    pub fn rigor(&self) -> f64 {
        self.analyze + self.evaluate
    }

    /// Whether any category is negative.
    pub fn has_negative(&self) -> bool {
        self.to_array().iter().any(|v| *v < 0.0)
    }
}

impl LevelMap<u32> {
    /// Total number of questions.
    pub fn total(&self) -> u32 {
        self.to_array().iter().sum()
    }
}
