//! Distribution estimation from ability level and emphasis.

use cogspec_core::{
    AbilityLevel, AssessmentType, CognitiveLevel, Distribution, Emphasis, EngineError, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::tables::RuleTables;

/// Minimum Analyze + Evaluate share under exam-style emphasis.
pub const RIGOR_FLOOR: f64 = 0.20;

/// Minimum Create share for advanced levels under exam-style emphasis.
pub const CREATE_FLOOR: f64 = 0.05;

/// Which rule produced an estimated distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedRule {
    /// Baseline returned unchanged
    Baseline,
    /// Additive deltas, clamped and renormalized
    Additive,
    /// Exam-style rigor floor. The result is NOT renormalized.
    RigorFloor,
    /// Exam-style create floor
    CreateFloor,
}

/// An estimated distribution and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimation {
    pub distribution: Distribution,
    pub rule: AppliedRule,
}

/// Derives target distributions from injected rule tables.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    tables: &'a RuleTables,
}

impl<'a> Estimator<'a> {
    /// Create an estimator over the given tables.
    pub fn new(tables: &'a RuleTables) -> Self {
        Self { tables }
    }

    /// The tables this estimator reads.
    pub fn tables(&self) -> &'a RuleTables {
        self.tables
    }

    /// Estimate the target distribution.
    ///
    /// The assessment type only affects pacing and is ignored here.
    pub fn estimate(
        &self,
        level: AbilityLevel,
        _assessment_type: AssessmentType,
        emphasis: Emphasis,
    ) -> Result<Distribution> {
        self.estimate_detailed(level, emphasis).map(|e| e.distribution)
    }

    /// Estimate the target distribution and report which rule fired.
    pub fn estimate_detailed(&self, level: AbilityLevel, emphasis: Emphasis) -> Result<Estimation> {
        let baseline = self.tables.baseline(level);

        let estimation = match self.tables.deltas(emphasis) {
            _ if emphasis == Emphasis::Balanced => Estimation {
                distribution: baseline,
                rule: AppliedRule::Baseline,
            },
            Some(deltas) => {
                let clamped = baseline.map(|category, v| (v + deltas[category]).max(0.0));
                let sum = clamped.sum();
                if sum <= 0.0 {
                    warn!("Every category clamped to zero for {:?} / {:?}", level, emphasis);
                    return Err(EngineError::DegenerateNormalization { level, emphasis });
                }
                Estimation {
                    distribution: clamped.map(|_, v| v / sum),
                    rule: AppliedRule::Additive,
                }
            }
            None => exam_style(level, baseline),
        };

        debug!(
            "Estimated {:?} / {:?} via {:?}: {:?}",
            level,
            emphasis,
            estimation.rule,
            estimation.distribution.to_array()
        );
        Ok(estimation)
    }
}

impl Default for Estimator<'static> {
    fn default() -> Self {
        Self::new(RuleTables::standard())
    }
}

/// Exam-style constraint injection: first matching correction wins.
///
/// A distribution short on both rigor and Create only receives the rigor
/// correction.
fn exam_style(level: AbilityLevel, baseline: Distribution) -> Estimation {
    let original = baseline;

    if original.rigor() < RIGOR_FLOOR {
        let half_deficit = (RIGOR_FLOOR - original.rigor()) / 2.0;
        // rigor < 0.20 keeps the divisor above 0.80
        let scale = (1.0 - RIGOR_FLOOR) / (1.0 - original.analyze - original.evaluate);

        let distribution = original.map(|category, v| match category {
            CognitiveLevel::Remember | CognitiveLevel::Understand | CognitiveLevel::Apply => v * scale,
            CognitiveLevel::Analyze | CognitiveLevel::Evaluate => v + half_deficit,
            CognitiveLevel::Create if level.is_advanced() => v,
            CognitiveLevel::Create => 0.0,
        });
        debug!("Exam-style rigor floor applied for {:?}", level);
        return Estimation {
            distribution,
            rule: AppliedRule::RigorFloor,
        };
    }

    if level.is_advanced() && original.create < CREATE_FLOOR {
        // create < 0.05 keeps the divisor above 0.95
        let scale = (1.0 - CREATE_FLOOR) / (1.0 - original.create);
        let distribution = original.map(|category, v| match category {
            CognitiveLevel::Create => CREATE_FLOOR,
            _ => v * scale,
        });
        debug!("Exam-style create floor applied for {:?}", level);
        return Estimation {
            distribution,
            rule: AppliedRule::CreateFloor,
        };
    }

    Estimation {
        distribution: baseline,
        rule: AppliedRule::Baseline,
    }
}
