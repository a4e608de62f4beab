//! Closed tag sets - cognitive levels, ability levels, emphases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a tag string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {value:?}")]
pub struct UnknownTag {
    /// Which tag set was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownTag {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One of the six cognitive categories a question can demand.
///
/// Declaration order is significant: it is the tie-break key used by the
/// question allocator, so reordering variants changes allocation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl CognitiveLevel {
    /// All six levels in declaration order.
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Remember,
        CognitiveLevel::Understand,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
        CognitiveLevel::Evaluate,
        CognitiveLevel::Create,
    ];

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveLevel::Remember => "remember",
            CognitiveLevel::Understand => "understand",
            CognitiveLevel::Apply => "apply",
            CognitiveLevel::Analyze => "analyze",
            CognitiveLevel::Evaluate => "evaluate",
            CognitiveLevel::Create => "create",
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CognitiveLevel {
    type Err = UnknownTag;

    /// Case-insensitive; generators are inconsistent about capitalisation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CognitiveLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == needle)
            .ok_or_else(|| UnknownTag::new("cognitive level", s))
    }
}

/// Student ability level the assessment is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityLevel {
    Remedial,
    Standard,
    Honors,
    Ap,
}

impl AbilityLevel {
    /// All ability levels.
    pub const ALL: [AbilityLevel; 4] = [
        AbilityLevel::Remedial,
        AbilityLevel::Standard,
        AbilityLevel::Honors,
        AbilityLevel::Ap,
    ];

    /// Whether this level is expected to carry open-ended creation work.
    pub fn is_advanced(self) -> bool {
        matches!(self, AbilityLevel::Honors | AbilityLevel::Ap)
    }
}

/// Kind of assessment being produced.
///
/// Only the pacing rate depends on this; the distribution does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Quiz,
    Test,
    Exam,
}

impl AssessmentType {
    /// All assessment types.
    pub const ALL: [AssessmentType; 3] =
        [AssessmentType::Quiz, AssessmentType::Test, AssessmentType::Exam];

    /// Expected questions answered per minute.
    pub fn questions_per_minute(self) -> f64 {
        match self {
            AssessmentType::Quiz => 0.5,
            AssessmentType::Test => 0.4,
            AssessmentType::Exam => 0.3,
        }
    }
}

/// Pedagogical emphasis that reshapes the baseline distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Neutral: the baseline is used as-is
    #[default]
    Balanced,
    Conceptual,
    Procedural,
    Applied,
    /// Injects rigor constraints instead of additive deltas
    ExamStyle,
}

impl Emphasis {
    /// All emphases.
    pub const ALL: [Emphasis; 5] = [
        Emphasis::Balanced,
        Emphasis::Conceptual,
        Emphasis::Procedural,
        Emphasis::Applied,
        Emphasis::ExamStyle,
    ];

    /// Whether this emphasis works through additive deltas.
    pub fn is_additive(self) -> bool {
        !matches!(self, Emphasis::ExamStyle)
    }
}

/// How a student is expected to answer a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    MultipleChoice,
    ShortAnswer,
    Essay,
    TrueFalse,
    Numeric,
}

impl ResponseType {
    /// All response types.
    pub const ALL: [ResponseType; 5] = [
        ResponseType::MultipleChoice,
        ResponseType::ShortAnswer,
        ResponseType::Essay,
        ResponseType::TrueFalse,
        ResponseType::Numeric,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::MultipleChoice => "multiple_choice",
            ResponseType::ShortAnswer => "short_answer",
            ResponseType::Essay => "essay",
            ResponseType::TrueFalse => "true_false",
            ResponseType::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ResponseType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| UnknownTag::new("response type", s))
    }
}
