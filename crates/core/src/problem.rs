//! Generated problems, as received and as accepted.

use serde::{Deserialize, Serialize};

use crate::level::{CognitiveLevel, ResponseType};

/// A field value that either has the expected JSON type or does not.
///
/// Deserialization never fails on a type mismatch; the raw value is kept so
/// the validator can report it against the item instead of rejecting the
/// whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    /// Value of the expected type
    Typed(T),
    /// Anything else, as received
    Mismatched(serde_json::Value),
}

impl<T> Lenient<T> {
    /// The typed value, if the field had the expected type.
    pub fn typed(&self) -> Option<&T> {
        match self {
            Lenient::Typed(value) => Some(value),
            Lenient::Mismatched(_) => None,
        }
    }

    /// JSON type name of a mismatched value.
    pub fn mismatch(&self) -> Option<&'static str> {
        match self {
            Lenient::Typed(_) => None,
            Lenient::Mismatched(value) => Some(json_type_name(value)),
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Typed(value)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A problem as handed over by an external generator.
///
/// Generators are untrusted, so every field is optional and loosely typed:
/// tags are raw strings, numbers are `f64` so that fractional minutes or
/// ratings can be reported, and a value of the wrong JSON type is kept as
/// [`Lenient::Mismatched`] rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedProblem {
    /// Generator-assigned identifier
    pub id: Option<Lenient<String>>,

    /// Cognitive level tag
    pub cognitive_level: Option<Lenient<String>>,

    /// Complexity score, expected strictly inside (0, 1)
    pub complexity: Option<Lenient<f64>>,

    /// Estimated minutes to solve
    pub time_estimate: Option<Lenient<f64>>,

    /// Difficulty rating 1..=5
    pub difficulty: Option<Lenient<f64>>,

    /// Response type tag
    pub response_type: Option<Lenient<String>>,

    /// Problem body
    pub content: Option<Lenient<String>>,

    /// Zero-based position in the assessment
    pub sequence_position: Option<Lenient<f64>>,
}

impl GeneratedProblem {
    /// Create a problem with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(Lenient::Typed(id.into())),
            ..Default::default()
        }
    }

    /// The identifier, when it was supplied as a string.
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().and_then(Lenient::typed).map(String::as_str)
    }

    /// Set the cognitive level tag.
    pub fn with_cognitive_level(mut self, level: impl Into<String>) -> Self {
        self.cognitive_level = Some(Lenient::Typed(level.into()));
        self
    }

    /// Set the complexity score.
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = Some(complexity.into());
        self
    }

    /// Set the time estimate in minutes.
    pub fn with_time_estimate(mut self, minutes: f64) -> Self {
        self.time_estimate = Some(minutes.into());
        self
    }

    /// Set the difficulty rating.
    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Set the response type tag.
    pub fn with_response_type(mut self, kind: impl Into<String>) -> Self {
        self.response_type = Some(Lenient::Typed(kind.into()));
        self
    }

    /// Set the problem body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Lenient::Typed(content.into()));
        self
    }

    /// Set the sequence position.
    pub fn with_sequence_position(mut self, position: f64) -> Self {
        self.sequence_position = Some(position.into());
        self
    }
}

/// A problem that passed field validation, with every field strongly typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedProblem {
    pub id: String,
    pub cognitive_level: CognitiveLevel,
    pub complexity: f64,
    pub time_estimate: u32,
    pub difficulty: u8,
    pub response_type: ResponseType,
    pub content: String,
    pub sequence_position: Option<u32>,
}

/// What the caller expects a batch to conform to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTargets {
    /// Total time budget in minutes
    pub total_time: f64,

    /// Target share per cognitive level
    pub distribution: crate::Distribution,

    /// Expected number of items, if the caller cares
    #[serde(default)]
    pub expected_count: Option<usize>,
}

impl AssessmentTargets {
    /// Create targets without an expected count.
    pub fn new(total_time: f64, distribution: crate::Distribution) -> Self {
        Self {
            total_time,
            distribution,
            expected_count: None,
        }
    }

    /// Require an exact item count.
    pub fn with_expected_count(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }
}
