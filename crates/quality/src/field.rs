//! Per-item field validation.
//!
//! Every rule is checked independently and every failure is reported; a
//! single bad value can produce more than one error (a time estimate of 0
//! is both non-positive and below the minimum).

use cogspec_core::{
    CognitiveLevel, FieldError, FieldErrorKind, GeneratedProblem, IssueDetail, Lenient,
    ResponseType, ValidatedProblem, ValidationResult,
};

use crate::config::FieldBounds;

/// Stateless validator for single generated problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemValidator {
    bounds: FieldBounds,
}

impl ProblemValidator {
    /// Create a validator with the given bounds.
    pub fn new(bounds: FieldBounds) -> Self {
        Self { bounds }
    }

    /// Validate a problem at `index` in its batch.
    pub fn check(&self, problem: &GeneratedProblem, index: usize) -> ValidationResult {
        self.inspect(problem, index).0
    }

    /// Validate and, on success, return the strongly typed problem.
    pub fn accept(
        &self,
        problem: &GeneratedProblem,
        index: usize,
    ) -> Result<ValidatedProblem, ValidationResult> {
        match self.inspect(problem, index) {
            (result, Some(accepted)) if result.valid => Ok(accepted),
            (result, _) => Err(result),
        }
    }

    fn inspect(
        &self,
        problem: &GeneratedProblem,
        index: usize,
    ) -> (ValidationResult, Option<ValidatedProblem>) {
        let mut report = Report::new(index, problem.id().map(str::to_string));

        let id = required(&mut report, "id", problem.id.as_ref());
        let cognitive_level = required(&mut report, "cognitive_level", problem.cognitive_level.as_ref())
            .and_then(|tag| parse_tag::<CognitiveLevel>(&mut report, "cognitive_level", tag));
        let complexity = required(&mut report, "complexity", problem.complexity.as_ref())
            .and_then(|v| self.check_complexity(&mut report, *v));
        let time_estimate = required(&mut report, "time_estimate", problem.time_estimate.as_ref())
            .and_then(|v| self.check_time(&mut report, *v));
        let difficulty = required(&mut report, "difficulty", problem.difficulty.as_ref())
            .and_then(|v| check_difficulty(&mut report, *v));
        let response_type = required(&mut report, "response_type", problem.response_type.as_ref())
            .and_then(|tag| parse_tag::<ResponseType>(&mut report, "response_type", tag));
        let content = required(&mut report, "content", problem.content.as_ref())
            .and_then(|body| check_content(&mut report, body));
        let sequence_position = problem
            .sequence_position
            .as_ref()
            .and_then(|v| typed(&mut report, "sequence_position", v))
            .map(|v| check_position(&mut report, *v));

        let accepted = match (
            id,
            cognitive_level,
            complexity,
            time_estimate,
            difficulty,
            response_type,
            content,
        ) {
            (
                Some(id),
                Some(cognitive_level),
                Some(complexity),
                Some(time_estimate),
                Some(difficulty),
                Some(response_type),
                Some(content),
            ) if report.errors.is_empty() => {
                Some(ValidatedProblem {
                    id: id.to_string(),
                    cognitive_level,
                    complexity,
                    time_estimate,
                    difficulty,
                    response_type,
                    content: content.to_string(),
                    sequence_position: sequence_position.flatten(),
                })
            }
            _ => None,
        };

        (report.finish(), accepted)
    }

    fn check_complexity(&self, report: &mut Report, value: f64) -> Option<f64> {
        if !value.is_finite() {
            report.push("complexity", FieldErrorKind::WrongType, "complexity is not a finite number", IssueDetail::default());
            return None;
        }

        let mut ok = true;
        if !(0.0..=1.0).contains(&value) {
            report.push(
                "complexity",
                FieldErrorKind::OutOfRange,
                format!("complexity {} is outside [0, 1]", value),
                IssueDetail::actual(value).with_bounds(0.0, 1.0),
            );
            ok = false;
        } else if value <= self.bounds.complexity_soft_min || value >= self.bounds.complexity_soft_max {
            // 0.0 and 1.0 always land here
            report.push(
                "complexity",
                FieldErrorKind::ComplexityExtreme,
                format!(
                    "complexity {} must lie strictly between {} and {}",
                    value, self.bounds.complexity_soft_min, self.bounds.complexity_soft_max
                ),
                IssueDetail::actual(value)
                    .with_bounds(self.bounds.complexity_soft_min, self.bounds.complexity_soft_max),
            );
            ok = false;
        }
        ok.then_some(value)
    }

    fn check_time(&self, report: &mut Report, value: f64) -> Option<u32> {
        if !value.is_finite() {
            report.push("time_estimate", FieldErrorKind::WrongType, "time estimate is not a finite number", IssueDetail::default());
            return None;
        }

        let mut ok = true;
        if value.fract() != 0.0 {
            report.push(
                "time_estimate",
                FieldErrorKind::WrongType,
                format!("time estimate {} is not a whole number of minutes", value),
                IssueDetail::actual(value),
            );
            ok = false;
        }
        if value <= 0.0 {
            report.push(
                "time_estimate",
                FieldErrorKind::OutOfRange,
                format!("time estimate {} is not positive", value),
                IssueDetail::actual(value),
            );
            ok = false;
        }

        let (min, max) = (f64::from(self.bounds.min_time), f64::from(self.bounds.max_time));
        if value < min || value > max {
            report.push(
                "time_estimate",
                FieldErrorKind::OutOfRange,
                format!("time estimate {} is outside [{}, {}] minutes", value, min, max),
                IssueDetail::actual(value).with_bounds(min, max),
            );
            ok = false;
        }
        ok.then(|| value as u32)
    }
}

/// Collects field errors for one item.
struct Report {
    index: usize,
    problem_id: Option<String>,
    errors: Vec<FieldError>,
}

impl Report {
    fn new(index: usize, problem_id: Option<String>) -> Self {
        Self {
            index,
            problem_id,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, kind: FieldErrorKind, message: impl Into<String>, detail: IssueDetail) {
        self.errors.push(FieldError {
            index: self.index,
            problem_id: self.problem_id.clone(),
            field: field.to_string(),
            kind,
            message: message.into(),
            detail,
        });
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::from_errors(self.index, self.problem_id, self.errors)
    }
}

fn required<'a, T>(report: &mut Report, field: &str, value: Option<&'a Lenient<T>>) -> Option<&'a T> {
    match value {
        Some(value) => typed(report, field, value),
        None => {
            report.push(field, FieldErrorKind::MissingField, format!("{} is required", field), IssueDetail::default());
            None
        }
    }
}

fn typed<'a, T>(report: &mut Report, field: &str, value: &'a Lenient<T>) -> Option<&'a T> {
    if let Some(found) = value.mismatch() {
        report.push(
            field,
            FieldErrorKind::WrongType,
            format!("{} has the wrong type: found {}", field, found),
            IssueDetail::default(),
        );
    }
    value.typed()
}

fn parse_tag<T: std::str::FromStr>(report: &mut Report, field: &str, tag: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match tag.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            report.push(field, FieldErrorKind::UnknownVariant, e.to_string(), IssueDetail::default());
            None
        }
    }
}

fn check_difficulty(report: &mut Report, value: f64) -> Option<u8> {
    if !value.is_finite() || value.fract() != 0.0 {
        report.push(
            "difficulty",
            FieldErrorKind::WrongType,
            format!("difficulty {} is not a whole number", value),
            IssueDetail::actual(value),
        );
        return None;
    }
    if !(1.0..=5.0).contains(&value) {
        report.push(
            "difficulty",
            FieldErrorKind::OutOfRange,
            format!("difficulty {} is not one of 1-5", value),
            IssueDetail::actual(value).with_bounds(1.0, 5.0),
        );
        return None;
    }
    Some(value as u8)
}

fn check_content<'a>(report: &mut Report, body: &'a str) -> Option<&'a str> {
    if body.trim().is_empty() {
        report.push("content", FieldErrorKind::EmptyContent, "content is blank", IssueDetail::default());
        return None;
    }
    Some(body)
}

fn check_position(report: &mut Report, value: f64) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        report.push(
            "sequence_position",
            FieldErrorKind::WrongType,
            format!("sequence position {} is not a whole number", value),
            IssueDetail::actual(value),
        );
        return None;
    }
    let max = f64::from(u32::MAX);
    if !(0.0..=max).contains(&value) {
        report.push(
            "sequence_position",
            FieldErrorKind::OutOfRange,
            format!("sequence position {} is outside [0, {}]", value, max),
            IssueDetail::actual(value).with_bounds(0.0, max),
        );
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_problem() -> GeneratedProblem {
        GeneratedProblem::new("q1")
            .with_cognitive_level("apply")
            .with_complexity(0.5)
            .with_time_estimate(3.0)
            .with_difficulty(3.0)
            .with_response_type("short_answer")
            .with_content("A train leaves at 3pm travelling 60 km/h. When does it cover 150 km?")
            .with_sequence_position(0.0)
    }

    fn check(problem: &GeneratedProblem) -> ValidationResult {
        ProblemValidator::default().check(problem, 0)
    }

    #[test]
    fn test_valid_problem_accepted() {
        let accepted = ProblemValidator::default().accept(&valid_problem(), 0).unwrap();
        assert_eq!(accepted.cognitive_level, CognitiveLevel::Apply);
        assert_eq!(accepted.time_estimate, 3);
        assert_eq!(accepted.difficulty, 3);
        assert_eq!(accepted.response_type, ResponseType::ShortAnswer);
        assert_eq!(accepted.sequence_position, Some(0));
    }

    #[test]
    fn test_sequence_position_is_optional() {
        let mut problem = valid_problem();
        problem.sequence_position = None;
        let accepted = ProblemValidator::default().accept(&problem, 0).unwrap();
        assert_eq!(accepted.sequence_position, None);
    }

    #[test]
    fn test_every_missing_field_reported() {
        let result = check(&GeneratedProblem::default());
        assert!(!result.valid);
        let missing: Vec<_> = result
            .errors
            .iter()
            .filter(|e| e.kind == FieldErrorKind::MissingField)
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(
            missing,
            vec!["id", "cognitive_level", "complexity", "time_estimate", "difficulty", "response_type", "content"]
        );
    }

    #[test]
    fn test_unknown_tags() {
        let problem = valid_problem()
            .with_cognitive_level("synthesize")
            .with_response_type("interpretive_dance");
        let result = check(&problem);
        assert!(result.has("cognitive_level", FieldErrorKind::UnknownVariant));
        assert!(result.has("response_type", FieldErrorKind::UnknownVariant));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_complexity_endpoints_rejected() {
        for value in [0.0, 1.0] {
            let result = check(&valid_problem().with_complexity(value));
            assert!(!result.valid);
            assert!(result.has("complexity", FieldErrorKind::ComplexityExtreme));
            assert!(!result.has("complexity", FieldErrorKind::OutOfRange));
        }
    }

    #[test]
    fn test_complexity_outside_unit_interval() {
        let result = check(&valid_problem().with_complexity(1.4));
        assert!(result.has("complexity", FieldErrorKind::OutOfRange));
        assert_eq!(result.errors[0].detail.max, Some(1.0));
    }

    #[test]
    fn test_complexity_soft_window_is_configurable() {
        let validator = ProblemValidator::new(FieldBounds::default().with_complexity_window(0.0, 1.0));
        assert!(validator.check(&valid_problem().with_complexity(0.05), 0).valid);
        assert!(!validator.check(&valid_problem().with_complexity(0.0), 0).valid);
        assert!(!check(&valid_problem().with_complexity(0.05)).valid);
    }

    #[test]
    fn test_fractional_time_rejected() {
        let result = check(&valid_problem().with_time_estimate(2.5));
        assert!(result.has("time_estimate", FieldErrorKind::WrongType));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_zero_time_fails_both_checks() {
        let result = check(&valid_problem().with_time_estimate(0.0));
        let kinds: Vec<_> = result
            .errors
            .iter()
            .filter(|e| e.field == "time_estimate")
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![FieldErrorKind::OutOfRange, FieldErrorKind::OutOfRange]);
    }

    #[test]
    fn test_time_outside_window_rejected() {
        let result = check(&valid_problem().with_time_estimate(150.0));
        assert!(result.has("time_estimate", FieldErrorKind::OutOfRange));
        assert!(!result.has("time_estimate", FieldErrorKind::WrongType));
        assert_eq!(result.errors[0].detail.min, Some(1.0));
        assert_eq!(result.errors[0].detail.max, Some(120.0));

        let narrow = ProblemValidator::new(FieldBounds::default().with_time_window(5, 10));
        assert!(!narrow.check(&valid_problem(), 0).valid);
    }

    #[test]
    fn test_difficulty_must_be_one_to_five() {
        assert!(check(&valid_problem().with_difficulty(0.0)).has("difficulty", FieldErrorKind::OutOfRange));
        assert!(check(&valid_problem().with_difficulty(6.0)).has("difficulty", FieldErrorKind::OutOfRange));
        assert!(check(&valid_problem().with_difficulty(2.5)).has("difficulty", FieldErrorKind::WrongType));
        assert!(check(&valid_problem().with_difficulty(5.0)).valid);
    }

    #[test]
    fn test_blank_content_rejected() {
        let result = check(&valid_problem().with_content("  \n\t "));
        assert!(result.has("content", FieldErrorKind::EmptyContent));
    }

    #[test]
    fn test_bad_sequence_position() {
        assert!(check(&valid_problem().with_sequence_position(-1.0)).has("sequence_position", FieldErrorKind::OutOfRange));
        assert!(check(&valid_problem().with_sequence_position(1.5)).has("sequence_position", FieldErrorKind::WrongType));
    }

    #[test]
    fn test_position_beyond_u32_rejected() {
        let result = check(&valid_problem().with_sequence_position(4_294_967_296.0));
        assert!(result.has("sequence_position", FieldErrorKind::OutOfRange));
        assert_eq!(result.errors[0].detail.actual, Some(4_294_967_296.0));
        assert!(check(&valid_problem().with_sequence_position(4_294_967_295.0)).valid);
    }

    #[test]
    fn test_wrong_json_types_reported_per_field() {
        let batch: Vec<GeneratedProblem> = serde_json::from_str(
            r#"[
                { "id": "q1", "cognitive_level": 3, "complexity": 0.5, "time_estimate": "5",
                  "difficulty": 2, "response_type": "essay", "content": "Compare two poems." },
                { "id": "q2", "cognitive_level": "apply", "complexity": 0.5, "time_estimate": 5,
                  "difficulty": 2, "response_type": "essay", "content": "Compare two poems." }
            ]"#,
        )
        .unwrap();

        let first = check(&batch[0]);
        assert!(first.has("time_estimate", FieldErrorKind::WrongType));
        assert!(first.has("cognitive_level", FieldErrorKind::WrongType));
        assert_eq!(first.errors.len(), 2);
        assert!(first.errors[0].message.contains("found"));

        assert!(ProblemValidator::default().check(&batch[1], 1).valid);
    }

    #[test]
    fn test_mistyped_optional_position_reported() {
        let mut problem = valid_problem();
        problem.sequence_position = Some(Lenient::Mismatched(serde_json::json!("first")));
        let result = check(&problem);
        assert!(result.has("sequence_position", FieldErrorKind::WrongType));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_errors_are_not_short_circuited() {
        let problem = GeneratedProblem::new("q9")
            .with_cognitive_level("apply")
            .with_complexity(0.0)
            .with_time_estimate(-2.0)
            .with_difficulty(9.0)
            .with_response_type("essay")
            .with_content("");
        let result = ProblemValidator::default().check(&problem, 4);
        assert_eq!(result.index, 4);
        assert_eq!(result.problem_id.as_deref(), Some("q9"));
        // complexity, time (positive + window), difficulty, content
        assert_eq!(result.errors.len(), 5);
        assert!(result.errors.iter().all(|e| e.index == 4));
    }

    #[test]
    fn test_accept_returns_report_on_failure() {
        let err = ProblemValidator::default()
            .accept(&valid_problem().with_content(""), 7)
            .unwrap_err();
        assert_eq!(err.index, 7);
        assert!(!err.valid);
    }
}
