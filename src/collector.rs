//! Input collection.
//!
//! One abstraction over where a `PredictionInput` comes from: an operator
//! answering prompts, or a structured JSON payload. Both paths go through
//! the same field table, so presence and primitive types are checked
//! identically and numeric ranges are never checked.

use crate::error::{PredictionError, Result};
use crate::feature_extractor::FeatureValue;
use crate::types::input::{FieldKind, FieldSpec, PredictionInput, FIELDS};
use std::io::{BufRead, Write};

/// A source able to produce one well-formed record
pub trait InputCollector {
    fn collect(self) -> Result<PredictionInput>;
}

/// Interactive source: prompts for each field in order on `output` and
/// reads one line per answer from `input`.
pub struct PromptSource<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, field: &FieldSpec) -> Result<String> {
        write!(self.output, "{}", field.prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PredictionError::InputClosed { field: field.name });
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead, W: Write> InputCollector for PromptSource<R, W> {
    /// Abandons the whole record on the first value that fails to coerce.
    fn collect(mut self) -> Result<PredictionInput> {
        let mut answers = Vec::with_capacity(FIELDS.len());

        for field in &FIELDS {
            let answer = self.read_answer(field)?;
            answers.push(coerce(field, &answer)?);
        }

        let answers = Answers(answers);
        Ok(PredictionInput {
            age: answers.integer(0)?,
            gender: answers.text(1)?,
            academic_level: answers.text(2)?,
            avg_daily_usage_hours: answers.real(3)?,
            most_used_platform: answers.text(4)?,
            affects_academic_performance: answers.text(5)?,
            sleep_hours_per_night: answers.real(6)?,
            mental_health_score: answers.integer(7)?,
            relationship_status: answers.text(8)?,
            conflicts_over_social_media: answers.integer(9)?,
        })
    }
}

/// Coerced answers, indexed like `FIELDS`
struct Answers(Vec<FeatureValue>);

impl Answers {
    fn get(&self, index: usize) -> Result<&FeatureValue> {
        self.0.get(index).ok_or(PredictionError::InputClosed {
            field: FIELDS[index].name,
        })
    }

    fn integer(&self, index: usize) -> Result<i64> {
        match self.get(index)? {
            FeatureValue::Integer(v) => Ok(*v),
            other => Err(kind_mismatch(index, other)),
        }
    }

    fn real(&self, index: usize) -> Result<f64> {
        match self.get(index)? {
            FeatureValue::Real(v) => Ok(*v),
            other => Err(kind_mismatch(index, other)),
        }
    }

    fn text(&self, index: usize) -> Result<String> {
        match self.get(index)? {
            FeatureValue::Text(s) => Ok(s.clone()),
            other => Err(kind_mismatch(index, other)),
        }
    }
}

fn kind_mismatch(index: usize, value: &FeatureValue) -> PredictionError {
    PredictionError::InputValidation {
        field: FIELDS[index].name.to_string(),
        message: format!("expected {:?}, got {}", FIELDS[index].kind, value),
    }
}

/// Non-finite reals ("nan", "inf") are accepted here and left to the
/// pipeline to reject.
fn coerce(field: &FieldSpec, raw: &str) -> Result<FeatureValue> {
    let invalid = |expected: &str| PredictionError::InputValidation {
        field: field.name.to_string(),
        message: format!("expected {}, got {:?}", expected, raw),
    };

    match field.kind {
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(FeatureValue::Integer)
            .map_err(|_| invalid("an integer")),
        FieldKind::Real => raw
            .trim()
            .parse::<f64>()
            .map(FeatureValue::Real)
            .map_err(|_| invalid("a number")),
        FieldKind::Text => Ok(FeatureValue::Text(raw.to_string())),
    }
}

/// Structured source: a JSON request body
pub struct PayloadSource<'a> {
    body: &'a [u8],
}

impl<'a> PayloadSource<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body }
    }
}

impl InputCollector for PayloadSource<'_> {
    fn collect(self) -> Result<PredictionInput> {
        serde_json::from_slice(self.body).map_err(schema_error)
    }
}

fn schema_error(e: serde_json::Error) -> PredictionError {
    PredictionError::InputValidation {
        field: "body".to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_body, sample_input};
    use std::io::Cursor;

    const ANSWERS: &str = "20\nMale\nUndergraduate\n4.0\nInstagram\nYes\n7\n6\nSingle\n2\n";

    fn collect_from(answers: &str) -> (Result<PredictionInput>, String) {
        let mut output = Vec::new();
        let result = PromptSource::new(Cursor::new(answers.as_bytes()), &mut output).collect();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_collects_all_fields() {
        let (result, transcript) = collect_from(ANSWERS);

        assert_eq!(result.unwrap(), sample_input());
        for field in &FIELDS {
            assert!(transcript.contains(field.prompt));
        }
    }

    #[test]
    fn test_prompt_trims_numbers_keeps_text() {
        let answers = " 20 \r\nMale\nHigh School\n 4.0\nInstagram\nYes\n7.0\n6\nIn Relationship\n2\n";
        let input = collect_from(answers).0.unwrap();

        assert_eq!(input.age, 20);
        assert_eq!(input.academic_level, "High School");
        assert_eq!(input.relationship_status, "In Relationship");
    }

    #[test]
    fn test_non_numeric_age_aborts() {
        let answers = ANSWERS.replacen("20", "twenty", 1);
        let (result, transcript) = collect_from(&answers);

        match result {
            Err(PredictionError::InputValidation { field, .. }) => assert_eq!(field, "Age"),
            other => panic!("expected InputValidation, got {:?}", other),
        }
        // No further prompts after the failing field
        assert!(!transcript.contains(FIELDS[1].prompt));
    }

    #[test]
    fn test_fractional_integer_rejected() {
        let answers = ANSWERS.replacen("\n6\n", "\n6.5\n", 1);
        match collect_from(&answers).0 {
            Err(PredictionError::InputValidation { field, .. }) => {
                assert_eq!(field, "Mental_Health_Score")
            }
            other => panic!("expected InputValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_early_eof() {
        let (result, _) = collect_from("20\nMale\n");
        match result {
            Err(PredictionError::InputClosed { field }) => assert_eq!(field, "Academic_Level"),
            other => panic!("expected InputClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_reals_accepted() {
        let answers = ANSWERS
            .replacen("\n4.0\n", "\nnan\n", 1)
            .replacen("\n7\n", "\ninf\n", 1);
        let input = collect_from(&answers).0.unwrap();

        assert!(input.avg_daily_usage_hours.is_nan());
        assert_eq!(input.sleep_hours_per_night, f64::INFINITY);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let answers = ANSWERS.replacen("\n6\n", "\n-3\n", 1);
        let input = collect_from(&answers).0.unwrap();
        assert_eq!(input.mental_health_score, -3);
    }

    #[test]
    fn test_payload_source() {
        let body = sample_body();
        let input = PayloadSource::new(body.as_bytes()).collect().unwrap();
        assert_eq!(input, sample_input());
    }

    #[test]
    fn test_payload_type_mismatch() {
        let body = sample_body().replace("\"Age\":20", "\"Age\":\"twenty\"");
        let err = PayloadSource::new(body.as_bytes()).collect().unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_payload_missing_field() {
        let err = PayloadSource::new(br#"{"Age": 20}"#).collect().unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
