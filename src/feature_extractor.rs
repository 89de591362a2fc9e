//! Feature extraction for pipeline scoring.
//!
//! Turns a `PredictionInput` into the single-row tabular form every
//! pipeline backend consumes: named columns in the fixed field order.

use crate::types::input::{FieldKind, PredictionInput, FIELDS};
use std::fmt;

/// A single typed cell of a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FeatureValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FeatureValue::Integer(_) => FieldKind::Integer,
            FeatureValue::Real(_) => FieldKind::Real,
            FeatureValue::Text(_) => FieldKind::Text,
        }
    }

    /// Numeric view of the cell; `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Real(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{}", v),
            FeatureValue::Real(v) => write!(f, "{}", v),
            FeatureValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// One record as ordered `(column, value)` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, FeatureValue)>,
}

impl FeatureRow {
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.columns.iter().map(|(name, value)| (*name, value))
    }
}

/// Feature extractor that lays records out in the column order the
/// pipeline was trained on.
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract one feature row from a record.
    pub fn extract(&self, input: &PredictionInput) -> FeatureRow {
        let columns = vec![
            (FIELDS[0].name, FeatureValue::Integer(input.age)),
            (FIELDS[1].name, FeatureValue::Text(input.gender.clone())),
            (FIELDS[2].name, FeatureValue::Text(input.academic_level.clone())),
            (FIELDS[3].name, FeatureValue::Real(input.avg_daily_usage_hours)),
            (FIELDS[4].name, FeatureValue::Text(input.most_used_platform.clone())),
            (
                FIELDS[5].name,
                FeatureValue::Text(input.affects_academic_performance.clone()),
            ),
            (FIELDS[6].name, FeatureValue::Real(input.sleep_hours_per_night)),
            (FIELDS[7].name, FeatureValue::Integer(input.mental_health_score)),
            (FIELDS[8].name, FeatureValue::Text(input.relationship_status.clone())),
            (
                FIELDS[9].name,
                FeatureValue::Integer(input.conflicts_over_social_media),
            ),
        ];

        FeatureRow { columns }
    }

    /// Extract rows for a batch, preserving order.
    pub fn extract_batch(&self, inputs: &[PredictionInput]) -> Vec<FeatureRow> {
        inputs.iter().map(|input| self.extract(input)).collect()
    }

    /// Get the number of columns produced.
    pub fn feature_count(&self) -> usize {
        FIELDS.len()
    }

    /// Get column names in order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        FIELDS.iter().map(|field| field.name).collect()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
