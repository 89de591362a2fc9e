//! Prediction input record and its field table

use serde::{Deserialize, Serialize};

/// Primitive kind of an input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
    Text,
}

/// Static description of one input field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Column name, also the JSON key
    pub name: &'static str,
    pub kind: FieldKind,
    /// Prompt shown by the interactive collector
    pub prompt: &'static str,
}

/// All ten fields, in prompt and column order.
pub const FIELDS: [FieldSpec; 10] = [
    FieldSpec {
        name: "Age",
        kind: FieldKind::Integer,
        prompt: "Enter Age (e.g., 20): ",
    },
    FieldSpec {
        name: "Gender",
        kind: FieldKind::Text,
        prompt: "Enter Gender (e.g., Male, Female): ",
    },
    FieldSpec {
        name: "Academic_Level",
        kind: FieldKind::Text,
        prompt: "Enter Academic Level (e.g., Undergraduate, High School, Postgraduate): ",
    },
    FieldSpec {
        name: "Avg_Daily_Usage_Hours",
        kind: FieldKind::Real,
        prompt: "Enter Avg. Daily Usage Hours (e.g., 5.5): ",
    },
    FieldSpec {
        name: "Most_Used_Platform",
        kind: FieldKind::Text,
        prompt: "Enter Most Used Platform (e.g., Instagram, Facebook, TikTok): ",
    },
    FieldSpec {
        name: "Affects_Academic_Performance",
        kind: FieldKind::Text,
        prompt: "Does social media affect academic performance? (Yes/No): ",
    },
    FieldSpec {
        name: "Sleep_Hours_Per_Night",
        kind: FieldKind::Real,
        prompt: "Enter Sleep Hours Per Night (e.g., 6.0): ",
    },
    FieldSpec {
        name: "Mental_Health_Score",
        kind: FieldKind::Integer,
        prompt: "Enter Mental Health Score (0-10, e.g., 5): ",
    },
    FieldSpec {
        name: "Relationship_Status",
        kind: FieldKind::Text,
        prompt: "Enter Relationship Status (e.g., In Relationship, Single, Complicated): ",
    },
    FieldSpec {
        name: "Conflicts_Over_Social_Media",
        kind: FieldKind::Integer,
        prompt: "Enter Conflicts Over Social Media (0-10, e.g., 2): ",
    },
];

/// One survey record to be scored.
///
/// Only presence and primitive type are enforced. The documented ranges
/// (`Age > 0`, scores in 0-10) are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(rename = "Age")]
    pub age: i64,

    #[serde(rename = "Gender")]
    pub gender: String,

    #[serde(rename = "Academic_Level")]
    pub academic_level: String,

    #[serde(rename = "Avg_Daily_Usage_Hours")]
    pub avg_daily_usage_hours: f64,

    #[serde(rename = "Most_Used_Platform")]
    pub most_used_platform: String,

    #[serde(rename = "Affects_Academic_Performance")]
    pub affects_academic_performance: String,

    #[serde(rename = "Sleep_Hours_Per_Night")]
    pub sleep_hours_per_night: f64,

    /// Intended range 0-10
    #[serde(rename = "Mental_Health_Score")]
    pub mental_health_score: i64,

    #[serde(rename = "Relationship_Status")]
    pub relationship_status: String,

    /// Intended range 0-10
    #[serde(rename = "Conflicts_Over_Social_Media")]
    pub conflicts_over_social_media: i64,
}
