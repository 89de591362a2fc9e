//! Addiction level classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal addiction level derived from a predicted score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddictionCategory {
    Low,
    Moderate,
    High,
}

impl AddictionCategory {
    pub const ALL: [AddictionCategory; 3] = [
        AddictionCategory::Low,
        AddictionCategory::Moderate,
        AddictionCategory::High,
    ];

    /// Determine the category from a score and thresholds
    pub fn from_score(score: f64, thresholds: &CategoryThresholds) -> Self {
        if score <= thresholds.low {
            AddictionCategory::Low
        } else if score <= thresholds.moderate {
            AddictionCategory::Moderate
        } else {
            AddictionCategory::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddictionCategory::Low => "Low",
            AddictionCategory::Moderate => "Moderate",
            AddictionCategory::High => "High",
        }
    }
}

impl fmt::Display for AddictionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds (inclusive) of the `Low` and `Moderate` buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub low: f64,
    pub moderate: f64,
}

impl CategoryThresholds {
    pub fn categorize(&self, score: f64) -> AddictionCategory {
        AddictionCategory::from_score(score, self)
    }
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            low: 3.0,
            moderate: 6.0,
        }
    }
}

/// Categorize a score with the default thresholds.
///
/// Total over all `f64` values: NaN fails every comparison and lands in `High`.
pub fn categorize(score: f64) -> AddictionCategory {
    AddictionCategory::from_score(score, &CategoryThresholds::default())
}
