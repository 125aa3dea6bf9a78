use std::collections::HashSet;

use palliate_core::keys;
use palliate_core::models::calculator::CalculatorKind;

use crate::PerformanceScale;
use crate::config::EcogConfig;
use crate::error::CalculatorError;
use crate::scoring::{ScaleLevel, ScoreRange};

const RANGE: ScoreRange = ScoreRange {
    min: 0.0,
    max: 5.0,
    step: Some(1.0),
};

/// ECOG performance status, 0 (fully active) to 5 (dead).
#[derive(Debug, Clone)]
pub struct EcogScale {
    levels: Vec<ScaleLevel>,
}

impl EcogScale {
    /// Build the scale from a record config. A missing `scale` keeps the
    /// standard labels; a supplied one replaces them wholesale.
    pub fn from_config(config: &EcogConfig) -> Result<Self, CalculatorError> {
        let Some(scale) = &config.scale else {
            return Ok(Self::default());
        };
        if scale.is_empty() {
            return Err(invalid("scale must list at least one level"));
        }

        let mut seen = HashSet::new();
        for level in scale {
            if !RANGE.contains(level.score) {
                return Err(invalid(&format!(
                    "score {} must be a whole number from 0 to 5",
                    level.score
                )));
            }
            if !seen.insert(level.score as u8) {
                return Err(invalid(&format!("score {} is listed twice", level.score)));
            }
            if level.label.trim().is_empty() {
                return Err(invalid(&format!("score {} has an empty label", level.score)));
            }
        }

        Ok(Self {
            levels: scale.clone(),
        })
    }
}

impl Default for EcogScale {
    fn default() -> Self {
        let levels = [
            (0.0, "Fully active; no restrictions"),
            (
                1.0,
                "Restricted in strenuous activity; ambulatory and able to do light work",
            ),
            (2.0, "Ambulatory; self-care; up >50% of day; unable to work"),
            (3.0, "Limited self care; bed/chair >50% of waking hours"),
            (4.0, "Completely disabled; totally confined"),
            (5.0, "Dead"),
        ]
        .iter()
        .map(|(score, label)| ScaleLevel {
            score: *score,
            label: label.to_string(),
        })
        .collect();
        Self { levels }
    }
}

impl PerformanceScale for EcogScale {
    fn id(&self) -> &str {
        keys::ECOG
    }

    fn name(&self) -> &str {
        "ECOG"
    }

    fn range(&self) -> ScoreRange {
        RANGE
    }

    fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    fn advise(&self, score: f64) -> &str {
        if score <= 1.0 {
            "Good performance; consider disease-directed options if goals align."
        } else if score == 2.0 {
            "Intermediate; prioritize symptom control ± selective disease options."
        } else {
            "Poor performance; prioritize comfort and palliative measures."
        }
    }
}

fn invalid(reason: &str) -> CalculatorError {
    CalculatorError::InvalidConfig {
        kind: CalculatorKind::Ecog,
        reason: reason.to_string(),
    }
}
