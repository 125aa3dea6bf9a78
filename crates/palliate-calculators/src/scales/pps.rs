use std::collections::HashSet;

use palliate_core::keys;
use palliate_core::models::calculator::CalculatorKind;

use crate::PerformanceScale;
use crate::config::PpsConfig;
use crate::error::CalculatorError;
use crate::scoring::{ScaleLevel, ScoreRange};

const RANGE: ScoreRange = ScoreRange {
    min: 0.0,
    max: 100.0,
    step: Some(10.0),
};

const DEFAULT_COLUMNS: [f64; 11] = [
    100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 0.0,
];

/// Palliative Performance Scale (PPSv2), 0–100% in steps of 10.
#[derive(Debug, Clone)]
pub struct PpsScale {
    levels: Vec<ScaleLevel>,
}

impl PpsScale {
    pub fn from_config(config: &PpsConfig) -> Result<Self, CalculatorError> {
        let Some(columns) = &config.columns else {
            return Ok(Self::default());
        };
        if columns.is_empty() {
            return Err(invalid("columns must list at least one percentage"));
        }

        let mut seen = HashSet::new();
        for &column in columns {
            if !RANGE.contains(column) {
                return Err(invalid(&format!(
                    "column {column} must be a multiple of 10 from 0 to 100"
                )));
            }
            if !seen.insert(column as u8) {
                return Err(invalid(&format!("column {column} is listed twice")));
            }
        }

        Ok(Self::with_columns(columns))
    }

    fn with_columns(columns: &[f64]) -> Self {
        let levels = columns
            .iter()
            .map(|&score| ScaleLevel {
                score,
                label: format!("{score}% ({})", ambulation(score)),
            })
            .collect();
        Self { levels }
    }
}

impl Default for PpsScale {
    fn default() -> Self {
        Self::with_columns(&DEFAULT_COLUMNS)
    }
}

impl PerformanceScale for PpsScale {
    fn id(&self) -> &str {
        keys::PPS
    }

    fn name(&self) -> &str {
        "PPS"
    }

    fn range(&self) -> ScoreRange {
        RANGE
    }

    fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    fn advise(&self, score: f64) -> &str {
        if score >= 60.0 {
            "Likely community living; consider disease management and rehab if goals align."
        } else if score >= 40.0 {
            "Consider home supports or inpatient palliative unit."
        } else {
            "Advanced phase; prioritize comfort and anticipatory medications."
        }
    }

    fn unit(&self) -> &str {
        "%"
    }
}

/// Ambulation column of PPSv2 for a level.
fn ambulation(score: f64) -> &'static str {
    match score as u8 {
        80..=100 => "Full ambulation",
        60..=79 => "Reduced ambulation",
        50..=59 => "Mainly sit/lie",
        40..=49 => "Mainly in bed",
        10..=39 => "Totally bed bound",
        _ => "Death",
    }
}

fn invalid(reason: &str) -> CalculatorError {
    CalculatorError::InvalidConfig {
        kind: CalculatorKind::Pps,
        reason: reason.to_string(),
    }
}
