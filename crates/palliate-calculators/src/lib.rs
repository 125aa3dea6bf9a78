//! palliate-calculators
//!
//! Bedside calculators for palliative care. Pure computation, no I/O.
//! Covers opioid rotation via oral morphine equivalents, the pairwise
//! equianalgesic table, ECOG and PPS performance-status scales, and the WHO
//! analgesic ladder, plus the typed configuration each calculator accepts.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod opioid;
pub mod pain_ladder;
pub mod scales;
pub mod scoring;

use scoring::{ScaleLevel, ScoreRange, ScoreSelection, ValidationError};

/// Trait implemented by each ordinal performance-status scale.
pub trait PerformanceScale: Send + Sync {
    /// Unique identifier for this scale (e.g., "ecog", "pps").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ECOG", "PPS").
    fn name(&self) -> &str;

    /// Bounds every selectable score must fall within.
    fn range(&self) -> ScoreRange;

    /// The levels offered for selection, in display order.
    fn levels(&self) -> &[ScaleLevel];

    /// Advisory text for a score. Thresholds are fixed per scale.
    fn advise(&self, score: f64) -> &str;

    /// Suffix printed after a score in summaries.
    fn unit(&self) -> &str {
        ""
    }

    /// Find the offered level matching `score`, if it is in range.
    fn level(&self, score: f64) -> Option<&ScaleLevel> {
        if !self.range().contains(score) {
            return None;
        }
        self.levels()
            .iter()
            .find(|level| (level.score - score).abs() < 1e-9)
    }

    /// Select a score, producing its label, advice, and summary line.
    fn select(&self, score: f64) -> Result<ScoreSelection, ValidationError> {
        let range = self.range();
        let Some(level) = self.level(score) else {
            return Err(ValidationError {
                scale_id: self.id().to_string(),
                value: score,
                expected_range: range,
                message: format!(
                    "{}: score {} is not a selectable level in [{}, {}]",
                    self.name(),
                    score,
                    range.min,
                    range.max,
                ),
            });
        };

        let advice = self.advise(score).to_string();
        Ok(ScoreSelection {
            scale_id: self.id().to_string(),
            score: level.score,
            label: level.label.clone(),
            summary: format!(
                "Selected: {} {}{}. {}",
                self.name(),
                level.score,
                self.unit(),
                advice
            ),
            advice,
        })
    }
}
