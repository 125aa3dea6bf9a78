//! WHO analgesic ladder.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;

pub const MAX_PAIN_SCORE: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LadderStep {
    pub step: u8,
    pub title: String,
    pub medications: Vec<String>,
    pub description: String,
}

static LADDER: LazyLock<Vec<LadderStep>> = LazyLock::new(|| {
    let step = |step: u8, title: &str, medications: &[&str], description: &str| LadderStep {
        step,
        title: title.to_string(),
        medications: medications.iter().map(|m| m.to_string()).collect(),
        description: description.to_string(),
    };

    vec![
        step(
            1,
            "Mild Pain (1-3)",
            &["Acetaminophen", "NSAIDs", "Topical analgesics"],
            "Non-opioid analgesics, adjuvant therapy",
        ),
        step(
            2,
            "Moderate Pain (4-6)",
            &["Weak opioids", "Codeine", "Tramadol", "Low-dose morphine"],
            "Step 1 + weak opioids, adjuvant therapy",
        ),
        step(
            3,
            "Severe Pain (7-10)",
            &["Strong opioids", "Morphine", "Oxycodone", "Fentanyl", "Hydromorphone"],
            "Step 1 + strong opioids, adjuvant therapy",
        ),
    ]
});

pub fn ladder() -> &'static [LadderStep] {
    &LADDER
}

/// The ladder step for a 0–10 pain score.
pub fn step_for_score(score: u8) -> Result<&'static LadderStep, CalculatorError> {
    let index = match score {
        0..=3 => 0,
        4..=6 => 1,
        7..=MAX_PAIN_SCORE => 2,
        _ => return Err(CalculatorError::InvalidPainScore(score)),
    };
    Ok(&LADDER[index])
}
