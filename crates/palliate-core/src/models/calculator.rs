use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The kind of calculator a record describes. Determines how the record's
/// `config` blob is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum CalculatorKind {
    /// Palliative Performance Scale.
    Pps,
    /// ECOG performance status.
    Ecog,
    /// Opioid rotation via oral morphine equivalents.
    OpioidRotation,
    /// Free-form calculator with no built-in evaluation.
    Custom,
}

impl CalculatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Pps => "pps",
            CalculatorKind::Ecog => "ecog",
            CalculatorKind::OpioidRotation => "opioid-rotation",
            CalculatorKind::Custom => "custom",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pps" => Ok(CalculatorKind::Pps),
            "ecog" => Ok(CalculatorKind::Ecog),
            "opioid-rotation" => Ok(CalculatorKind::OpioidRotation),
            "custom" => Ok(CalculatorKind::Custom),
            other => Err(CoreError::InvalidCalculatorKind(other.to_string())),
        }
    }
}

/// A calculator as stored in the backend. `config` is kind-specific and is
/// validated when the record is turned into a calculator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub kind: CalculatorKind,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

impl CalculatorRecord {
    /// Parse a record from raw JSON, rejecting blank identifiers.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let record: CalculatorRecord = serde_json::from_value(value)?;
        if record.slug.trim().is_empty() {
            return Err(CoreError::MissingField("slug".to_string()));
        }
        if record.id.trim().is_empty() {
            return Err(CoreError::MissingField("id".to_string()));
        }
        Ok(record)
    }
}
