//! Typed calculator configuration.
//!
//! Calculator records carry a loosely-shaped JSON `config` blob. Each kind
//! parses it into one of the structs below; absent or `null` keys fall back
//! to the built-in defaults and unrecognized keys (such as `version`) are
//! ignored. Range and consistency checks happen in the calculator
//! constructors (`EcogScale::from_config` and friends).

use palliate_core::models::calculator::CalculatorKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;
use crate::opioid::potency::DrugPotencyEntry;
use crate::scoring::ScaleLevel;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EcogConfig {
    #[serde(default)]
    pub scale: Option<Vec<ScaleLevel>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PpsConfig {
    #[serde(default)]
    pub columns: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OpioidRotationConfig {
    #[serde(default)]
    pub drugs: Option<Vec<DrugPotencyEntry>>,
    #[serde(default)]
    pub cross_tolerance: Option<CrossToleranceConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrossToleranceConfig {
    #[serde(default)]
    pub default_reduce_percent: Option<f64>,
}

/// Parse a record's `config` blob for a calculator of `kind`.
pub fn parse_config<T>(kind: CalculatorKind, config: &serde_json::Value) -> Result<T, CalculatorError>
where
    T: DeserializeOwned + Default,
{
    if config.is_null() {
        return Ok(T::default());
    }
    if !config.is_object() {
        return Err(CalculatorError::InvalidConfig {
            kind,
            reason: "config must be a JSON object".to_string(),
        });
    }
    serde_json::from_value(config.clone()).map_err(|e| CalculatorError::InvalidConfig {
        kind,
        reason: e.to_string(),
    })
}
