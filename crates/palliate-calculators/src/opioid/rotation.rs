use palliate_core::models::calculator::CalculatorKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::OpioidRotationConfig;
use crate::error::CalculatorError;
use crate::opioid::dose::{DoseInput, format_fixed, sanitize_dose};
use crate::opioid::potency::{FactorLookup, PotencyTable};

/// Cross-tolerance reduction applied when configuration gives none.
pub const DEFAULT_REDUCTION_PERCENT: f64 = 33.0;

pub const DISCLAIMER: &str =
    "This is a guide only. Use clinical judgment and titrate to effect.";

/// What to do when a drug name is missing from the potency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UnknownDrugPolicy {
    /// Treat the drug as equipotent to oral morphine and flag it.
    #[default]
    AssumeReference,
    /// Fail the conversion.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversionRequest {
    pub from_drug: String,
    pub to_drug: String,
    pub current_daily_dose: f64,
    #[serde(default = "default_reduction")]
    pub cross_tolerance_reduction_percent: f64,
}

impl ConversionRequest {
    pub fn new(from_drug: &str, to_drug: &str, current_daily_dose: f64) -> Self {
        Self {
            from_drug: from_drug.to_string(),
            to_drug: to_drug.to_string(),
            current_daily_dose,
            cross_tolerance_reduction_percent: DEFAULT_REDUCTION_PERCENT,
        }
    }

    pub fn with_reduction(mut self, percent: f64) -> Self {
        self.cross_tolerance_reduction_percent = percent;
        self
    }
}

fn default_reduction() -> f64 {
    DEFAULT_REDUCTION_PERCENT
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversionResult {
    /// Oral morphine equivalent per day.
    pub ome_per_day: f64,
    /// Suggested daily dose of the target drug after reduction.
    pub suggested_new_dose: f64,
    /// Reduction actually applied, after clamping to 0–100.
    pub reduction_percent: f64,
    pub from_factor: f64,
    pub to_factor: f64,
    pub from_recognized: bool,
    pub to_recognized: bool,
}

impl ConversionResult {
    /// True if either side fell back to the reference potency.
    pub fn used_fallback(&self) -> bool {
        !(self.from_recognized && self.to_recognized)
    }

    /// One-decimal rendering for display.
    pub fn display(&self) -> ConversionDisplay {
        ConversionDisplay {
            ome_per_day: format_fixed(self.ome_per_day, 1),
            suggested_new_dose: format_fixed(self.suggested_new_dose, 1),
            reduction_percent: format!("{}", self.reduction_percent),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversionDisplay {
    pub ome_per_day: String,
    pub suggested_new_dose: String,
    pub reduction_percent: String,
    pub disclaimer: String,
}

/// Convert a daily dose between opioids. Unknown drugs are treated as oral
/// morphine; the result records which sides were recognized.
pub fn convert(table: &PotencyTable, request: &ConversionRequest) -> ConversionResult {
    let from = table.factor_or_reference(&request.from_drug);
    let to = table.factor_or_reference(&request.to_drug);
    compute(request, from, to)
}

/// Like [`convert`], but under `Reject` an unknown drug is an error.
pub fn convert_with_policy(
    table: &PotencyTable,
    request: &ConversionRequest,
    policy: UnknownDrugPolicy,
) -> Result<ConversionResult, CalculatorError> {
    if policy == UnknownDrugPolicy::Reject {
        for name in [&request.from_drug, &request.to_drug] {
            if table.get(name).is_none() {
                return Err(CalculatorError::UnknownDrug { name: name.clone() });
            }
        }
    }
    Ok(convert(table, request))
}

fn compute(request: &ConversionRequest, from: FactorLookup, to: FactorLookup) -> ConversionResult {
    let dose = sanitize_dose(request.current_daily_dose);
    let reduction = clamp_reduction(request.cross_tolerance_reduction_percent);

    let ome_per_day = dose * from.factor;
    let suggested_new_dose = (ome_per_day / to.factor) * ((100.0 - reduction) / 100.0);

    tracing::debug!(
        from = %request.from_drug,
        to = %request.to_drug,
        dose,
        reduction,
        ome_per_day,
        suggested_new_dose,
        "opioid rotation"
    );

    ConversionResult {
        ome_per_day,
        suggested_new_dose,
        reduction_percent: reduction,
        from_factor: from.factor,
        to_factor: to.factor,
        from_recognized: from.recognized,
        to_recognized: to.recognized,
    }
}

fn clamp_reduction(percent: f64) -> f64 {
    if percent.is_nan() {
        DEFAULT_REDUCTION_PERCENT
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Request body for an opioid-rotation calculator. Either drug may be left
/// out, in which case the first drug of the table is used. A missing dose
/// reads as 0.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RotationInput {
    #[serde(default)]
    pub from_drug: Option<String>,
    #[serde(default)]
    pub to_drug: Option<String>,
    #[serde(default)]
    pub daily_dose: DoseInput,
    #[serde(default)]
    pub reduction_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RotationOutcome {
    pub request: ConversionRequest,
    pub result: ConversionResult,
    pub display: ConversionDisplay,
}

/// Opioid-rotation calculator: a potency table plus its configured
/// cross-tolerance reduction.
#[derive(Debug, Clone)]
pub struct OpioidRotation {
    table: PotencyTable,
    default_reduction_percent: f64,
}

impl OpioidRotation {
    pub fn from_config(config: &OpioidRotationConfig) -> Result<Self, CalculatorError> {
        let table = match &config.drugs {
            Some(drugs) => PotencyTable::new(drugs.clone())?,
            None => PotencyTable::standard(),
        };

        let reduction = config
            .cross_tolerance
            .as_ref()
            .and_then(|ct| ct.default_reduce_percent)
            .unwrap_or(DEFAULT_REDUCTION_PERCENT);
        if !reduction.is_finite() || !(0.0..=100.0).contains(&reduction) {
            return Err(CalculatorError::InvalidConfig {
                kind: CalculatorKind::OpioidRotation,
                reason: format!("default_reduce_percent must be within 0-100, got {reduction}"),
            });
        }

        Ok(Self {
            table,
            default_reduction_percent: reduction,
        })
    }

    pub fn table(&self) -> &PotencyTable {
        &self.table
    }

    pub fn default_reduction_percent(&self) -> f64 {
        self.default_reduction_percent
    }

    /// Name preselected for both drugs.
    pub fn default_selection(&self) -> Option<&str> {
        self.table.first().map(|e| e.name.as_str())
    }

    pub fn evaluate(
        &self,
        input: &RotationInput,
        policy: UnknownDrugPolicy,
    ) -> Result<RotationOutcome, CalculatorError> {
        let fallback = self.default_selection().unwrap_or_default();
        let from = input.from_drug.as_deref().unwrap_or(fallback);
        let to = input.to_drug.as_deref().unwrap_or(fallback);

        let request = ConversionRequest::new(from, to, input.daily_dose.daily_dose())
            .with_reduction(
                input
                    .reduction_percent
                    .unwrap_or(self.default_reduction_percent),
            );
        let result = convert_with_policy(&self.table, &request, policy)?;
        let display = result.display();

        Ok(RotationOutcome {
            request,
            result,
            display,
        })
    }
}

impl Default for OpioidRotation {
    fn default() -> Self {
        Self {
            table: PotencyTable::standard(),
            default_reduction_percent: DEFAULT_REDUCTION_PERCENT,
        }
    }
}
