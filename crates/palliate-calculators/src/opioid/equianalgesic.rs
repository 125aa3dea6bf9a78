use palliate_core::models::calculator::CalculatorKind;
use palliate_core::models::route::Route;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;
use crate::opioid::dose::{DoseInput, format_fixed};
use crate::opioid::potency::same_name;

pub const CROSS_TOLERANCE_NOTE: &str =
    "Consider reducing by 25-50% for cross-tolerance and titrate to effect.";

/// A direct conversion ratio between two drug/route preparations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PairwiseConversion {
    pub from_med: String,
    pub to_med: String,
    pub route_from: Route,
    pub route_to: Route,
    /// Multiply the source daily dose by this to get the target daily dose.
    pub conversion_factor: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub evidence_level: String,
}

impl PairwiseConversion {
    fn matches(&self, request: &PairwiseRequest) -> bool {
        same_name(&self.from_med, &request.from_med)
            && same_name(&self.to_med, &request.to_med)
            && self.route_from == request.from_route
            && self.route_to == request.to_route
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PairwiseRequest {
    pub from_med: String,
    pub from_route: Route,
    pub to_med: String,
    pub to_route: Route,
    pub from_dose: DoseInput,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PairwiseResult {
    pub converted_dose: f64,
    /// Two-decimal rendering of `converted_dose`.
    pub converted_dose_display: String,
    pub conversion: PairwiseConversion,
    pub clinical_note: String,
}

/// Curated table of drug-to-drug conversion ratios.
#[derive(Debug, Clone)]
pub struct PairwiseTable {
    entries: Vec<PairwiseConversion>,
}

impl PairwiseTable {
    pub fn new(entries: Vec<PairwiseConversion>) -> Result<Self, CalculatorError> {
        for entry in &entries {
            if !entry.conversion_factor.is_finite() || entry.conversion_factor <= 0.0 {
                return Err(CalculatorError::InvalidConfig {
                    kind: CalculatorKind::OpioidRotation,
                    reason: format!(
                        "{} {} -> {} {}: conversion_factor must be a positive number",
                        entry.from_med, entry.route_from, entry.to_med, entry.route_to
                    ),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn standard() -> Self {
        let row = |from_med: &str,
                   to_med: &str,
                   route_from: Route,
                   route_to: Route,
                   conversion_factor: f64,
                   notes: &str,
                   evidence_level: &str| PairwiseConversion {
            from_med: from_med.to_string(),
            to_med: to_med.to_string(),
            route_from,
            route_to,
            conversion_factor,
            notes: Some(notes.to_string()),
            evidence_level: evidence_level.to_string(),
        };

        use Route::{Intravenous as Iv, Oral as Po, Transdermal as Td};
        Self {
            entries: vec![
                row("Morphine", "Oxycodone", Po, Po, 0.67, "1.5:1 ratio morphine to oxycodone", "Category 1"),
                row("Morphine", "Hydromorphone", Po, Po, 0.2, "5:1 ratio morphine to hydromorphone", "Category 1"),
                row("Morphine", "Fentanyl", Po, Td, 0.01, "100:1 ratio, use 50% dose reduction for cross-tolerance", "Category 1"),
                row("Oxycodone", "Morphine", Po, Po, 1.5, "1:1.5 ratio oxycodone to morphine", "Category 1"),
                row("Hydromorphone", "Morphine", Po, Po, 5.0, "1:5 ratio hydromorphone to morphine", "Category 1"),
                row("Morphine", "Morphine", Po, Iv, 0.33, "3:1 ratio PO to IV morphine", "Category 1"),
                row("Morphine", "Morphine", Iv, Po, 3.0, "1:3 ratio IV to PO morphine", "Category 1"),
                row("Fentanyl", "Morphine", Td, Po, 100.0, "1:100 ratio fentanyl patch to morphine PO", "Category 1"),
                row("Tramadol", "Morphine", Po, Po, 0.1, "10:1 ratio tramadol to morphine, ceiling effect at 400mg/day", "Category 2A"),
                row("Codeine", "Morphine", Po, Po, 0.15, "6.7:1 ratio codeine to morphine, consider CYP2D6 status", "Category 2A"),
            ],
        }
    }

    pub fn entries(&self) -> &[PairwiseConversion] {
        &self.entries
    }

    pub fn find(&self, request: &PairwiseRequest) -> Option<&PairwiseConversion> {
        self.entries.iter().find(|c| c.matches(request))
    }
}

impl Default for PairwiseTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Convert a dose with a direct table ratio. There is no fallback: a
/// drug/route combination missing from the table is an error, as is a dose
/// that does not read as a non-negative number.
pub fn convert_pairwise(
    table: &PairwiseTable,
    request: &PairwiseRequest,
) -> Result<PairwiseResult, CalculatorError> {
    let conversion = table
        .find(request)
        .ok_or_else(|| CalculatorError::ConversionNotFound {
            from_med: request.from_med.clone(),
            route_from: request.from_route,
            to_med: request.to_med.clone(),
            route_to: request.to_route,
        })?;

    let dose = match request.from_dose.parse() {
        Some(dose) if dose.is_finite() && dose >= 0.0 => dose,
        _ => return Err(CalculatorError::InvalidDose(dose_text(&request.from_dose))),
    };

    let converted_dose = dose * conversion.conversion_factor;
    Ok(PairwiseResult {
        converted_dose,
        converted_dose_display: format_fixed(converted_dose, 2),
        conversion: conversion.clone(),
        clinical_note: CROSS_TOLERANCE_NOTE.to_string(),
    })
}

fn dose_text(input: &DoseInput) -> String {
    match input {
        DoseInput::Amount(value) => value.to_string(),
        DoseInput::Text(text) => text.clone(),
        DoseInput::Other(value) => value.to_string(),
    }
}
