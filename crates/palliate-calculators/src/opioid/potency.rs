use std::collections::BTreeSet;

use palliate_core::models::calculator::CalculatorKind;
use palliate_core::models::route::Route;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;

/// Potency of the reference opioid, oral morphine.
pub const REFERENCE_FACTOR: f64 = 1.0;

/// One row of the potency table: a drug/route preparation and the factor
/// converting its daily dose into oral morphine equivalents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DrugPotencyEntry {
    pub name: String,
    pub routes: BTreeSet<Route>,
    pub ome_factor: f64,
}

impl DrugPotencyEntry {
    fn new(name: &str, routes: &[Route], ome_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            routes: routes.iter().copied().collect(),
            ome_factor,
        }
    }
}

/// The factor a name resolved to, and whether the table knew the name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorLookup {
    pub factor: f64,
    pub recognized: bool,
}

/// Immutable table of opioid potencies relative to oral morphine.
#[derive(Debug, Clone)]
pub struct PotencyTable {
    entries: Vec<DrugPotencyEntry>,
}

impl PotencyTable {
    /// Validate and wrap a set of entries. Every factor must be finite and
    /// positive and names must be unique ignoring case.
    pub fn new(entries: Vec<DrugPotencyEntry>) -> Result<Self, CalculatorError> {
        if entries.is_empty() {
            return Err(invalid("drug table must list at least one opioid"));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(invalid(&format!("drug #{} has an empty name", i + 1)));
            }
            if !entry.ome_factor.is_finite() || entry.ome_factor <= 0.0 {
                return Err(invalid(&format!(
                    "{}: ome_factor must be a positive number, got {}",
                    entry.name, entry.ome_factor
                )));
            }
            if entry.routes.is_empty() {
                return Err(invalid(&format!("{}: at least one route is required", entry.name)));
            }
            if entries[..i].iter().any(|prior| same_name(&prior.name, &entry.name)) {
                return Err(invalid(&format!("{} is listed twice", entry.name)));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in table used when a calculator config supplies none.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                DrugPotencyEntry::new("Morphine oral", &[Route::Oral], 1.0),
                DrugPotencyEntry::new(
                    "Morphine IV/SC",
                    &[Route::Intravenous, Route::Subcutaneous],
                    3.0,
                ),
                DrugPotencyEntry::new("Oxycodone oral", &[Route::Oral], 1.5),
                DrugPotencyEntry::new("Hydromorphone oral", &[Route::Oral], 4.0),
                DrugPotencyEntry::new(
                    "Hydromorphone IV/SC",
                    &[Route::Intravenous, Route::Subcutaneous],
                    20.0,
                ),
            ],
        }
    }

    pub fn entries(&self) -> &[DrugPotencyEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&DrugPotencyEntry> {
        self.entries.iter().find(|e| same_name(&e.name, name))
    }

    /// The entry selected on both sides before the user picks anything.
    pub fn first(&self) -> Option<&DrugPotencyEntry> {
        self.entries.first()
    }

    /// Resolve a name to its factor. Unknown names resolve to
    /// [`REFERENCE_FACTOR`] and are reported as unrecognized.
    pub fn factor_or_reference(&self, name: &str) -> FactorLookup {
        match self.get(name) {
            Some(entry) => FactorLookup {
                factor: entry.ome_factor,
                recognized: true,
            },
            None => {
                tracing::warn!(drug = %name, "unknown opioid, assuming oral morphine potency");
                FactorLookup {
                    factor: REFERENCE_FACTOR,
                    recognized: false,
                }
            }
        }
    }
}

impl Default for PotencyTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Drug names compare trimmed and ASCII case-insensitive.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn invalid(reason: &str) -> CalculatorError {
    CalculatorError::InvalidConfig {
        kind: CalculatorKind::OpioidRotation,
        reason: reason.to_string(),
    }
}
