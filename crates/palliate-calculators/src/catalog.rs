use std::collections::HashSet;

use palliate_core::keys;
use palliate_core::models::calculator::{CalculatorKind, CalculatorRecord};

use crate::calculator::Calculator;
use crate::error::CalculatorError;
use crate::opioid::rotation::OpioidRotation;
use crate::scales::ecog::EcogScale;
use crate::scales::pps::PpsScale;

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub record: CalculatorRecord,
    pub calculator: Calculator,
}

/// The set of calculators on offer, each validated against its record.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Built-in calculators, served when no backend records are available.
    pub fn builtin() -> Self {
        let calculators = [
            Calculator::Ecog(EcogScale::default()),
            Calculator::Pps(PpsScale::default()),
            Calculator::OpioidRotation(OpioidRotation::default()),
        ];
        let entries = builtin_records()
            .into_iter()
            .zip(calculators)
            .map(|(record, calculator)| CatalogEntry { record, calculator })
            .collect();
        Self { entries }
    }

    /// Validate every record. Fails on the first invalid config or repeated
    /// slug, naming the offending record.
    pub fn from_records(records: Vec<CalculatorRecord>) -> Result<Self, CalculatorError> {
        let mut slugs = HashSet::new();
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            if !slugs.insert(record.slug.clone()) {
                return Err(CalculatorError::DuplicateSlug(record.slug));
            }
            let calculator =
                Calculator::from_record(&record).map_err(|e| CalculatorError::InvalidRecord {
                    slug: record.slug.clone(),
                    source: Box::new(e),
                })?;
            entries.push(CatalogEntry { record, calculator });
        }
        Ok(Self { entries })
    }

    /// Resolve a key by slug first, then by id.
    pub fn find(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.record.slug == key)
            .or_else(|| self.entries.iter().find(|e| e.record.id == key))
    }

    /// Like [`Catalog::find`], but a missing key is an error.
    pub fn get(&self, key: &str) -> Result<&CatalogEntry, CalculatorError> {
        self.find(key)
            .ok_or_else(|| CalculatorError::UnknownCalculator(key.to_string()))
    }

    /// Entries ordered by title.
    pub fn list(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.record.title.cmp(&b.record.title));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Records describing the built-in calculators.
pub fn builtin_records() -> Vec<CalculatorRecord> {
    [
        (keys::ECOG, "ECOG Performance Status", CalculatorKind::Ecog),
        (keys::PPS, "Palliative Performance Scale", CalculatorKind::Pps),
        (
            keys::OPIOID_ROTATION,
            "Opioid Rotation",
            CalculatorKind::OpioidRotation,
        ),
    ]
    .into_iter()
    .map(|(slug, title, kind)| CalculatorRecord {
        id: keys::local_id(slug),
        slug: slug.to_string(),
        title: title.to_string(),
        kind,
        config: serde_json::json!({ "version": keys::FALLBACK_CONFIG_VERSION }),
        created_at: None,
    })
    .collect()
}
