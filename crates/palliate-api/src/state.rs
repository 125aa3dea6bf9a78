use std::sync::Arc;

use palliate_calculators::catalog::Catalog;
use palliate_calculators::opioid::equianalgesic::PairwiseTable;
use palliate_calculators::opioid::rotation::UnknownDrugPolicy;

use crate::config::LoadedCatalog;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub conversions: Arc<PairwiseTable>,
    pub unknown_drug_policy: UnknownDrugPolicy,
}

impl AppState {
    pub fn new(loaded: LoadedCatalog, unknown_drug_policy: UnknownDrugPolicy) -> Self {
        Self {
            catalog: Arc::new(loaded.catalog),
            conversions: Arc::new(loaded.conversions),
            unknown_drug_policy,
        }
    }

    /// Built-in catalog and conversion table with the lenient drug policy.
    pub fn builtin() -> Self {
        Self {
            catalog: Arc::new(Catalog::builtin()),
            conversions: Arc::new(PairwiseTable::standard()),
            unknown_drug_policy: UnknownDrugPolicy::default(),
        }
    }
}
