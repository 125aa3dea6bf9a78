//! Catalog key conventions.
//!
//! Pure string functions. These define the canonical slugs of the built-in
//! calculators and the ids they carry when no backend record exists.

pub const ECOG: &str = "ecog";

pub const PPS: &str = "pps";

pub const OPIOID_ROTATION: &str = "opioid-rotation";

/// Config version stamped on built-in records.
pub const FALLBACK_CONFIG_VERSION: &str = "fallback-1.0";

const LOCAL_ID_PREFIX: &str = "local-";

/// Id of a built-in record, e.g. `local-ecog`.
pub fn local_id(slug: &str) -> String {
    format!("{LOCAL_ID_PREFIX}{slug}")
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}
