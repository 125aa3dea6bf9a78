use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use palliate_calculators::catalog::Catalog;
use palliate_calculators::opioid::equianalgesic::{PairwiseConversion, PairwiseTable};
use palliate_calculators::opioid::rotation::UnknownDrugPolicy;
use palliate_core::models::calculator::CalculatorRecord;

/// Current catalog file version. Bump this when changing the file shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub const BIND_VAR: &str = "PALLIATE_BIND";
pub const CATALOG_VAR: &str = "PALLIATE_CATALOG";
pub const STRICT_DRUGS_VAR: &str = "PALLIATE_STRICT_DRUGS";

/// Service settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    /// Explicit catalog file. `None` means the per-user default location.
    pub catalog_path: Option<PathBuf>,
    pub unknown_drug_policy: UnknownDrugPolicy,
}

impl Settings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_raw = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("{BIND_VAR}={bind_raw:?} is not a socket address: {e}"))?;

        let catalog_path = lookup(CATALOG_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let unknown_drug_policy = match lookup(STRICT_DRUGS_VAR) {
            None => UnknownDrugPolicy::AssumeReference,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => UnknownDrugPolicy::AssumeReference,
                "1" | "true" | "yes" => UnknownDrugPolicy::Reject,
                _ => {
                    return Err(eyre::eyre!(
                        "{STRICT_DRUGS_VAR}={raw:?} must be one of 1/0, true/false, yes/no"
                    ));
                }
            },
        };

        Ok(Self {
            bind,
            catalog_path,
            unknown_drug_policy,
        })
    }

    /// The catalog file to read: the explicit path, or the default one.
    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.clone().or_else(default_catalog_path)
    }
}

fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("com.palliate.service").join("catalog.json"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

/// A validated catalog plus the conversion table that accompanies it.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub conversions: PairwiseTable,
    pub source: CatalogSource,
}

impl LoadedCatalog {
    pub fn builtin() -> Self {
        Self {
            catalog: Catalog::builtin(),
            conversions: PairwiseTable::standard(),
            source: CatalogSource::Builtin,
        }
    }
}

/// Load the catalog named by `settings`, falling back to the built-in set
/// when there is no file. A file that exists but does not validate is an
/// error.
pub fn resolve_catalog(settings: &Settings) -> eyre::Result<LoadedCatalog> {
    let Some(path) = settings.resolved_catalog_path() else {
        tracing::info!("no config directory, serving built-in catalog");
        return Ok(LoadedCatalog::builtin());
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "no catalog file, serving built-in catalog");
        return Ok(LoadedCatalog::builtin());
    }
    load_catalog(&path)
}

pub fn load_catalog(path: &Path) -> eyre::Result<LoadedCatalog> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read catalog at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before validating.
    let json: serde_json::Value = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("catalog at {} is not valid JSON", path.display()))?;
    let on_disk_version = if json.is_array() {
        0
    } else {
        match json.get("config_version").and_then(|v| v.as_u64()) {
            None => 0,
            Some(raw) => u32::try_from(raw).map_err(|_| {
                eyre::eyre!("{}: config_version {raw} is out of range", path.display())
            })?,
        }
    };

    let mut migrated = migrate(json, on_disk_version)?;

    let records = match migrated.get_mut("calculators").map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                CalculatorRecord::from_json(item)
                    .wrap_err_with(|| format!("calculator #{} in {}", i + 1, path.display()))
            })
            .collect::<eyre::Result<Vec<_>>>()?,
        Some(_) => return Err(eyre::eyre!("{}: calculators must be an array", path.display())),
    };

    let conversions = match migrated.get_mut("conversions").map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => PairwiseTable::standard(),
        Some(value) => {
            let entries: Vec<PairwiseConversion> = serde_json::from_value(value)
                .wrap_err_with(|| format!("conversions in {}", path.display()))?;
            PairwiseTable::new(entries)
                .wrap_err_with(|| format!("conversions in {}", path.display()))?
        }
    };

    let catalog = if records.is_empty() {
        tracing::info!(path = %path.display(), "catalog file lists no calculators, serving built-in set");
        Catalog::builtin()
    } else {
        Catalog::from_records(records).wrap_err_with(|| format!("catalog at {}", path.display()))?
    };

    tracing::info!(
        path = %path.display(),
        calculators = catalog.len(),
        conversions = conversions.entries().len(),
        "catalog loaded"
    );

    Ok(LoadedCatalog {
        catalog,
        conversions,
        source: CatalogSource::File(path.to_path_buf()),
    })
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "catalog config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: a bare array of records becomes `{ config_version, calculators }`
    if from_version < 1 {
        if json.is_array() {
            json = serde_json::json!({ "calculators": json });
        }
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("catalog is neither an array nor a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated catalog v0 → v1");
    }

    Ok(json)
}
