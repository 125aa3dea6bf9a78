use axum::Json;
use axum::extract::{Path, Query, State};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use palliate_calculators::calculator::{CalculatorInput, CalculatorOutput, CalculatorSchema};
use palliate_calculators::catalog::CatalogEntry;
use palliate_core::keys;
use palliate_core::models::calculator::CalculatorKind;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    kind: Option<String>,
}

#[derive(Serialize)]
pub struct CalculatorSummary {
    id: String,
    slug: String,
    title: String,
    kind: CalculatorKind,
    builtin: bool,
}

#[derive(Serialize)]
pub struct CalculatorDetail {
    #[serde(flatten)]
    summary: CalculatorSummary,
    created_at: Option<Timestamp>,
    schema: CalculatorSchema,
}

impl From<&CatalogEntry> for CalculatorSummary {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.record.id.clone(),
            slug: entry.record.slug.clone(),
            title: entry.record.title.clone(),
            kind: entry.record.kind,
            builtin: keys::is_local_id(&entry.record.id),
        }
    }
}

pub async fn list_calculators(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CalculatorSummary>>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<CalculatorKind>)
        .transpose()?;

    let calculators = state
        .catalog
        .list()
        .into_iter()
        .filter(|entry| kind.is_none_or(|k| entry.record.kind == k))
        .map(CalculatorSummary::from)
        .collect();
    Ok(Json(calculators))
}

pub async fn get_calculator(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CalculatorDetail>, ApiError> {
    let entry = state.catalog.get(&key)?;

    Ok(Json(CalculatorDetail {
        summary: CalculatorSummary::from(entry),
        created_at: entry.record.created_at,
        schema: entry.calculator.schema(),
    }))
}

pub async fn evaluate_calculator(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CalculatorOutput>, ApiError> {
    let entry = state.catalog.get(&key)?;
    let input: CalculatorInput = serde_json::from_value(body)?;

    let output = entry
        .calculator
        .evaluate(&input, state.unknown_drug_policy)?;
    Ok(Json(output))
}
