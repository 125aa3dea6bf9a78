use axum::Json;
use axum::extract::State;

use palliate_calculators::opioid::equianalgesic::{
    PairwiseConversion, PairwiseRequest, PairwiseResult, convert_pairwise,
};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_conversions(State(state): State<AppState>) -> Json<Vec<PairwiseConversion>> {
    Json(state.conversions.entries().to_vec())
}

pub async fn equianalgesic(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<PairwiseResult>, ApiError> {
    let request: PairwiseRequest = serde_json::from_value(body)?;
    let result = convert_pairwise(&state.conversions, &request)?;
    Ok(Json(result))
}
