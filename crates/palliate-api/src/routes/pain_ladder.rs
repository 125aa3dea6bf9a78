use axum::Json;
use axum::extract::Path;

use palliate_calculators::pain_ladder::{self, LadderStep};

use crate::error::ApiError;

pub async fn list_steps() -> Json<Vec<LadderStep>> {
    Json(pain_ladder::ladder().to_vec())
}

pub async fn step_for_score(Path(score): Path<u8>) -> Result<Json<LadderStep>, ApiError> {
    Ok(Json(pain_ladder::step_for_score(score)?.clone()))
}
