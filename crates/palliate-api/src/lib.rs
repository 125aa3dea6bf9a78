//! palliate-api
//!
//! JSON service over the calculator catalog. Stateless apart from the
//! catalog and conversion table loaded at startup.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::Method;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/calculators", get(routes::calculators::list_calculators))
        .route("/calculators/{key}", get(routes::calculators::get_calculator))
        .route(
            "/calculators/{key}/evaluate",
            post(routes::calculators::evaluate_calculator),
        )
        .route("/opioids/conversions", get(routes::opioids::list_conversions))
        .route("/opioids/equianalgesic", post(routes::opioids::equianalgesic))
        .route("/pain-ladder", get(routes::pain_ladder::list_steps))
        .route("/pain-ladder/{score}", get(routes::pain_ladder::step_for_score))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
