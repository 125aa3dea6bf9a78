use palliate_core::models::calculator::CalculatorKind;
use palliate_core::models::route::Route;
use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("invalid {kind} config: {reason}")]
    InvalidConfig { kind: CalculatorKind, reason: String },

    #[error("calculator '{slug}': {source}")]
    InvalidRecord {
        slug: String,
        #[source]
        source: Box<CalculatorError>,
    },

    #[error("duplicate calculator slug: {0}")]
    DuplicateSlug(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown opioid: {name}")]
    UnknownDrug { name: String },

    #[error("invalid dose: {0:?}")]
    InvalidDose(String),

    #[error("no conversion available from {from_med} {route_from} to {to_med} {route_to}")]
    ConversionNotFound {
        from_med: String,
        route_from: Route,
        to_med: String,
        route_to: Route,
    },

    #[error("pain score {0} is outside 0-10")]
    InvalidPainScore(u8),

    #[error("input does not match a {expected} calculator")]
    InputMismatch { expected: CalculatorKind },

    #[error("{0} calculators cannot be evaluated")]
    NotImplemented(CalculatorKind),
}
