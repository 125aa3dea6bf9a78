use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid calculator kind: {0}")]
    InvalidCalculatorKind(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}
