use thiserror::Error;

/// Failures outside the rule engine: assets, I/O and serialization.
///
/// Rule and template problems are never reported through this type; they end
/// up in the error table returned by the generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("asset error: {0}")]
    Asset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
