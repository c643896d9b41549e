use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Schema Error: {0}")]
    Schema(String),

    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("Alignment Error: {0}")]
    Alignment(String),
}

pub type ScoreResult<T> = Result<T, ScoringError>;
