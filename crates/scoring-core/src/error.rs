use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Missing statement data: {0}")]
    MissingData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
