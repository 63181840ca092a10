#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid threshold {0:?}: expected a number")]
    InvalidThreshold(String),
    #[error("threshold must be a finite, non-negative number, got {0}")]
    ThresholdOutOfRange(f64),
    #[error("failed to serialize report")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
