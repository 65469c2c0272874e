// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("Invalid duration: {0} (must be non-negative)")]
    InvalidDuration(f64),
    #[error("Trip '{0}' not found")]
    TripNotFound(String),
    #[error("Incorrect PIN")]
    IncorrectPin,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
