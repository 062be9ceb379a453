//! Error types for chess-engine-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed position: {0}")]
    MalformedPosition(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Session is not active")]
    SessionNotActive,

    #[error("Invalid notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
