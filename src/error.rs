//! Error types for the deck generator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckGenError {
    #[error("Invalid pool format: {0}")]
    InvalidPoolFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown card pack: {0}")]
    UnknownPack(String),

    #[error("Unknown leader: {0}")]
    UnknownLeader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeckGenError>;
