use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Title not found: {0}")]
    UnknownTitle(String),

    #[error("No ratings entry for title: {0}")]
    EnrichmentMiss(String),

    #[error("Please enter your comment before submitting.")]
    EmptyFeedback,

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
