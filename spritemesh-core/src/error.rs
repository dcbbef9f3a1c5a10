//! Error types for spritemesh

use thiserror::Error;

/// Main error type for spritemesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for spritemesh operations
pub type Result<T> = std::result::Result<T, Error>;
