//! Error types for the laminate solver

use thiserror::Error;

/// Main error type for laminate operations
#[derive(Error, Debug)]
pub enum LaminateError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Singular stiffness matrix - laminate may be fully degraded or ill-formed")]
    SingularStiffness,

    #[error("Material '{0}' not found in library")]
    MaterialNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;
