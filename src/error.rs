//! Error types for marga-plan.
//!
//! Failing to find a path is not an error; see [`crate::PlanFailure`].

use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Map parse error at line {line}: {reason}")]
    MapParse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, MargaError>;
