//! Error types for the environment crate.

use std::fmt;

/// Result type for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;

/// Errors that can occur when constructing or driving an environment.
#[derive(Debug, Clone)]
pub enum EnvError {
    /// Invalid configuration (zero step limit, negative ranges, etc.)
    InvalidConfig {
        param: String,
        message: String,
    },
    /// Action slice has the wrong number of dimensions.
    ActionDimensionMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { param, message } => {
                write!(f, "Invalid configuration for '{}': {}", param, message)
            }
            Self::ActionDimensionMismatch { expected, actual } => {
                write!(f, "Action dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for EnvError {}
