//! Error types for grid subsampling.

use std::fmt;

/// Result type for subsampling operations.
pub type Result<T> = std::result::Result<T, SubsampleError>;

/// Errors that can occur while subsampling or reading point data.
#[derive(Debug)]
pub enum SubsampleError {
    /// Invalid configuration (grid resolution < 2, etc.)
    InvalidConfig {
        param: String,
        message: String,
    },
    /// Feature buffer length does not match the label count.
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    /// Malformed CSV content.
    Csv {
        line: usize,
        message: String,
    },
    /// Underlying I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for SubsampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { param, message } => {
                write!(f, "Invalid configuration for '{}': {}", param, message)
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "Feature buffer size mismatch: expected {}, got {}", expected, actual)
            }
            Self::Csv { line, message } => {
                write!(f, "CSV parse error at line {}: {}", line, message)
            }
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for SubsampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SubsampleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
