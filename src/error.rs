//! Error types shared by the learner, predictor and model store

use thiserror::Error;

/// Errors that can occur while configuring, parsing, learning or predicting
#[derive(Error, Debug)]
pub enum LeradError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid sample size: requested {requested}, only {available} available")]
    InvalidSampleSize { requested: usize, available: usize },

    #[error("Parse error in {source_name} line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Invalid model format: {0}")]
    ModelFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeradError {
    /// Whether the error stems from a missing or invalid run parameter
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LeradError::Configuration(_) | LeradError::InvalidSampleSize { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        LeradError::Configuration(message.into())
    }

    pub(crate) fn model(message: impl Into<String>) -> Self {
        LeradError::ModelFormat(message.into())
    }
}

/// Result type for lerad operations
pub type Result<T> = std::result::Result<T, LeradError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_is_configuration_error() {
        let err = LeradError::InvalidSampleSize {
            requested: 10,
            available: 4,
        };
        assert!(err.is_configuration());
        assert!(err.to_string().contains("requested 10"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = LeradError::Parse {
            source_name: "train.txt".to_string(),
            line: 3,
            message: "expected 2 fields, found 1".to_string(),
        };
        assert!(!err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Parse error in train.txt line 3: expected 2 fields, found 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LeradError = io.into();
        assert!(matches!(err, LeradError::Io(_)));
    }
}
