//! Error handling for CNN Builder
//!
//! The validation core never fails: it reports problems as data in a
//! `ValidationResult`. The errors here cover file interchange, editing by
//! index and the training boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CNN Builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;

/// Main error type for CNN Builder operations
#[derive(Error, Debug)]
pub enum BuilderError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model file: {path}: {source}")]
    InvalidModelFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Editing Errors
    #[error("Unknown layer type: {name}")]
    UnknownLayerType { name: String },

    #[error("Layer index {index} is out of range for a sequence of {len} layers")]
    LayerIndexOutOfRange { index: usize, len: usize },

    // Training Errors
    #[error("Model is not ready for training: {}", errors.join("; "))]
    NotTrainable { errors: Vec<String> },

    #[error("Training cancelled after {completed_epochs} epoch(s)")]
    TrainingCancelled { completed_epochs: u32 },

    #[error("Training failed: {reason}")]
    TrainingFailed { reason: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuilderError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            BuilderError::FileNotFound { .. } => "FILE_NOT_FOUND",
            BuilderError::FileReadError { .. } => "FILE_READ_ERROR",
            BuilderError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            BuilderError::InvalidModelFile { .. } => "INVALID_MODEL_FILE",
            BuilderError::UnknownLayerType { .. } => "UNKNOWN_LAYER_TYPE",
            BuilderError::LayerIndexOutOfRange { .. } => "LAYER_INDEX_OUT_OF_RANGE",
            BuilderError::NotTrainable { .. } => "NOT_TRAINABLE",
            BuilderError::TrainingCancelled { .. } => "TRAINING_CANCELLED",
            BuilderError::TrainingFailed { .. } => "TRAINING_FAILED",
            BuilderError::Serialization(_) => "SERIALIZATION_ERROR",
            BuilderError::Io(_) => "IO_ERROR",
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BuilderError::FileNotFound { .. }
                | BuilderError::InvalidModelFile { .. }
                | BuilderError::UnknownLayerType { .. }
                | BuilderError::LayerIndexOutOfRange { .. }
                | BuilderError::NotTrainable { .. }
                | BuilderError::TrainingCancelled { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BuilderError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Create a starter model with 'cnn-builder-cli new <path>'",
            ],
            BuilderError::InvalidModelFile { .. } => vec![
                "The file must be a JSON document with a top-level 'layers' array",
                "Each layer needs a 'type' such as Conv2D, ReLU or Dense",
            ],
            BuilderError::UnknownLayerType { .. } => vec![
                "Supported types: Conv2D, ReLU, MaxPooling2D, BatchNormalization, Dropout, Flatten, Dense, Softmax",
            ],
            BuilderError::LayerIndexOutOfRange { .. } => vec![
                "Positions are 1-based in messages and 0-based in the API",
                "List the layers with 'cnn-builder-cli shapes <path>'",
            ],
            BuilderError::NotTrainable { .. } => vec![
                "Add a Flatten layer between the convolutional and dense layers",
                "End the model with Dense(10) followed by Softmax",
            ],
            BuilderError::TrainingCancelled { .. } => vec![
                "Start training again when ready",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = BuilderError::FileNotFound {
            path: PathBuf::from("model.json"),
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_not_trainable_message_joins_errors() {
        let err = BuilderError::NotTrainable {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Model is not ready for training: first; second"
        );
        assert!(err.is_recoverable());
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_training_failed_not_recoverable() {
        let err = BuilderError::TrainingFailed {
            reason: "backend unavailable".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestions().is_empty());
    }
}
