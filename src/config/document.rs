//! Model document schema
//!
//! The JSON interchange format for an architecture plus its training
//! settings. Blocks the validator has no use for (`weights`,
//! `trainingHistory` and any unknown keys) are carried through untouched.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use super::TrainingSettings;
use crate::error::{BuilderError, Result};
use crate::layers::LayerSequence;

/// Export type written for documents without weights
pub const ARCHITECTURE_ONLY: &str = "architecture-only";

/// Descriptive metadata for a saved model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    #[serde(default)]
    pub label: String,

    /// RFC 3339 timestamp of the export
    #[serde(default)]
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_type: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl ModelMetadata {
    /// Metadata stamped with the current time
    pub fn now(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timestamp: Utc::now().to_rfc3339(),
            export_type: Some(ARCHITECTURE_ONLY.to_string()),
            unknown_fields: HashMap::new(),
        }
    }
}

/// A complete model document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub layers: LayerSequence,

    #[serde(default)]
    pub training_settings: TrainingSettings,

    #[serde(default)]
    pub metadata: ModelMetadata,

    /// Trained weights, opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<serde_json::Value>,

    /// Per-epoch metrics from a previous run, opaque to the validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_history: Option<serde_json::Value>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl ModelConfig {
    pub fn new(layers: LayerSequence, training_settings: TrainingSettings, label: &str) -> Self {
        Self {
            layers,
            training_settings,
            metadata: ModelMetadata::now(label),
            weights: None,
            training_history: None,
            unknown_fields: HashMap::new(),
        }
    }

    /// Starter document holding the canonical MNIST architecture
    pub fn canonical(label: &str) -> Self {
        Self::new(
            LayerSequence::canonical_mnist(),
            TrainingSettings::default(),
            label,
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a model document from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BuilderError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| BuilderError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ModelConfig =
            serde_json::from_str(&content).map_err(|e| BuilderError::InvalidModelFile {
                path: path.to_path_buf(),
                source: e,
            })?;

        info!(
            "Loaded model '{}' with {} layers from {}",
            config.metadata.label,
            config.layers.len(),
            path.display()
        );

        Ok(config)
    }

    /// Write the document as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json_string()?;

        fs::write(path, content).map_err(|e| BuilderError::FileWriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(
            "Saved model '{}' with {} layers to {}",
            self.metadata.label,
            self.layers.len(),
            path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Layer;

    const MINIMAL: &str = r#"{
        "layers": [{"type": "Flatten"}, {"type": "Dense", "units": 10}, {"type": "Softmax"}],
        "trainingSettings": {"epochs": 3, "batchSize": 64, "learningRate": 0.01, "optimizer": "sgd"},
        "metadata": {"label": "tiny", "timestamp": "2024-01-01T00:00:00Z"}
    }"#;

    #[test]
    fn test_parse_minimal() {
        let config = ModelConfig::from_json_str(MINIMAL).unwrap();
        assert_eq!(config.layers.len(), 3);
        assert_eq!(config.layers.get(1), Some(&Layer::dense(10)));
        assert_eq!(config.training_settings.batch_size, 64);
        assert_eq!(config.metadata.label, "tiny");
        assert!(config.weights.is_none());
    }

    #[test]
    fn test_layers_only_document_uses_defaults() {
        let config = ModelConfig::from_json_str(r#"{"layers": []}"#).unwrap();
        assert!(config.layers.is_empty());
        assert_eq!(config.training_settings, TrainingSettings::default());
    }

    #[test]
    fn test_missing_layers_rejected() {
        assert!(ModelConfig::from_json_str(r#"{"metadata": {}}"#).is_err());
    }

    #[test]
    fn test_metadata_now() {
        let metadata = ModelMetadata::now("demo");
        assert_eq!(metadata.export_type.as_deref(), Some(ARCHITECTURE_ONLY));
        assert!(chrono::DateTime::parse_from_rfc3339(&metadata.timestamp).is_ok());
    }
}
