//! Model Document Tests
//!
//! Loading, saving and pass-through of uninterpreted blocks.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use cnn_builder::config::{ModelConfig, Optimizer, TrainingSettings};
use cnn_builder::editor::ModelBuilder;
use cnn_builder::training::{CancelToken, MockTrainer};
use cnn_builder::{BuilderError, Layer};

fn document_with_weights() -> serde_json::Value {
    json!({
        "layers": [
            {"type": "Conv2D", "filters": 32, "kernelSize": 3, "strides": 1, "padding": "same"},
            {"type": "ReLU"},
            {"type": "MaxPooling2D", "poolSize": 2, "strides": 2, "padding": "valid"},
            {"type": "Flatten"},
            {"type": "Dense", "units": 10},
            {"type": "Softmax"}
        ],
        "trainingSettings": {"epochs": 8, "batchSize": 128, "learningRate": 0.01, "optimizer": "sgd"},
        "metadata": {"label": "trained", "timestamp": "2024-03-01T12:00:00Z", "exportType": "full", "author": "lab"},
        "weights": {"format": "tfjs", "data": [0.1, 0.2]},
        "trainingHistory": {"epochs": [1, 2], "losses": [0.4, 0.3], "accuracies": [0.8, 0.9]},
        "notes": "keep me"
    })
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");

    let config = ModelConfig::canonical("saved");
    config.save(&path).unwrap();

    let loaded = ModelConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = ModelConfig::load(&dir.path().join("absent.json"));
    match result {
        Err(e @ BuilderError::FileNotFound { .. }) => {
            assert_eq!(e.error_code(), "FILE_NOT_FOUND");
            assert!(e.is_recoverable());
        }
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_load_malformed_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"layers": [{"type": "Conv2D"}]}"#).unwrap();

    let result = ModelConfig::load(&path);
    assert!(matches!(result, Err(BuilderError::InvalidModelFile { .. })));
}

#[test]
fn test_unknown_layer_type_rejected() {
    let result = ModelConfig::from_json_str(r#"{"layers": [{"type": "LSTM", "units": 3}]}"#);
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_load() {
    let config = ModelConfig::from_json_str(
        r#"{"layers": [{"type": "Conv2D", "filters": 0, "kernelSize": -1, "strides": 1, "padding": "valid"}, {"type": "Dropout", "rate": 1.5}]}"#,
    )
    .unwrap();
    let builder = ModelBuilder::from_config(config);
    let result = builder.validation();
    assert_eq!(
        result.errors(),
        [
            "Conv2D layer at position 1: filters must be positive",
            "Conv2D layer at position 1: kernelSize must be positive",
            "Dropout layer at position 2: rate must be between 0 and 1",
        ]
    );
}

#[test]
fn test_training_settings_parsed() {
    let config = ModelConfig::from_json_str(&document_with_weights().to_string()).unwrap();
    assert_eq!(
        config.training_settings,
        TrainingSettings {
            epochs: 8,
            batch_size: 128,
            learning_rate: 0.01,
            optimizer: Optimizer::Sgd,
        }
    );
}

#[test]
fn test_partial_settings_fall_back_to_defaults() {
    let config =
        ModelConfig::from_json_str(r#"{"layers": [], "trainingSettings": {"epochs": 12}}"#)
            .unwrap();
    assert_eq!(config.training_settings.epochs, 12);
    assert_eq!(config.training_settings.batch_size, 32);
    assert_eq!(config.training_settings.optimizer, Optimizer::Adam);
}

#[test]
fn test_pass_through_survives_unchanged_export() {
    let config = ModelConfig::from_json_str(&document_with_weights().to_string()).unwrap();
    let builder = ModelBuilder::from_config(config);
    assert!(builder.is_trained());
    assert_eq!(builder.history().map(|h| h.epochs.clone()), Some(vec![1, 2]));

    let exported = serde_json::to_value(builder.export("trained").unwrap()).unwrap();
    let original = document_with_weights();
    assert_eq!(exported["weights"], original["weights"]);
    assert_eq!(exported["trainingHistory"], original["trainingHistory"]);
    assert_eq!(exported["notes"], "keep me");
    assert_eq!(exported["metadata"]["author"], "lab");
    assert_eq!(exported["layers"], original["layers"]);
}

#[test]
fn test_edit_drops_weights_and_history() {
    let config = ModelConfig::from_json_str(&document_with_weights().to_string()).unwrap();
    let mut builder = ModelBuilder::from_config(config);
    builder.add_layer(Layer::Relu);

    assert!(!builder.is_trained());
    let exported = builder.export("edited").unwrap();
    assert!(exported.weights.is_none());
    assert!(exported.training_history.is_none());
    assert_eq!(
        exported.unknown_fields.get("notes"),
        Some(&json!("keep me"))
    );
}

#[test]
fn test_retraining_replaces_imported_history() {
    let config = ModelConfig::from_json_str(&document_with_weights().to_string()).unwrap();
    let mut builder = ModelBuilder::from_config(config);
    builder.train(&mut MockTrainer::new(), CancelToken::new()).unwrap();

    let exported = builder.export("retrained").unwrap();
    assert!(exported.weights.is_none());
    let history = exported.training_history.unwrap();
    // Settings from the document ask for 8 epochs
    assert_eq!(history["epochs"].as_array().map(Vec::len), Some(8));
    assert!(history.get("runId").is_some());
}

#[test]
fn test_unreadable_history_is_ignored() {
    let mut document = document_with_weights();
    document["trainingHistory"] = json!("not a history");
    let config = ModelConfig::from_json_str(&document.to_string()).unwrap();

    let builder = ModelBuilder::from_config(config);
    assert!(!builder.is_trained());
    assert!(builder.validation().is_valid());
}
