//! Model editing session
//!
//! Holds the architecture being edited. Every mutation recomputes the
//! validation result from scratch and discards trained state, since weights
//! and metrics belong to the architecture they were produced with.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};

use crate::config::{ModelConfig, ModelMetadata, TrainingSettings};
use crate::error::{BuilderError, Result};
use crate::layers::{Layer, LayerSequence, LayerType};
use crate::shape::{propagate, ArchitectureSummary, LayerShape};
use crate::training::{CancelToken, EpochMetrics, Trainer, TrainingHistory, TrainingSession};
use crate::validation::{recommend, validate, validate_for_training, ValidationResult};

/// Blocks from an imported document that this crate does not interpret
#[derive(Debug, Clone, Default)]
struct PassThrough {
    weights: Option<serde_json::Value>,
    training_history: Option<serde_json::Value>,
    metadata_fields: HashMap<String, serde_json::Value>,
    unknown_fields: HashMap<String, serde_json::Value>,
}

/// Interactive model builder
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    layers: LayerSequence,
    settings: TrainingSettings,
    history: Option<TrainingHistory>,
    pass_through: PassThrough,
}

impl ModelBuilder {
    /// Create an empty builder with default training settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an imported document
    pub fn from_config(config: ModelConfig) -> Self {
        let mut builder = Self::new();
        builder.import(config);
        builder
    }

    /// Replace the whole session with an imported document
    ///
    /// Training settings are clamped into their accepted ranges.
    pub fn import(&mut self, config: ModelConfig) {
        info!(
            "Importing model '{}' with {} layers",
            config.metadata.label,
            config.layers.len()
        );

        self.history = match &config.training_history {
            Some(value) => match TrainingHistory::from_value(value) {
                Ok(history) => Some(history),
                Err(e) => {
                    warn!("Ignoring unreadable training history: {}", e);
                    None
                }
            },
            None => None,
        };

        let settings = config.training_settings.clamped();
        if settings != config.training_settings {
            warn!(
                "Training settings out of range, using epochs={} batchSize={} learningRate={}",
                settings.epochs, settings.batch_size, settings.learning_rate
            );
        }

        self.layers = config.layers;
        self.settings = settings;
        self.pass_through = PassThrough {
            weights: config.weights,
            training_history: config.training_history,
            metadata_fields: config.metadata.unknown_fields,
            unknown_fields: config.unknown_fields,
        };

        self.log_status();
    }

    /// Append a layer
    pub fn add_layer(&mut self, layer: Layer) -> ValidationResult {
        debug!("Adding {} at position {}", layer, self.layers.len() + 1);
        self.layers.push(layer);
        self.architecture_changed()
    }

    /// Append a layer of the given kind with default hyperparameters
    pub fn add_default_layer(&mut self, layer_type: LayerType) -> ValidationResult {
        self.add_layer(layer_type.default_layer())
    }

    /// Insert a layer before `index`
    pub fn insert_layer(&mut self, index: usize, layer: Layer) -> Result<ValidationResult> {
        self.layers.insert(index, layer)?;
        Ok(self.architecture_changed())
    }

    /// Replace the layer at `index`
    pub fn update_layer(&mut self, index: usize, layer: Layer) -> Result<ValidationResult> {
        let previous = self.layers.replace(index, layer)?;
        debug!("Replaced {} at position {}", previous, index + 1);
        Ok(self.architecture_changed())
    }

    /// Remove the layer at `index`
    pub fn remove_layer(&mut self, index: usize) -> Result<ValidationResult> {
        let removed = self.layers.remove(index)?;
        debug!("Removed {} from position {}", removed, index + 1);
        Ok(self.architecture_changed())
    }

    /// Move a layer to a new position
    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<ValidationResult> {
        if to >= self.layers.len() {
            return Err(BuilderError::LayerIndexOutOfRange {
                index: to,
                len: self.layers.len(),
            });
        }
        let layer = self.layers.remove(from)?;
        self.layers.insert(to, layer)?;
        Ok(self.architecture_changed())
    }

    /// Remove every layer
    pub fn clear(&mut self) -> ValidationResult {
        self.layers.clear();
        self.architecture_changed()
    }

    /// Set training settings, clamped into their accepted ranges
    pub fn set_training_settings(&mut self, settings: TrainingSettings) {
        self.settings = settings.clamped();
    }

    pub fn layers(&self) -> &LayerSequence {
        &self.layers
    }

    pub fn training_settings(&self) -> &TrainingSettings {
        &self.settings
    }

    /// History of the last successful run on the current architecture
    pub fn history(&self) -> Option<&TrainingHistory> {
        self.history.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.history.is_some()
    }

    pub fn validation(&self) -> ValidationResult {
        validate(self.layers.layers())
    }

    pub fn training_readiness(&self) -> ValidationResult {
        validate_for_training(self.layers.layers())
    }

    pub fn recommendations(&self) -> BTreeSet<LayerType> {
        recommend(self.layers.layers())
    }

    /// Check whether `layer_type` is a recommended next layer
    pub fn is_recommended(&self, layer_type: LayerType) -> bool {
        self.recommendations().contains(&layer_type)
    }

    pub fn shapes(&self) -> Vec<LayerShape> {
        propagate(self.layers.layers())
    }

    pub fn summary(&self) -> ArchitectureSummary {
        ArchitectureSummary::of(self.layers.layers())
    }

    /// Train the current architecture
    pub fn train(
        &mut self,
        trainer: &mut dyn Trainer,
        token: CancelToken,
    ) -> Result<&TrainingHistory> {
        self.train_with(trainer, token, |_| {})
    }

    /// Train the current architecture, observing each epoch
    pub fn train_with<F>(
        &mut self,
        trainer: &mut dyn Trainer,
        token: CancelToken,
        on_epoch: F,
    ) -> Result<&TrainingHistory>
    where
        F: FnMut(&EpochMetrics),
    {
        let session = TrainingSession::new(&self.settings).with_cancel_token(token);
        let history = session.run(trainer, self.layers.layers(), on_epoch)?;

        // A fresh run supersedes anything imported
        self.pass_through.weights = None;
        self.pass_through.training_history = None;

        Ok(self.history.insert(history))
    }

    /// Build a document for the current session
    pub fn export(&self, label: &str) -> Result<ModelConfig> {
        let mut metadata = ModelMetadata::now(label);
        metadata.unknown_fields = self.pass_through.metadata_fields.clone();

        let training_history = match (&self.history, &self.pass_through.training_history) {
            (_, Some(imported)) => Some(imported.clone()),
            (Some(history), None) => Some(history.to_value()?),
            (None, None) => None,
        };

        Ok(ModelConfig {
            layers: self.layers.clone(),
            training_settings: self.settings.clone(),
            metadata,
            weights: self.pass_through.weights.clone(),
            training_history,
            unknown_fields: self.pass_through.unknown_fields.clone(),
        })
    }

    fn architecture_changed(&mut self) -> ValidationResult {
        if self.history.take().is_some() {
            debug!("Architecture changed, discarding trained state");
        }
        self.pass_through.weights = None;
        self.pass_through.training_history = None;
        self.log_status()
    }

    fn log_status(&self) -> ValidationResult {
        let result = self.validation();
        if result.is_valid() {
            debug!(
                "{} layers, valid with {} warning(s)",
                self.layers.len(),
                result.warnings().len()
            );
        } else {
            warn!(
                "{} layers, {} error(s): {}",
                self.layers.len(),
                result.errors().len(),
                result.errors().join("; ")
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Padding;
    use crate::training::MockTrainer;

    #[test]
    fn test_builder_new() {
        let builder = ModelBuilder::new();
        assert!(builder.layers().is_empty());
        assert!(builder.validation().is_valid());
        assert!(!builder.training_readiness().is_valid());
        assert!(builder.is_recommended(LayerType::Conv2d));
    }

    #[test]
    fn test_mutation_returns_fresh_validation() {
        let mut builder = ModelBuilder::new();
        let result = builder.add_layer(Layer::conv2d(32, 3, 1, Padding::Same));
        assert!(result.is_valid());

        let result = builder.add_layer(Layer::dense(10));
        assert!(result.has_error("Dense layer at position 2 must come after Flatten layer"));

        let result = builder.insert_layer(1, Layer::Flatten).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_move_layer_bounds() {
        let mut builder = ModelBuilder::from_config(ModelConfig::canonical("m"));
        assert!(builder.move_layer(0, 6).is_err());
        assert_eq!(builder.layers().len(), 6);
        builder.move_layer(5, 0).unwrap();
        assert_eq!(builder.layers().get(0), Some(&Layer::Softmax));
    }

    #[test]
    fn test_edit_discards_trained_state() {
        let mut builder = ModelBuilder::from_config(ModelConfig::canonical("m"));
        builder.train(&mut MockTrainer::new(), CancelToken::new()).unwrap();
        assert!(builder.is_trained());

        builder.update_layer(0, Layer::conv2d(16, 3, 1, Padding::Same)).unwrap();
        assert!(!builder.is_trained());
    }
}
