//! Training settings
//!
//! Hyperparameters handed to the training backend alongside the layers.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod limits {
    pub const MIN_EPOCHS: u32 = 1;
    pub const MAX_EPOCHS: u32 = 100;
    pub const MIN_BATCH_SIZE: u32 = 1;
    pub const MAX_BATCH_SIZE: u32 = 512;
    pub const MIN_LEARNING_RATE: f64 = 0.0001;
    pub const MAX_LEARNING_RATE: f64 = 1.0;

    /// Samples per epoch assumed by the step estimate
    pub const SAMPLES_PER_EPOCH: u32 = 1000;

    /// Seconds per epoch assumed by the time estimate
    pub const SECONDS_PER_EPOCH: f64 = 10.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimizer {
    Sgd,
    #[default]
    Adam,
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimizer::Sgd => write!(f, "sgd"),
            Optimizer::Adam => write!(f, "adam"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingSettings {
    pub epochs: u32,
    pub batch_size: u32,
    pub learning_rate: f64,
    pub optimizer: Optimizer,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            epochs: 5,
            batch_size: 32,
            learning_rate: 0.001,
            optimizer: Optimizer::Adam,
        }
    }
}

impl TrainingSettings {
    /// Copy with every value pulled into its accepted range
    pub fn clamped(&self) -> Self {
        let learning_rate = if self.learning_rate.is_nan() {
            limits::MIN_LEARNING_RATE
        } else {
            self.learning_rate
                .clamp(limits::MIN_LEARNING_RATE, limits::MAX_LEARNING_RATE)
        };

        Self {
            epochs: self.epochs.clamp(limits::MIN_EPOCHS, limits::MAX_EPOCHS),
            batch_size: self
                .batch_size
                .clamp(limits::MIN_BATCH_SIZE, limits::MAX_BATCH_SIZE),
            learning_rate,
            optimizer: self.optimizer,
        }
    }

    /// Weight updates over the whole run
    pub fn total_training_steps(&self) -> u32 {
        let batch_size = self.batch_size.max(1);
        limits::SAMPLES_PER_EPOCH.div_ceil(batch_size) * self.epochs
    }

    /// Rough wall-clock estimate in seconds
    pub fn estimated_training_seconds(&self) -> f64 {
        let batch_factor = (self.batch_size.max(1) as f64).log10() / 2.0;
        self.epochs as f64 * limits::SECONDS_PER_EPOCH * batch_factor
    }

    /// Estimate rendered as `~12s`, `~3min` or `~1h`
    pub fn estimated_training_time(&self) -> String {
        let seconds = self.estimated_training_seconds();
        if seconds < 60.0 {
            format!("~{}s", seconds.round())
        } else if seconds < 3600.0 {
            format!("~{}min", (seconds / 60.0).round())
        } else {
            format!("~{}h", (seconds / 3600.0).round())
        }
    }
}
