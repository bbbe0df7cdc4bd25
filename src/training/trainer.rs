//! Training backend seam
//!
//! The actual model fitting belongs to an external ML framework. A
//! `Trainer` adapts one to the epoch-by-epoch protocol the session drives.

use crate::config::TrainingSettings;
use crate::error::{BuilderError, Result};
use crate::layers::Layer;

use super::EpochMetrics;

/// Trait every training backend implements
pub trait Trainer: Send {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Build the model for `layers`
    ///
    /// Called once per run, after the readiness check passed.
    fn prepare(&mut self, layers: &[Layer], settings: &TrainingSettings) -> Result<()>;

    /// Run one pass over the training data
    ///
    /// `epoch` is 1-based.
    fn fit_epoch(&mut self, epoch: u32, settings: &TrainingSettings) -> Result<EpochMetrics>;
}

/// Deterministic stand-in backend
///
/// Produces monotonically improving metrics without touching any data.
/// Useful for driving the pipeline in tests and from the CLI.
#[derive(Debug, Clone, Default)]
pub struct MockTrainer {
    prepared_layers: usize,
    fail_at: Option<u32>,
}

impl MockTrainer {
    /// Loss approached as epochs grow
    const FLOOR_LOSS: f64 = 0.10;
    /// Accuracy approached as epochs grow
    const CEILING_ACCURACY: f64 = 0.95;
    /// Per-epoch retention of the remaining gap
    const DECAY: f64 = 0.6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Make `fit_epoch` fail on the given epoch
    pub fn failing_at(mut self, epoch: u32) -> Self {
        self.fail_at = Some(epoch);
        self
    }

    /// Number of layers seen by the last `prepare`
    pub fn prepared_layers(&self) -> usize {
        self.prepared_layers
    }
}

impl Trainer for MockTrainer {
    fn name(&self) -> &str {
        "mock"
    }

    fn prepare(&mut self, layers: &[Layer], _settings: &TrainingSettings) -> Result<()> {
        self.prepared_layers = layers.len();
        Ok(())
    }

    fn fit_epoch(&mut self, epoch: u32, _settings: &TrainingSettings) -> Result<EpochMetrics> {
        if self.fail_at == Some(epoch) {
            return Err(BuilderError::TrainingFailed {
                reason: format!("mock backend failure at epoch {}", epoch),
            });
        }

        let gap = Self::DECAY.powi(epoch.saturating_sub(1) as i32);
        let loss = Self::FLOOR_LOSS + 0.25 * gap;
        let accuracy = Self::CEILING_ACCURACY - 0.10 * gap;

        Ok(EpochMetrics {
            epoch,
            loss,
            accuracy,
            val_loss: Some(loss * 1.1),
            val_accuracy: Some(accuracy - 0.01),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mock_first_epoch() {
        let mut trainer = MockTrainer::new();
        let metrics = trainer
            .fit_epoch(1, &TrainingSettings::default())
            .unwrap();
        assert_relative_eq!(metrics.loss, 0.35, epsilon = 1e-12);
        assert_relative_eq!(metrics.accuracy, 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_mock_improves() {
        let mut trainer = MockTrainer::new();
        let settings = TrainingSettings::default();
        let first = trainer.fit_epoch(1, &settings).unwrap();
        let later = trainer.fit_epoch(5, &settings).unwrap();
        assert!(later.loss < first.loss);
        assert!(later.accuracy > first.accuracy);
    }

    #[test]
    fn test_mock_failure() {
        let mut trainer = MockTrainer::new().failing_at(2);
        let settings = TrainingSettings::default();
        assert!(trainer.fit_epoch(1, &settings).is_ok());
        assert!(matches!(
            trainer.fit_epoch(2, &settings),
            Err(BuilderError::TrainingFailed { .. })
        ));
    }
}
