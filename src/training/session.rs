//! Training run driver
//!
//! Gates the run on training readiness, then drives the backend one epoch
//! at a time, checking the cancel token before each epoch.

use std::time::Instant;

use tracing::{info, info_span, warn};
use uuid::Uuid;

use super::{CancelToken, EpochMetrics, Trainer, TrainingHistory};
use crate::config::TrainingSettings;
use crate::error::{BuilderError, Result};
use crate::layers::Layer;
use crate::validation::validate_for_training;

/// One training run over a fixed architecture
#[derive(Debug, Clone)]
pub struct TrainingSession {
    settings: TrainingSettings,
    token: CancelToken,
}

impl TrainingSession {
    /// Create a session; settings are clamped into their accepted ranges
    pub fn new(settings: &TrainingSettings) -> Self {
        Self {
            settings: settings.clamped(),
            token: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn settings(&self) -> &TrainingSettings {
        &self.settings
    }

    /// Handle that stops this session before its next epoch
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Train `layers`, reporting each epoch to `on_epoch`
    pub fn run<F>(
        &self,
        trainer: &mut dyn Trainer,
        layers: &[Layer],
        mut on_epoch: F,
    ) -> Result<TrainingHistory>
    where
        F: FnMut(&EpochMetrics),
    {
        let readiness = validate_for_training(layers);
        if !readiness.is_valid() {
            warn!(errors = readiness.errors().len(), "model is not ready for training");
            return Err(BuilderError::NotTrainable {
                errors: readiness.into_errors(),
            });
        }

        let run_id = Uuid::new_v4();
        let span = info_span!(
            "training",
            %run_id,
            trainer = trainer.name(),
            epochs = self.settings.epochs
        );
        let _enter = span.enter();

        let start = Instant::now();
        trainer.prepare(layers, &self.settings)?;

        let mut metrics = Vec::with_capacity(self.settings.epochs as usize);
        for epoch in 1..=self.settings.epochs {
            if self.token.is_cancelled() {
                let completed_epochs = epoch - 1;
                warn!(completed_epochs, "training cancelled");
                return Err(BuilderError::TrainingCancelled { completed_epochs });
            }

            let epoch_metrics = trainer.fit_epoch(epoch, &self.settings)?;
            info!(
                epoch,
                loss = epoch_metrics.loss,
                accuracy = epoch_metrics.accuracy,
                "epoch complete"
            );
            on_epoch(&epoch_metrics);
            metrics.push(epoch_metrics);
        }

        let elapsed = start.elapsed().as_millis() as u64;
        info!(elapsed_ms = elapsed, "training complete");

        Ok(TrainingHistory::from_metrics(run_id, &metrics, elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerSequence;
    use crate::training::MockTrainer;

    fn settings(epochs: u32) -> TrainingSettings {
        TrainingSettings {
            epochs,
            ..TrainingSettings::default()
        }
    }

    #[test]
    fn test_run_collects_every_epoch() {
        let seq = LayerSequence::canonical_mnist();
        let mut trainer = MockTrainer::new();
        let mut seen = Vec::new();

        let history = TrainingSession::new(&settings(3))
            .run(&mut trainer, seq.layers(), |m| seen.push(m.epoch))
            .unwrap();

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(history.epochs, vec![1, 2, 3]);
        assert!(history.run_id.is_some());
        assert_eq!(trainer.prepared_layers(), seq.len());
    }

    #[test]
    fn test_refuses_untrainable_model() {
        let mut trainer = MockTrainer::new();
        let err = TrainingSession::new(&settings(3))
            .run(&mut trainer, &[], |_| {})
            .unwrap_err();
        match err {
            BuilderError::NotTrainable { errors } => {
                assert_eq!(errors, vec!["Cannot train an empty model. Add some layers first."]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(trainer.prepared_layers(), 0);
    }

    #[test]
    fn test_cancel_between_epochs() {
        let seq = LayerSequence::canonical_mnist();
        let mut trainer = MockTrainer::new();
        let session = TrainingSession::new(&settings(5));
        let token = session.cancel_token();

        let err = session
            .run(&mut trainer, seq.layers(), |m| {
                if m.epoch == 2 {
                    token.cancel();
                }
            })
            .unwrap_err();

        assert!(matches!(
            err,
            BuilderError::TrainingCancelled { completed_epochs: 2 }
        ));
    }

    #[test]
    fn test_backend_failure_propagates() {
        let seq = LayerSequence::canonical_mnist();
        let mut trainer = MockTrainer::new().failing_at(2);
        let result = TrainingSession::new(&settings(4)).run(&mut trainer, seq.layers(), |_| {});
        assert!(matches!(result, Err(BuilderError::TrainingFailed { .. })));
    }

    #[test]
    fn test_settings_are_clamped() {
        let session = TrainingSession::new(&settings(0));
        assert_eq!(session.settings().epochs, 1);
    }
}
