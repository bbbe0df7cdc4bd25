//! Training metrics
//!
//! `TrainingHistory` serializes to the `trainingHistory` block of a model
//! document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Metrics reported for one epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochMetrics {
    pub epoch: u32,
    pub loss: f64,
    pub accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_accuracy: Option<f64>,
}

/// Column-oriented record of a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    pub epochs: Vec<u32>,
    pub losses: Vec<f64>,
    pub accuracies: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_losses: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_accuracies: Option<Vec<f64>>,
    /// Wall-clock duration in milliseconds
    #[serde(default)]
    pub training_time: u64,
}

impl TrainingHistory {
    /// Build from per-epoch metrics
    ///
    /// Validation columns are present only when every epoch reported them.
    pub fn from_metrics(run_id: Uuid, metrics: &[EpochMetrics], training_time: u64) -> Self {
        let val_losses: Option<Vec<f64>> = metrics.iter().map(|m| m.val_loss).collect();
        let val_accuracies: Option<Vec<f64>> = metrics.iter().map(|m| m.val_accuracy).collect();

        Self {
            run_id: Some(run_id),
            epochs: metrics.iter().map(|m| m.epoch).collect(),
            losses: metrics.iter().map(|m| m.loss).collect(),
            accuracies: metrics.iter().map(|m| m.accuracy).collect(),
            val_losses: val_losses.filter(|v| !v.is_empty()),
            val_accuracies: val_accuracies.filter(|v| !v.is_empty()),
            training_time,
        }
    }

    /// Row-oriented view, one entry per recorded epoch
    pub fn metrics(&self) -> Vec<EpochMetrics> {
        self.epochs
            .iter()
            .enumerate()
            .map(|(i, &epoch)| EpochMetrics {
                epoch,
                loss: self.losses.get(i).copied().unwrap_or(f64::NAN),
                accuracy: self.accuracies.get(i).copied().unwrap_or(f64::NAN),
                val_loss: self.val_losses.as_ref().and_then(|v| v.get(i).copied()),
                val_accuracy: self.val_accuracies.as_ref().and_then(|v| v.get(i).copied()),
            })
            .collect()
    }

    pub fn final_accuracy(&self) -> Option<f64> {
        self.accuracies.last().copied()
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metric(epoch: u32, val: bool) -> EpochMetrics {
        EpochMetrics {
            epoch,
            loss: 0.5 / epoch as f64,
            accuracy: 0.8,
            val_loss: val.then_some(0.6),
            val_accuracy: val.then_some(0.75),
        }
    }

    #[test]
    fn test_validation_columns_need_every_epoch() {
        let full = TrainingHistory::from_metrics(Uuid::new_v4(), &[metric(1, true), metric(2, true)], 10);
        assert_eq!(full.val_losses, Some(vec![0.6, 0.6]));

        let partial = TrainingHistory::from_metrics(Uuid::new_v4(), &[metric(1, true), metric(2, false)], 10);
        assert!(partial.val_losses.is_none());
        assert!(partial.val_accuracies.is_none());
    }

    #[test]
    fn test_reads_imported_history_block() {
        let history = TrainingHistory::from_value(&json!({
            "epochs": [1, 2],
            "losses": [0.35, 0.25],
            "accuracies": [0.85, 0.9],
            "trainingTime": 1200
        }))
        .unwrap();
        assert!(history.run_id.is_none());
        let rows = history.metrics();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].epoch, 2);
        assert_eq!(rows[1].val_loss, None);
        assert_eq!(history.final_accuracy(), Some(0.9));
    }
}
