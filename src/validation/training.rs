//! Training readiness
//!
//! Stricter than [`validate`](super::validate): these are the conditions the
//! training backend needs before it can build a classifier. No warnings are
//! produced.

use log::debug;

use super::sequence::final_dense_error;
use super::ValidationResult;
use crate::layers::{Layer, LayerType};

/// Check whether a layer sequence may be submitted for training
pub fn validate_for_training(layers: &[Layer]) -> ValidationResult {
    if layers.is_empty() {
        return ValidationResult::new(
            vec!["Cannot train an empty model. Add some layers first.".to_string()],
            Vec::new(),
        );
    }

    let mut errors = Vec::new();

    if !layers.iter().any(|l| l.is(LayerType::Flatten)) {
        errors.push("Model must have a Flatten layer to transition from 2D to 1D data".to_string());
    }

    if !layers.iter().any(|l| l.is(LayerType::Dense)) {
        errors.push("Model must have at least one Dense layer for classification".to_string());
    }

    if layers.last().map_or(true, |l| !l.is(LayerType::Softmax)) {
        errors.push("Model must end with Softmax activation for classification".to_string());
    }

    if let Some(error) = final_dense_error(layers) {
        errors.push(error);
    }

    debug!(
        "Training readiness for {} layers: {} error(s)",
        layers.len(),
        errors.len()
    );

    ValidationResult::new(errors, Vec::new())
}
