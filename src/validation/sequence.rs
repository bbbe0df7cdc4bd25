//! Sequence validation
//!
//! Walks the layers once, tracking the most recent Flatten position, and
//! collects every triggered message. Nothing short-circuits: each rule is
//! evaluated independently so the caller sees all problems at once.

use log::debug;

use super::ValidationResult;
use crate::layers::{Layer, LayerType, MNIST_CLASSES};

/// Validate the structure and hyperparameters of a layer sequence
pub fn validate(layers: &[Layer]) -> ValidationResult {
    if layers.is_empty() {
        return ValidationResult::valid();
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !layers[0].is(LayerType::Conv2d) {
        warnings.push("Consider starting with a Conv2D layer for feature extraction".to_string());
    }

    let mut flatten_index: Option<usize> = None;
    let mut has_classification_layers = false;

    for (i, layer) in layers.iter().enumerate() {
        let position = i + 1;
        let layer_type = layer.layer_type();

        if layer_type == LayerType::Flatten {
            if flatten_index.is_some() {
                errors.push(
                    "Multiple Flatten layers found. Only one Flatten layer is allowed.".to_string(),
                );
            }
            flatten_index = Some(i);
        }

        match flatten_index {
            Some(flatten) if i > flatten => {
                if layer_type.is_spatial() {
                    errors.push(format!(
                        "{} layer at position {} cannot come after Flatten layer",
                        layer_type, position
                    ));
                }
                if layer_type == LayerType::Dense {
                    has_classification_layers = true;
                }
            }
            Some(_) => {}
            None => {
                if layer_type == LayerType::Dense {
                    errors.push(format!(
                        "Dense layer at position {} must come after Flatten layer",
                        position
                    ));
                }
            }
        }

        errors.extend(parameter_errors(layer, position));

        if layer_type == LayerType::Conv2d {
            if let Some(next) = layers.get(i + 1) {
                if !next.is(LayerType::Relu) && !next.is(LayerType::BatchNormalization) {
                    warnings.push(format!(
                        "Conv2D layer at position {} is not followed by activation or normalization",
                        position
                    ));
                }
            }
        }
    }

    if layers.last().map_or(false, |l| !l.is(LayerType::Softmax)) {
        warnings.push("Model should end with Softmax activation for MNIST classification".to_string());
    }

    if flatten_index.is_some() && !has_classification_layers {
        warnings.push("Model has Flatten layer but no Dense layers for classification".to_string());
    }

    if let Some(error) = final_dense_error(layers) {
        errors.push(error);
    }

    debug!(
        "Validated {} layers: {} error(s), {} warning(s)",
        layers.len(),
        errors.len(),
        warnings.len()
    );

    ValidationResult::new(errors, warnings)
}

/// Hyperparameter range checks, independent of position
fn parameter_errors(layer: &Layer, position: usize) -> Vec<String> {
    let mut errors = Vec::new();
    match layer {
        Layer::Conv2d {
            filters,
            kernel_size,
            ..
        } => {
            if *filters <= 0 {
                errors.push(format!(
                    "Conv2D layer at position {}: filters must be positive",
                    position
                ));
            }
            if *kernel_size <= 0 {
                errors.push(format!(
                    "Conv2D layer at position {}: kernelSize must be positive",
                    position
                ));
            }
        }
        Layer::MaxPooling2d { pool_size, .. } => {
            if *pool_size <= 0 {
                errors.push(format!(
                    "MaxPooling2D layer at position {}: poolSize must be positive",
                    position
                ));
            }
        }
        Layer::Dropout { rate } => {
            // NaN is out of range
            if !(0.0..1.0).contains(rate) {
                errors.push(format!(
                    "Dropout layer at position {}: rate must be between 0 and 1",
                    position
                ));
            }
        }
        Layer::Dense { units } => {
            if *units <= 0 {
                errors.push(format!(
                    "Dense layer at position {}: units must be positive",
                    position
                ));
            }
        }
        Layer::Relu | Layer::BatchNormalization | Layer::Flatten | Layer::Softmax => {}
    }
    errors
}

/// Error for a final Dense layer that does not emit one unit per MNIST class
///
/// Applies to the last Dense layer anywhere in the sequence, whether or not
/// it sits after Flatten.
pub(super) fn final_dense_error(layers: &[Layer]) -> Option<String> {
    let units = layers.iter().rev().find_map(|layer| match layer {
        Layer::Dense { units } => Some(*units),
        _ => None,
    })?;

    if units == MNIST_CLASSES {
        return None;
    }

    Some(format!(
        "Final Dense layer must have exactly {} units for MNIST classification, but has {} units",
        MNIST_CLASSES, units
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Padding;

    fn conv() -> Layer {
        Layer::conv2d(32, 3, 1, Padding::Same)
    }

    #[test]
    fn test_empty_is_valid() {
        let result = validate(&[]);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_single_conv_valid_with_warning() {
        let result = validate(&[conv()]);
        assert!(result.is_valid());
        assert!(result.has_warning("Model should end with Softmax activation for MNIST classification"));
    }

    #[test]
    fn test_first_layer_warning() {
        let result = validate(&[Layer::Relu]);
        assert_eq!(
            result.warnings()[0],
            "Consider starting with a Conv2D layer for feature extraction"
        );
    }

    #[test]
    fn test_dropout_nan_rejected() {
        let result = validate(&[conv(), Layer::Relu, Layer::dropout(f64::NAN)]);
        assert!(result.has_error("Dropout layer at position 3: rate must be between 0 and 1"));
    }

    #[test]
    fn test_dropout_bounds() {
        assert!(validate(&[conv(), Layer::Relu, Layer::dropout(0.0)]).is_valid());
        assert!(!validate(&[conv(), Layer::Relu, Layer::dropout(1.0)]).is_valid());
        assert!(!validate(&[conv(), Layer::Relu, Layer::dropout(-0.1)]).is_valid());
    }

    #[test]
    fn test_final_dense_error_uses_last_dense() {
        let layers = [Layer::Flatten, Layer::dense(10), Layer::dense(7)];
        assert_eq!(
            final_dense_error(&layers).as_deref(),
            Some("Final Dense layer must have exactly 10 units for MNIST classification, but has 7 units")
        );
        assert!(final_dense_error(&[Layer::Flatten, Layer::dense(7), Layer::dense(10)]).is_none());
        assert!(final_dense_error(&[conv()]).is_none());
    }
}
