//! Shape propagation
//!
//! Walks a layer sequence from the fixed MNIST input and records the output
//! dimensions after every layer.

use super::{Dimensions, LayerShape};
use crate::layers::{Layer, Padding};

/// Output shape of every layer, preceded by the input entry
///
/// The result always has `layers.len() + 1` entries.
pub fn propagate(layers: &[Layer]) -> Vec<LayerShape> {
    let mut shapes = Vec::with_capacity(layers.len() + 1);
    shapes.push(LayerShape::input());

    let mut current = Dimensions::MNIST_INPUT;

    for layer in layers {
        let shape = match layer {
            Layer::Conv2d {
                filters,
                kernel_size,
                strides,
                padding,
            } => {
                let (width, height) = windowed(current, *kernel_size, *strides, *padding);
                current = Dimensions::new(width, height, *filters);
                LayerShape::new(
                    current,
                    "Conv2D",
                    format!("{} filters, {}×{} kernel", filters, kernel_size, kernel_size),
                )
            }
            Layer::MaxPooling2d {
                pool_size,
                strides,
                padding,
            } => {
                let (width, height) = windowed(current, *pool_size, *strides, *padding);
                current = Dimensions::new(width, height, current.depth);
                LayerShape::new(
                    current,
                    "MaxPool2D",
                    format!("{}×{} pooling", pool_size, pool_size),
                )
            }
            Layer::Flatten => {
                let flattened = current.volume();
                current = Dimensions::vector(flattened);
                LayerShape::new(
                    current,
                    "Flatten",
                    format!("Flattened to {} units", flattened),
                )
            }
            Layer::Dense { units } => {
                // Only the width changes. After Flatten height and depth are
                // already 1; a Dense placed before Flatten keeps the tracked
                // height and depth.
                current.width = *units;
                LayerShape::new(current, "Dense", format!("{} neurons", units))
            }
            Layer::Relu => LayerShape::new(current, "ReLU", "Activation function"),
            Layer::BatchNormalization => {
                LayerShape::new(current, "BatchNorm", "Batch normalization")
            }
            Layer::Dropout { rate } => {
                LayerShape::new(current, "Dropout", format!("{}% dropout rate", rate * 100.0))
            }
            Layer::Softmax => LayerShape::new(current, "Softmax", "Output probabilities"),
        };
        shapes.push(shape);
    }

    shapes
}

/// Spatial output of a sliding window
///
/// `same` ignores the window size and only downsamples by the stride.
/// Non-positive strides are treated as 1.
fn windowed(input: Dimensions, window: i64, strides: i64, padding: Padding) -> (i64, i64) {
    let strides = strides.max(1);
    match padding {
        Padding::Same => (
            ceil_div(input.width, strides),
            ceil_div(input.height, strides),
        ),
        Padding::Valid => (
            ceil_div(input.width.saturating_sub(window).saturating_add(1), strides),
            ceil_div(input.height.saturating_sub(window).saturating_add(1), strides),
        ),
    }
}

/// Ceiling division for a positive divisor
fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n / d;
    if n % d > 0 {
        q + 1
    } else {
        q
    }
}
