//! Next-layer recommendations
//!
//! A phase-aware rule table: before Flatten the model is extracting
//! features, after it the model is classifying. The last layer picks the row.

use std::collections::BTreeSet;

use crate::layers::{Layer, LayerType};

/// Layer kinds recommended after the current sequence
pub fn recommend(layers: &[Layer]) -> BTreeSet<LayerType> {
    use LayerType::*;

    let last = match layers.last() {
        Some(layer) => layer.layer_type(),
        None => return BTreeSet::from([Conv2d]),
    };

    let has_flattened = layers.iter().any(|l| l.is(Flatten));

    let next: &[LayerType] = if !has_flattened {
        match last {
            Conv2d => &[Relu, BatchNormalization],
            Relu => &[Conv2d, MaxPooling2d, BatchNormalization, Dropout],
            MaxPooling2d => &[Conv2d, Dropout, Flatten],
            BatchNormalization => &[Relu, Conv2d, MaxPooling2d],
            Dropout => &[Conv2d, Flatten],
            _ => &[Conv2d, Relu, MaxPooling2d, Flatten],
        }
    } else {
        match last {
            Flatten => &[Dense],
            Dense => &[Relu, Dropout, Dense, Softmax],
            Relu => &[Dense, Dropout],
            Dropout => &[Dense],
            // Model is complete
            Softmax => &[],
            _ => &[Dense],
        }
    };

    next.iter().copied().collect()
}

/// Check whether `candidate` is among the recommendations for `layers`
pub fn is_recommended(layers: &[Layer], candidate: LayerType) -> bool {
    recommend(layers).contains(&candidate)
}
