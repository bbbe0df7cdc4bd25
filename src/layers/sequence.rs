//! Ordered layer list
//!
//! Insertion order is execution order. The list itself enforces no
//! ordering rules; it may be transiently invalid while being edited.

use serde::{Deserialize, Serialize};

use super::layer::{Layer, LayerType, Padding};
use crate::error::{BuilderError, Result};

/// Ordered list of layers defining a model architecture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerSequence {
    layers: Vec<Layer>,
}

impl LayerSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// The reference MNIST architecture
    ///
    /// Conv2D(32, 3x3, same) → ReLU → MaxPool(2, stride 2, valid) → Flatten → Dense(10) → Softmax
    pub fn canonical_mnist() -> Self {
        Self::from(vec![
            Layer::conv2d(32, 3, 1, Padding::Same),
            Layer::Relu,
            Layer::max_pooling2d(2, 2, Padding::Valid),
            Layer::Flatten,
            Layer::dense(10),
            Layer::Softmax,
        ])
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn last(&self) -> Option<&Layer> {
        self.layers.last()
    }

    /// Append a layer at the end
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Insert a layer before `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, layer: Layer) -> Result<()> {
        if index > self.layers.len() {
            return Err(self.out_of_range(index));
        }
        self.layers.insert(index, layer);
        Ok(())
    }

    /// Replace the layer at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, layer: Layer) -> Result<Layer> {
        match self.layers.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, layer)),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Remove the layer at `index`
    pub fn remove(&mut self, index: usize) -> Result<Layer> {
        if index >= self.layers.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.layers.remove(index))
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Index of the first layer of the given kind
    pub fn position_of(&self, layer_type: LayerType) -> Option<usize> {
        self.layers.iter().position(|l| l.is(layer_type))
    }

    /// Index of the last layer of the given kind
    pub fn last_position_of(&self, layer_type: LayerType) -> Option<usize> {
        self.layers.iter().rposition(|l| l.is(layer_type))
    }

    pub fn contains(&self, layer_type: LayerType) -> bool {
        self.layers.iter().any(|l| l.is(layer_type))
    }

    pub fn count(&self, layer_type: LayerType) -> usize {
        self.layers.iter().filter(|l| l.is(layer_type)).count()
    }

    fn out_of_range(&self, index: usize) -> BuilderError {
        BuilderError::LayerIndexOutOfRange {
            index,
            len: self.layers.len(),
        }
    }
}

impl From<Vec<Layer>> for LayerSequence {
    fn from(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

impl FromIterator<Layer> for LayerSequence {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LayerSequence {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

impl AsRef<[Layer]> for LayerSequence {
    fn as_ref(&self) -> &[Layer] {
        &self.layers
    }
}
