//! Layer Model Module
//!
//! Declarative layer descriptors and the ordered sequence they form.
//! The network's fixed input is a 28×28 grayscale MNIST digit.

mod layer;
mod sequence;

pub use layer::{Layer, LayerType, Padding};
pub use sequence::LayerSequence;

/// Number of classes the final Dense layer must produce
pub const MNIST_CLASSES: i64 = 10;
