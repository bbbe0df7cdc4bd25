//! Tensor dimensions tracked per layer

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width, height and depth of a layer's output
///
/// Signed so that windows larger than their input show up as non-positive
/// sizes instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
    pub depth: i64,
}

impl Dimensions {
    /// MNIST digit: 28×28 grayscale
    pub const MNIST_INPUT: Dimensions = Dimensions::new(28, 28, 1);

    pub const fn new(width: i64, height: i64, depth: i64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// A 1D vector of `len` values
    pub const fn vector(len: i64) -> Self {
        Self::new(len, 1, 1)
    }

    /// Number of values in the tensor, saturating at the `i64` bounds
    pub fn volume(&self) -> i64 {
        self.width
            .saturating_mul(self.height)
            .saturating_mul(self.depth)
    }

    pub fn is_flattened(&self) -> bool {
        self.height == 1 && self.depth == 1
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flattened() {
            return write!(f, "{}", self.width);
        }
        write!(f, "{}×{}", self.width, self.height)?;
        if self.depth > 1 {
            write!(f, "×{}", self.depth)?;
        }
        Ok(())
    }
}

/// Dimensions of one step plus its display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerShape {
    #[serde(flatten)]
    pub dims: Dimensions,
    pub display_name: String,
    pub description: String,
}

impl LayerShape {
    pub fn new(dims: Dimensions, display_name: &str, description: impl Into<String>) -> Self {
        Self {
            dims,
            display_name: display_name.to_string(),
            description: description.into(),
        }
    }

    /// Synthetic entry for the network input
    pub fn input() -> Self {
        Self::new(
            Dimensions::MNIST_INPUT,
            "Input",
            "MNIST digit image (28×28×1)",
        )
    }
}
