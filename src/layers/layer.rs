//! Layer descriptors
//!
//! A layer is a closed set of kinds, each carrying only its own
//! hyperparameters. The JSON form is internally tagged by `type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Edge handling for convolution and pooling windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Output keeps `ceil(input / strides)` cells
    Same,
    /// Window never leaves the input
    Valid,
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Same => write!(f, "same"),
            Padding::Valid => write!(f, "valid"),
        }
    }
}

/// One stage of a CNN architecture
///
/// Hyperparameters are signed so that documents carrying zero or negative
/// values still load and can be reported by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    #[serde(rename = "Conv2D", rename_all = "camelCase")]
    Conv2d {
        filters: i64,
        kernel_size: i64,
        strides: i64,
        padding: Padding,
    },

    #[serde(rename = "ReLU")]
    Relu,

    #[serde(rename = "MaxPooling2D", rename_all = "camelCase")]
    MaxPooling2d {
        pool_size: i64,
        strides: i64,
        padding: Padding,
    },

    BatchNormalization,

    Dropout { rate: f64 },

    Flatten,

    Dense { units: i64 },

    Softmax,
}

impl Layer {
    pub fn conv2d(filters: i64, kernel_size: i64, strides: i64, padding: Padding) -> Self {
        Layer::Conv2d {
            filters,
            kernel_size,
            strides,
            padding,
        }
    }

    pub fn max_pooling2d(pool_size: i64, strides: i64, padding: Padding) -> Self {
        Layer::MaxPooling2d {
            pool_size,
            strides,
            padding,
        }
    }

    pub fn dropout(rate: f64) -> Self {
        Layer::Dropout { rate }
    }

    pub fn dense(units: i64) -> Self {
        Layer::Dense { units }
    }

    /// Get the kind of this layer
    pub fn layer_type(&self) -> LayerType {
        match self {
            Layer::Conv2d { .. } => LayerType::Conv2d,
            Layer::Relu => LayerType::Relu,
            Layer::MaxPooling2d { .. } => LayerType::MaxPooling2d,
            Layer::BatchNormalization => LayerType::BatchNormalization,
            Layer::Dropout { .. } => LayerType::Dropout,
            Layer::Flatten => LayerType::Flatten,
            Layer::Dense { .. } => LayerType::Dense,
            Layer::Softmax => LayerType::Softmax,
        }
    }

    /// Check whether this layer is of the given kind
    pub fn is(&self, layer_type: LayerType) -> bool {
        self.layer_type() == layer_type
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Conv2d {
                filters,
                kernel_size,
                strides,
                padding,
            } => write!(
                f,
                "Conv2D(filters={}, kernelSize={}, strides={}, padding={})",
                filters, kernel_size, strides, padding
            ),
            Layer::MaxPooling2d {
                pool_size,
                strides,
                padding,
            } => write!(
                f,
                "MaxPooling2D(poolSize={}, strides={}, padding={})",
                pool_size, strides, padding
            ),
            Layer::Dropout { rate } => write!(f, "Dropout(rate={})", rate),
            Layer::Dense { units } => write!(f, "Dense(units={})", units),
            other => write!(f, "{}", other.layer_type()),
        }
    }
}

/// Field-less tag of a [`Layer`]
///
/// Declaration order is the order used by layer pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerType {
    #[serde(rename = "Conv2D")]
    Conv2d,
    #[serde(rename = "ReLU")]
    Relu,
    #[serde(rename = "MaxPooling2D")]
    MaxPooling2d,
    BatchNormalization,
    Dropout,
    Flatten,
    Dense,
    Softmax,
}

impl LayerType {
    /// Every layer kind, in picker order
    pub const ALL: [LayerType; 8] = [
        LayerType::Conv2d,
        LayerType::Relu,
        LayerType::MaxPooling2d,
        LayerType::BatchNormalization,
        LayerType::Dropout,
        LayerType::Flatten,
        LayerType::Dense,
        LayerType::Softmax,
    ];

    /// Wire tag used in model documents and messages
    pub fn name(&self) -> &'static str {
        match self {
            LayerType::Conv2d => "Conv2D",
            LayerType::Relu => "ReLU",
            LayerType::MaxPooling2d => "MaxPooling2D",
            LayerType::BatchNormalization => "BatchNormalization",
            LayerType::Dropout => "Dropout",
            LayerType::Flatten => "Flatten",
            LayerType::Dense => "Dense",
            LayerType::Softmax => "Softmax",
        }
    }

    /// Kinds that operate on 2D feature maps and cannot follow Flatten
    pub fn is_spatial(&self) -> bool {
        matches!(self, LayerType::Conv2d | LayerType::MaxPooling2d)
    }

    /// Layer with the editor's default hyperparameters
    pub fn default_layer(&self) -> Layer {
        match self {
            LayerType::Conv2d => Layer::conv2d(8, 3, 1, Padding::Same),
            LayerType::Relu => Layer::Relu,
            LayerType::MaxPooling2d => Layer::max_pooling2d(2, 2, Padding::Same),
            LayerType::BatchNormalization => Layer::BatchNormalization,
            LayerType::Dropout => Layer::dropout(0.25),
            LayerType::Flatten => Layer::Flatten,
            LayerType::Dense => Layer::dense(64),
            LayerType::Softmax => Layer::Softmax,
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayerType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let layer_type = match lower.as_str() {
            "conv2d" => LayerType::Conv2d,
            "relu" => LayerType::Relu,
            "maxpooling2d" | "maxpool2d" => LayerType::MaxPooling2d,
            "batchnormalization" | "batchnorm" => LayerType::BatchNormalization,
            "dropout" => LayerType::Dropout,
            "flatten" => LayerType::Flatten,
            "dense" => LayerType::Dense,
            "softmax" => LayerType::Softmax,
            _ => {
                return Err(BuilderError::UnknownLayerType {
                    name: s.to_string(),
                })
            }
        };
        Ok(layer_type)
    }
}
