//! Shape inference
//!
//! Output dimensions per layer and a rough parameter estimate, used for the
//! architecture view. Independent of validation: invalid sequences still
//! propagate.

mod dimensions;
mod params;
mod propagate;

pub use dimensions::{Dimensions, LayerShape};
pub use params::{estimate_parameters, format_parameter_count, DENSE_FAN_IN_ESTIMATE};
pub use propagate::propagate;

use serde::Serialize;

use crate::layers::Layer;

/// Headline numbers for an architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSummary {
    /// Layer count including the input
    pub total_layers: usize,
    pub output_shape: String,
    pub parameters: String,
}

impl ArchitectureSummary {
    pub fn of(layers: &[Layer]) -> Self {
        let shapes = propagate(layers);
        let output_shape = match shapes.last() {
            Some(last) if shapes.len() > 1 => last.dims.to_string(),
            _ => "28×28×1".to_string(),
        };

        Self {
            total_layers: layers.len() + 1,
            output_shape,
            parameters: format_parameter_count(estimate_parameters(layers)),
        }
    }
}
