//! Parameter-count estimate
//!
//! Conv2D counts are exact: `(k² × input_depth + 1) × filters`. Dense uses a
//! fixed `units × 100` stand-in instead of the true fan-in from the previous
//! layer. Existing displays depend on these numbers, so the approximation is
//! kept as is. Sums saturate at the `i64` bounds.

use crate::layers::Layer;

/// Placeholder fan-in used for every Dense layer
pub const DENSE_FAN_IN_ESTIMATE: i64 = 100;

/// Estimated trainable parameter count of a sequence
pub fn estimate_parameters(layers: &[Layer]) -> i64 {
    let mut total: i64 = 0;
    let mut input_depth: i64 = 1;

    for layer in layers {
        match layer {
            Layer::Conv2d {
                filters,
                kernel_size,
                ..
            } => {
                let per_filter = kernel_size
                    .saturating_mul(*kernel_size)
                    .saturating_mul(input_depth)
                    .saturating_add(1);
                total = total.saturating_add(per_filter.saturating_mul(*filters));
                input_depth = *filters;
            }
            Layer::Dense { units } => {
                total = total.saturating_add(units.saturating_mul(DENSE_FAN_IN_ESTIMATE));
            }
            _ => {}
        }
    }

    total
}

/// Compact display form: `950`, `12.3K`, `1.2M`
pub fn format_parameter_count(count: i64) -> String {
    if count < 1_000 {
        count.to_string()
    } else if count < 1_000_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    }
}
