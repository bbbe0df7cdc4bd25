//! Training boundary
//!
//! This module provides:
//! - The `Trainer` seam to an external training backend
//! - A cancellable, readiness-gated `TrainingSession`
//! - Training history in the model document's format

mod cancel;
mod history;
mod session;
mod trainer;

pub use cancel::CancelToken;
pub use history::{EpochMetrics, TrainingHistory};
pub use session::TrainingSession;
pub use trainer::{MockTrainer, Trainer};
