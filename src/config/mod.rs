//! Model documents and training settings
//!
//! Provides the JSON interchange document and file load/save.

mod document;
mod settings;

pub use document::{ModelConfig, ModelMetadata, ARCHITECTURE_ONLY};
pub use settings::{limits, Optimizer, TrainingSettings};
