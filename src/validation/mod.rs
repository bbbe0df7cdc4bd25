//! Architecture validation
//!
//! Pure functions recomputed from scratch on every observed sequence:
//! - `validate` - structural and hyperparameter checks with warnings
//! - `validate_for_training` - the stricter gate before training
//! - `recommend` - layer kinds that fit after the current last layer

mod advisor;
mod result;
mod sequence;
mod training;

pub use advisor::{is_recommended, recommend};
pub use result::ValidationResult;
pub use sequence::validate;
pub use training::validate_for_training;
