//! CNN Builder - MNIST CNN architecture validation and shape inference
//!
//! CNN Builder checks declarative layer sequences before they are handed to
//! a training backend:
//! 1. Sequence validation - structural errors, parameter errors, warnings
//! 2. Training readiness - the stricter gate before training starts
//! 3. Next-layer advice - phase-aware recommendations
//! 4. Shape propagation - output dimensions per layer and a parameter estimate
//!
//! # Architecture
//!
//! The four queries are pure functions over a layer slice with no hidden
//! state. File interchange, the editing session and the training boundary sit
//! around them and call them on every change.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod layers;
pub mod shape;
pub mod training;
pub mod validation;

pub use error::{BuilderError, Result};
pub use layers::{Layer, LayerSequence, LayerType, Padding};
pub use shape::{propagate, Dimensions};
pub use validation::{recommend, validate, validate_for_training, ValidationResult};
