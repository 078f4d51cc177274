//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the externally trained classifier.

mod predictor;

pub use predictor::{PredictError, Predictor};
