//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the single use case of the application: predict from form answers.

mod inference;

pub use inference::PredictionService;
