//! # Obesity Risk
//!
//! Terminal form that estimates obesity risk with a pre-trained classifier.
//!
//! This crate provides:
//! - Typed lifestyle answers and their encoding into the model schema
//! - Loading of the externally trained classifier artifact
//! - Terminal UI with a sidebar of fixed-range inputs
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (FeatureRecord, EncodedRecord, Prediction)
//! - `ports`: Trait definitions for external operations (Predictor)
//! - `adapters`: Concrete implementations (exported linear model)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface
//! - `logging`: Log sink selection and subscriber setup

pub mod adapters;
pub mod application;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod tui;

pub use domain::{map_prediction, FeatureRecord, ObesityRisk, Prediction};

/// Result type for obesity risk operations
pub type Result<T> = std::result::Result<T, ObesityError>;

/// Main error type for obesity risk operations
#[derive(Debug, thiserror::Error)]
pub enum ObesityError {
    #[error("Failed to load model: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Model is not loaded properly.")]
    ModelNotLoaded,

    #[error("Prediction failed: {0}")]
    Predict(#[from] ports::PredictError),
}
