//! Predictor port: Trait for the pre-trained classifier.
//!
//! This trait hides the artifact format from the application logic. The
//! classifier is treated as a black box that turns one encoded row into a
//! class code.

use crate::domain::{CategoricalEncoding, EncodedRecord};

/// Error raised by a predictor while scoring a row.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Classifier produced a non-finite score for class {class}")]
    NonFiniteScore { class: i64 },

    #[error("Classifier has no classes")]
    NoClasses,
}

/// Trait for classifier inference.
///
/// Implementations are read-only after construction and shared across the
/// application through `Arc`.
pub trait Predictor: Send + Sync {
    /// Predict the class code for a single encoded row.
    ///
    /// # Errors
    /// Returns `PredictError` if the row cannot be scored.
    fn predict(&self, row: &EncodedRecord) -> Result<i64, PredictError>;

    /// Categorical encoding this predictor was trained against.
    fn categorical_encoding(&self) -> CategoricalEncoding {
        CategoricalEncoding::Reindexed
    }
}
