//! Prediction service: Orchestrates single-row classifier inference.
//!
//! This service coordinates:
//! - Schema encoding of the form answers
//! - Classifier invocation
//! - Label mapping

use std::sync::Arc;

use crate::domain::{encoding, CategoricalEncoding, EncodedRecord, FeatureRecord, Prediction};
use crate::ports::Predictor;
use crate::ObesityError;

/// Service for running obesity risk predictions.
///
/// The predictor is injected at construction and only read afterwards.
pub struct PredictionService<P>
where
    P: Predictor,
{
    predictor: Option<Arc<P>>,
}

impl<P> PredictionService<P>
where
    P: Predictor,
{
    /// Create a service around a loaded predictor.
    pub fn new(predictor: Arc<P>) -> Self {
        Self {
            predictor: Some(predictor),
        }
    }

    /// Create a service with no predictor; every prediction fails with
    /// `ObesityError::ModelNotLoaded`.
    #[must_use]
    pub fn unloaded() -> Self {
        Self { predictor: None }
    }

    /// Categorical encoding used for preprocessing.
    #[must_use]
    pub fn categorical_encoding(&self) -> CategoricalEncoding {
        self.predictor
            .as_ref()
            .map(|p| p.categorical_encoding())
            .unwrap_or_default()
    }

    /// Encode a record the way the loaded predictor expects.
    #[must_use]
    pub fn preprocess(&self, record: &FeatureRecord) -> EncodedRecord {
        EncodedRecord::encode(record, self.categorical_encoding())
    }

    /// Indicator columns discarded while preprocessing `record`.
    #[must_use]
    pub fn dropped_indicators(&self, record: &FeatureRecord) -> Vec<String> {
        encoding::dropped_indicators(record, self.categorical_encoding())
    }

    /// Run a prediction on one record.
    ///
    /// # Errors
    /// Returns `ObesityError::ModelNotLoaded` without a predictor, or
    /// `ObesityError::Predict` if the classifier fails.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, ObesityError> {
        let predictor = self
            .predictor
            .as_ref()
            .ok_or(ObesityError::ModelNotLoaded)?;

        let row = EncodedRecord::encode(record, predictor.categorical_encoding());
        tracing::debug!("Encoded row: {:?}", row.values());

        let code = predictor.predict(&row)?;
        let prediction = Prediction::new(code);

        tracing::info!(
            "Prediction complete: code={}, label={}",
            prediction.code,
            prediction.label()
        );

        Ok(prediction)
    }
}
