//! Linear adapter: Implementation of Predictor for exported linear models.
//!
//! The training pipeline exports a multinomial linear classifier as JSON:
//! one weight row and bias per class, an optional standard scaler, and the
//! categorical encoding the model was trained against. Inference standardizes
//! the row, scores each class and returns the code with the highest score.
//!
//! # Loading
//!
//! The artifact lives at a fixed path. A missing file and a zero-length file
//! are reported as the same error; startup halts on either. A file that
//! exists but does not describe a model over the 16-column schema is rejected
//! with a format error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{CategoricalEncoding, EncodedRecord, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{PredictError, Predictor};

/// Fixed location of the model artifact, relative to the working directory.
pub const MODEL_PATH: &str = "models/best_model.json";

/// Artifact format version understood by this adapter.
const FORMAT_VERSION: u32 = 1;

/// Error type for artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model file not found or is empty.")]
    MissingOrEmpty { path: PathBuf },

    #[error("Failed to read model file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model file: {0}")]
    Format(String),
}

impl From<serde_json::Error> for ArtifactError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
    #[serde(default)]
    pub categorical_encoding: CategoricalEncoding,
}

impl ExportedLinearModel {
    fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::Format(format!(
                "unsupported format_version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }

        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(got, want)| got != want)
        {
            return Err(ArtifactError::Format(format!(
                "feature_names must be {:?}, got {:?}",
                FEATURE_NAMES, self.feature_names
            )));
        }

        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(ArtifactError::Format("classes is empty".into()));
        }
        if self.coefficients.len() != n_classes || self.intercepts.len() != n_classes {
            return Err(ArtifactError::Format(format!(
                "expected {n_classes} coefficient rows and intercepts, got {} and {}",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        if let Some(row) = self.coefficients.iter().find(|r| r.len() != FEATURE_COUNT) {
            return Err(ArtifactError::Format(format!(
                "coefficient row has {} weights, expected {FEATURE_COUNT}",
                row.len()
            )));
        }

        match (&self.scaler_mean, &self.scaler_scale) {
            (None, None) => {}
            (Some(mean), Some(scale)) => {
                if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
                    return Err(ArtifactError::Format(
                        "scaler_mean and scaler_scale must have one entry per feature".into(),
                    ));
                }
                if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                    return Err(ArtifactError::Format(
                        "scaler_scale entries must be finite and non-zero".into(),
                    ));
                }
            }
            _ => {
                return Err(ArtifactError::Format(
                    "scaler_mean and scaler_scale must be given together".into(),
                ))
            }
        }

        Ok(())
    }
}

/// Predictor backed by an exported linear model.
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    model: ExportedLinearModel,
}

impl LinearPredictor {
    /// Load the artifact from `path`.
    ///
    /// # Errors
    /// Returns `ArtifactError::MissingOrEmpty` if the file does not exist or
    /// has zero length, `ArtifactError::Format` if it is not a valid model.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let missing = || ArtifactError::MissingOrEmpty {
            path: path.to_path_buf(),
        };

        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing()),
            Err(source) => {
                return Err(ArtifactError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if !metadata.is_file() || metadata.len() == 0 {
            return Err(missing());
        }

        let content = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: ExportedLinearModel = serde_json::from_slice(&content)?;
        let predictor = Self::from_model(model)?;

        tracing::info!(
            "Loaded model from {:?} (classes={:?}, scaled={}, encoding={:?})",
            path,
            predictor.model.classes,
            predictor.model.scaler_mean.is_some(),
            predictor.model.categorical_encoding
        );

        Ok(predictor)
    }

    /// Build a predictor from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ArtifactError::Format` if the parameters do not fit the schema.
    pub fn from_model(model: ExportedLinearModel) -> Result<Self, ArtifactError> {
        model.validate()?;
        Ok(Self { model })
    }

    /// Class codes this model can emit, in output order.
    #[must_use]
    pub fn classes(&self) -> &[i64] {
        &self.model.classes
    }

    fn standardized(&self, row: &EncodedRecord) -> [f64; FEATURE_COUNT] {
        let mut x = *row.values();
        if let (Some(mean), Some(scale)) = (&self.model.scaler_mean, &self.model.scaler_scale) {
            for (i, v) in x.iter_mut().enumerate() {
                *v = (*v - mean[i]) / scale[i];
            }
        }
        x
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, row: &EncodedRecord) -> Result<i64, PredictError> {
        let x = self.standardized(row);

        let mut best: Option<(i64, f64)> = None;
        for ((class, weights), intercept) in self
            .model
            .classes
            .iter()
            .zip(&self.model.coefficients)
            .zip(&self.model.intercepts)
        {
            let score = intercept + weights.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>();
            if !score.is_finite() {
                return Err(PredictError::NonFiniteScore { class: *class });
            }
            // First class wins ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*class, score));
            }
        }

        tracing::debug!("Linear scores computed, best={:?}", best);
        best.map(|(class, _)| class).ok_or(PredictError::NoClasses)
    }

    fn categorical_encoding(&self) -> CategoricalEncoding {
        self.model.categorical_encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureRecord;
    use tempfile::tempdir;

    /// Four classes keyed on weight: each class prefers a weight band.
    fn weight_banded_model() -> ExportedLinearModel {
        let weight_col = FEATURE_NAMES.iter().position(|n| *n == "Weight").unwrap_or(3);
        let mut coefficients = vec![vec![0.0; FEATURE_COUNT]; 4];
        for (k, row) in coefficients.iter_mut().enumerate() {
            row[weight_col] = k as f64;
        }
        ExportedLinearModel {
            format_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: vec![1, 2, 3, 4],
            coefficients,
            // Thresholds at weight 60, 80 and 100.
            intercepts: vec![0.0, -60.0, -140.0, -240.0],
            scaler_mean: None,
            scaler_scale: None,
            categorical_encoding: CategoricalEncoding::Reindexed,
        }
    }

    fn write_model(path: &Path, model: &ExportedLinearModel) {
        let json = serde_json::to_string(model).expect("serialize model");
        std::fs::write(path, json).expect("write model");
    }

    fn row(weight: f64) -> EncodedRecord {
        let record = FeatureRecord {
            weight,
            ..Default::default()
        };
        EncodedRecord::encode(&record, CategoricalEncoding::Reindexed)
    }

    #[test]
    fn test_missing_file_is_reported() {
        let temp = tempdir().expect("tempdir");
        let err = LinearPredictor::load(&temp.path().join("best_model.json"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ArtifactError::MissingOrEmpty { .. }));
        assert_eq!(err.to_string(), "Model file not found or is empty.");
    }

    #[test]
    fn test_empty_file_matches_missing_file() {
        let temp = tempdir().expect("tempdir");
        let empty = temp.path().join("best_model.json");
        std::fs::write(&empty, b"").expect("write empty");

        let empty_err = LinearPredictor::load(&empty).expect_err("empty file must fail");
        let missing_err = LinearPredictor::load(&temp.path().join("absent.json"))
            .expect_err("missing file must fail");

        assert!(matches!(empty_err, ArtifactError::MissingOrEmpty { .. }));
        assert_eq!(empty_err.to_string(), missing_err.to_string());
    }

    #[test]
    fn test_directory_is_not_a_model() {
        let temp = tempdir().expect("tempdir");
        let err = LinearPredictor::load(temp.path()).expect_err("directory must fail");
        assert!(matches!(err, ArtifactError::MissingOrEmpty { .. }));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("best_model.json");
        std::fs::write(&path, b"\x80\x04\x95 not json").expect("write");
        let err = LinearPredictor::load(&path).expect_err("garbage must fail");
        assert!(matches!(err, ArtifactError::Format(_)));
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let mut model = weight_banded_model();
        model.feature_names.swap(0, 1);
        assert!(matches!(
            LinearPredictor::from_model(model),
            Err(ArtifactError::Format(_))
        ));

        let mut model = weight_banded_model();
        model.intercepts.pop();
        assert!(LinearPredictor::from_model(model).is_err());

        let mut model = weight_banded_model();
        model.scaler_mean = Some(vec![0.0; FEATURE_COUNT]);
        assert!(LinearPredictor::from_model(model).is_err());

        let mut model = weight_banded_model();
        model.format_version = 2;
        assert!(LinearPredictor::from_model(model).is_err());
    }

    #[test]
    fn test_load_and_predict() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("best_model.json");
        write_model(&path, &weight_banded_model());

        let predictor = LinearPredictor::load(&path).expect("model should load");
        assert_eq!(predictor.classes(), &[1, 2, 3, 4]);
        assert_eq!(predictor.predict(&row(50.0)).expect("predict"), 1);
        assert_eq!(predictor.predict(&row(70.0)).expect("predict"), 2);
        assert_eq!(predictor.predict(&row(90.0)).expect("predict"), 3);
        assert_eq!(predictor.predict(&row(140.0)).expect("predict"), 4);
    }

    #[test]
    fn test_scaler_applied_before_scoring() {
        let mut model = weight_banded_model();
        // Standardizing weight as (w - 100) / 1 shifts every band down by 100.
        let mut mean = vec![0.0; FEATURE_COUNT];
        mean[3] = 100.0;
        model.scaler_mean = Some(mean);
        model.scaler_scale = Some(vec![1.0; FEATURE_COUNT]);
        let predictor = LinearPredictor::from_model(model).expect("valid model");

        assert_eq!(predictor.predict(&row(150.0)).expect("predict"), 1);
        assert_eq!(predictor.predict(&row(190.0)).expect("predict"), 3);
    }

    fn two_class_model(classes: Vec<i64>, weight: f64) -> ExportedLinearModel {
        ExportedLinearModel {
            format_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes,
            coefficients: vec![vec![weight; FEATURE_COUNT], vec![0.0; FEATURE_COUNT]],
            intercepts: vec![0.5, 0.5],
            scaler_mean: None,
            scaler_scale: None,
            categorical_encoding: CategoricalEncoding::Reindexed,
        }
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let predictor =
            LinearPredictor::from_model(two_class_model(vec![3, 1], 0.0)).expect("valid model");
        assert_eq!(predictor.predict(&row(70.0)).expect("predict"), 3);
    }

    #[test]
    fn test_overflowing_score_is_an_error() {
        let predictor =
            LinearPredictor::from_model(two_class_model(vec![1, 2], 1e308)).expect("valid model");
        let err = predictor.predict(&row(70.0)).expect_err("score must overflow");
        assert!(matches!(err, PredictError::NonFiniteScore { class: 1 }));
    }

    #[test]
    fn test_encoding_defaults_to_reindexed() {
        let mut value = serde_json::to_value(weight_banded_model()).expect("to value");
        value
            .as_object_mut()
            .expect("object")
            .remove("categorical_encoding");
        let model: ExportedLinearModel = serde_json::from_value(value).expect("from value");
        let predictor = LinearPredictor::from_model(model).expect("valid model");
        assert_eq!(predictor.categorical_encoding(), CategoricalEncoding::Reindexed);
    }

    #[test]
    fn test_bundled_model_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(MODEL_PATH);
        let predictor = LinearPredictor::load(&path).expect("bundled model should load");
        let code = predictor.predict(&row(70.0)).expect("predict");
        assert!(predictor.classes().contains(&code));
    }
}
