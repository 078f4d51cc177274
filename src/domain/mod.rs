//! Domain layer: Core types and pure logic.
//!
//! Nothing in here touches the filesystem or the terminal.

pub mod encoding;
mod features;
mod prediction;

pub use encoding::{CategoricalEncoding, EncodedRecord, FEATURE_COUNT, FEATURE_NAMES};
pub use features::{Category, FeatureRecord, Frequency, Gender, Transport, YesNo};
pub use prediction::{map_prediction, ObesityRisk, Prediction, UNKNOWN_LABEL};
