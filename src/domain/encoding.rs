//! Schema encoding: turns a [`FeatureRecord`] into the fixed 16-column row
//! the classifier expects.
//!
//! The training pipeline one-hot expanded the categorical answers and then
//! aligned the frame against the pre-expansion column names. Indicator
//! columns such as `Gender_Male` never match a schema name, so they are
//! dropped and every categorical schema column ends up 0. Artifacts trained
//! that way expect [`CategoricalEncoding::Reindexed`]; the encoder reproduces
//! it explicitly and reports the dropped indicators instead of hiding them.

use serde::{Deserialize, Serialize};

use super::features::FeatureRecord;

/// Number of columns in the model schema.
pub const FEATURE_COUNT: usize = 16;

/// Model schema, in column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Gender",
    "Age",
    "Height",
    "Weight",
    "HIST_OVERWEIGHT",
    "FAVC",
    "FCVC",
    "NCP",
    "CAEC",
    "SMOKE",
    "CH2O",
    "SCC",
    "FAF",
    "TUE",
    "CALC",
    "MTRANS",
];

/// Schema positions holding categorical answers.
pub const CATEGORICAL_COLUMNS: [usize; 8] = [0, 4, 5, 8, 9, 11, 14, 15];

/// How categorical answers are written into their schema columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalEncoding {
    /// One-hot expansion then alignment by name: indicators are dropped and
    /// categorical columns are zero-filled.
    #[default]
    Reindexed,
    /// Option index (0-based, form order) written into the column.
    Ordinal,
}

/// A row aligned to [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedRecord {
    values: [f64; FEATURE_COUNT],
}

impl EncodedRecord {
    /// Encode a record field by field.
    #[must_use]
    pub fn encode(record: &FeatureRecord, encoding: CategoricalEncoding) -> Self {
        let categorical = |index: usize| match encoding {
            CategoricalEncoding::Reindexed => 0.0,
            CategoricalEncoding::Ordinal => index as f64,
        };

        let c = record.categorical_values();
        let values = [
            categorical(c[0].2),
            record.age,
            record.height,
            record.weight,
            categorical(c[1].2),
            categorical(c[2].2),
            record.fcvc,
            record.ncp,
            categorical(c[3].2),
            categorical(c[4].2),
            record.ch2o,
            categorical(c[5].2),
            record.faf,
            record.tue,
            categorical(c[6].2),
            categorical(c[7].2),
        ];

        Self { values }
    }

    /// Column values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Value of a named column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|name| *name == column)
            .map(|i| self.values[i])
    }

    /// `(column, value)` pairs in schema order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Values of the categorical columns, in schema order.
    #[must_use]
    pub fn categorical_values(&self) -> [f64; 8] {
        CATEGORICAL_COLUMNS.map(|i| self.values[i])
    }
}

/// Names of the one-hot indicators set by a single row, one per categorical
/// answer, e.g. `MTRANS_Public Transport`.
#[must_use]
pub fn indicator_columns(record: &FeatureRecord) -> Vec<String> {
    record
        .categorical_values()
        .iter()
        .map(|(column, label, _)| format!("{column}_{label}"))
        .collect()
}

/// Indicator columns that do not survive alignment under `encoding`.
#[must_use]
pub fn dropped_indicators(
    record: &FeatureRecord,
    encoding: CategoricalEncoding,
) -> Vec<String> {
    match encoding {
        CategoricalEncoding::Reindexed => indicator_columns(record)
            .into_iter()
            .filter(|name| !FEATURE_NAMES.contains(&name.as_str()))
            .collect(),
        CategoricalEncoding::Ordinal => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{Category, Frequency, Gender, Transport, YesNo};

    fn all_records() -> Vec<FeatureRecord> {
        let mut out = Vec::new();
        for gender in Gender::ALL {
            for yn in YesNo::ALL {
                for freq in Frequency::ALL {
                    for mtrans in Transport::ALL {
                        out.push(FeatureRecord {
                            gender: *gender,
                            hist_overweight: *yn,
                            favc: *yn,
                            caec: *freq,
                            smoke: *yn,
                            scc: *freq,
                            calc: *yn,
                            mtrans: *mtrans,
                            ..Default::default()
                        });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_encoded_columns_match_schema_order() {
        for record in all_records() {
            for encoding in [CategoricalEncoding::Reindexed, CategoricalEncoding::Ordinal] {
                let encoded = EncodedRecord::encode(&record, encoding);
                let names: Vec<&str> = encoded.columns().map(|(n, _)| n).collect();
                assert_eq!(names, FEATURE_NAMES);
            }
        }
    }

    #[test]
    fn test_default_categoricals_are_zero_when_reindexed() {
        let record = FeatureRecord {
            hist_overweight: YesNo::No,
            ..Default::default()
        };
        let encoded = EncodedRecord::encode(&record, CategoricalEncoding::Reindexed);
        assert_eq!(encoded.categorical_values(), [0.0; 8]);
    }

    #[test]
    fn test_reindexed_drops_every_indicator() {
        for record in all_records() {
            let encoded = EncodedRecord::encode(&record, CategoricalEncoding::Reindexed);
            assert_eq!(encoded.categorical_values(), [0.0; 8]);
            assert_eq!(
                dropped_indicators(&record, CategoricalEncoding::Reindexed).len(),
                8
            );
        }
    }

    #[test]
    fn test_numeric_columns_pass_through() {
        let record = FeatureRecord {
            age: 31.0,
            ch2o: 3.25,
            tue: 120.0,
            ..Default::default()
        };
        let encoded = EncodedRecord::encode(&record, CategoricalEncoding::Reindexed);
        assert_eq!(encoded.get("Age"), Some(31.0));
        assert_eq!(encoded.get("CH2O"), Some(3.25));
        assert_eq!(encoded.get("TUE"), Some(120.0));
        assert_eq!(encoded.get("Height"), Some(160.0));
        assert_eq!(encoded.get("Gender_Male"), None);
    }

    #[test]
    fn test_ordinal_encoding_uses_option_index() {
        let record = FeatureRecord {
            gender: Gender::Female,
            caec: Frequency::Frequently,
            mtrans: Transport::Bicycle,
            ..Default::default()
        };
        let encoded = EncodedRecord::encode(&record, CategoricalEncoding::Ordinal);
        assert_eq!(encoded.get("Gender"), Some(1.0));
        assert_eq!(encoded.get("CAEC"), Some(2.0));
        assert_eq!(encoded.get("MTRANS"), Some(3.0));
        assert_eq!(encoded.get("SMOKE"), Some(0.0));
        assert!(dropped_indicators(&record, CategoricalEncoding::Ordinal).is_empty());
    }

    #[test]
    fn test_indicator_names() {
        let record = FeatureRecord {
            mtrans: Transport::PublicTransport,
            ..Default::default()
        };
        let names = indicator_columns(&record);
        assert_eq!(names[0], "Gender_Male");
        assert_eq!(names[1], "HIST_OVERWEIGHT_No");
        assert_eq!(names[7], "MTRANS_Public Transport");
    }
}
