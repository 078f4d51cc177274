//! Prediction result types.
//!
//! The classifier emits an integer class code; this module maps it to the
//! risk level shown to the user.

use serde::{Deserialize, Serialize};

/// Label shown for codes the classifier should never emit.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Obesity risk level, one per class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObesityRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ObesityRisk {
    /// Risk level for a class code, if the code is known.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            4 => Some(Self::VeryHigh),
            _ => None,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Obesity Risk",
            Self::Moderate => "Moderate Obesity Risk",
            Self::High => "High Obesity Risk",
            Self::VeryHigh => "Very High Obesity Risk",
        }
    }
}

impl std::fmt::Display for ObesityRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a class code to its label, `"Unknown"` for unrecognized codes.
#[must_use]
pub fn map_prediction(code: i64) -> &'static str {
    ObesityRisk::from_code(code).map_or(UNKNOWN_LABEL, |risk| risk.label())
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw class code returned by the classifier
    pub code: i64,

    /// Risk level, `None` when the code is not recognized
    pub risk: Option<ObesityRisk>,

    /// When the prediction was made
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Create a prediction from a raw class code.
    #[must_use]
    pub fn new(code: i64) -> Self {
        Self {
            code,
            risk: ObesityRisk::from_code(code),
            created_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        map_prediction(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_prediction() {
        assert_eq!(map_prediction(1), "Low Obesity Risk");
        assert_eq!(map_prediction(2), "Moderate Obesity Risk");
        assert_eq!(map_prediction(3), "High Obesity Risk");
        assert_eq!(map_prediction(4), "Very High Obesity Risk");
        assert_eq!(map_prediction(99), "Unknown");
        assert_eq!(map_prediction(0), "Unknown");
        assert_eq!(map_prediction(-1), "Unknown");
    }

    #[test]
    fn test_prediction_creation() {
        let p = Prediction::new(3);
        assert_eq!(p.risk, Some(ObesityRisk::High));
        assert_eq!(p.label(), "High Obesity Risk");

        let unknown = Prediction::new(7);
        assert!(unknown.risk.is_none());
        assert_eq!(unknown.label(), UNKNOWN_LABEL);
    }
}
