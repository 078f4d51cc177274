//! Lifestyle feature types for obesity risk estimation.
//!
//! Mirrors the columns of the obesity-levels survey the classifier was trained
//! on: eight numeric answers and eight categorical answers.

use serde::{Deserialize, Serialize};

/// A categorical answer with a fixed, ordered option list.
///
/// The option order is the order shown in the form and the index used by
/// ordinal encoding.
pub trait Category: Copy + PartialEq + 'static {
    /// All options, in display order.
    const ALL: &'static [Self];

    /// Text shown in the form and used in indicator column names.
    fn label(self) -> &'static str;

    /// Position of this option within [`Category::ALL`].
    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Option at `index`, falling back to the first option.
    fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::ALL[0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Category for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Binary answer (family history, smoking, alcohol, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[default]
    No,
    Yes,
}

impl Category for YesNo {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

/// How often something happens (snacking between meals, sweetened food).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    No,
    Sometimes,
    Frequently,
}

impl Category for Frequency {
    const ALL: &'static [Self] = &[Self::No, Self::Sometimes, Self::Frequently];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Sometimes => "Sometimes",
            Self::Frequently => "Frequently",
        }
    }
}

/// Usual transportation to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transport {
    #[default]
    Car,
    PublicTransport,
    Walking,
    Bicycle,
}

impl Category for Transport {
    const ALL: &'static [Self] = &[
        Self::Car,
        Self::PublicTransport,
        Self::Walking,
        Self::Bicycle,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::PublicTransport => "Public Transport",
            Self::Walking => "Walking",
            Self::Bicycle => "Bicycle",
        }
    }
}

/// One row of raw answers, built fresh from the form for each prediction.
///
/// Field names follow the survey column codes:
/// FAVC (high caloric food), FCVC (vegetables), NCP (main meals),
/// CAEC (food between meals), CH2O, SCC, FAF (physical activity),
/// TUE (time spent in activity), CALC (alcohol), MTRANS (transport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub gender: Gender,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub hist_overweight: YesNo,
    pub favc: YesNo,
    pub fcvc: f64,
    pub ncp: f64,
    pub caec: Frequency,
    pub smoke: YesNo,
    pub ch2o: f64,
    pub scc: Frequency,
    pub faf: f64,
    pub tue: f64,
    pub calc: YesNo,
    pub mtrans: Transport,
}

impl Default for FeatureRecord {
    /// The form's initial widget values.
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age: 23.0,
            height: 160.0,
            weight: 70.0,
            hist_overweight: YesNo::No,
            favc: YesNo::No,
            fcvc: 2.0,
            ncp: 2.0,
            caec: Frequency::No,
            smoke: YesNo::No,
            ch2o: 2.0,
            scc: Frequency::No,
            faf: 1.0,
            tue: 60.0,
            calc: YesNo::No,
            mtrans: Transport::Car,
        }
    }
}

impl FeatureRecord {
    /// Categorical answers as `(column, option label, option index)`, in
    /// schema order.
    #[must_use]
    pub fn categorical_values(&self) -> [(&'static str, &'static str, usize); 8] {
        [
            ("Gender", self.gender.label(), self.gender.index()),
            (
                "HIST_OVERWEIGHT",
                self.hist_overweight.label(),
                self.hist_overweight.index(),
            ),
            ("FAVC", self.favc.label(), self.favc.index()),
            ("CAEC", self.caec.label(), self.caec.index()),
            ("SMOKE", self.smoke.label(), self.smoke.index()),
            ("SCC", self.scc.label(), self.scc.index()),
            ("CALC", self.calc.label(), self.calc.index()),
            ("MTRANS", self.mtrans.label(), self.mtrans.index()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_index_roundtrip() {
        for t in Transport::ALL {
            assert_eq!(Transport::from_index(t.index()), *t);
        }
        assert_eq!(Frequency::Frequently.index(), 2);
        assert_eq!(Gender::from_index(99), Gender::Male);
    }

    #[test]
    fn test_categorical_values_order() {
        let record = FeatureRecord {
            mtrans: Transport::PublicTransport,
            ..Default::default()
        };
        let cols: Vec<&str> = record.categorical_values().iter().map(|c| c.0).collect();
        assert_eq!(
            cols,
            ["Gender", "HIST_OVERWEIGHT", "FAVC", "CAEC", "SMOKE", "SCC", "CALC", "MTRANS"]
        );
        assert_eq!(record.categorical_values()[7], ("MTRANS", "Public Transport", 1));
    }
}
