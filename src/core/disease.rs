use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Diseases tracked by the case-count backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "Flu")]
    Flu,
    #[serde(rename = "COVID-19")]
    Covid19,
    #[serde(rename = "Measles")]
    Measles,
    #[serde(rename = "Malaria")]
    Malaria,
}

impl Disease {
    pub const ALL: [Self; 4] = [Self::Flu, Self::Covid19, Self::Measles, Self::Malaria];

    /// Wire name used by the backend and shown in the legend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flu => "Flu",
            Self::Covid19 => "COVID-19",
            Self::Measles => "Measles",
            Self::Malaria => "Malaria",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disease {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|disease| disease.as_str() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown disease `{value}`")))
    }
}

/// Which of the two compared series a value or primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesSlot {
    A,
    B,
}

impl SeriesSlot {
    pub const BOTH: [Self; 2] = [Self::A, Self::B];

    /// Position of the slot inside a date group, left to right.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// The two diseases selected for comparison.
///
/// Both slots may hold the same disease; the pair is rendered as two series
/// regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseasePair {
    pub a: Disease,
    pub b: Disease,
}

impl DiseasePair {
    #[must_use]
    pub const fn new(a: Disease, b: Disease) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub const fn get(self, slot: SeriesSlot) -> Disease {
        match slot {
            SeriesSlot::A => self.a,
            SeriesSlot::B => self.b,
        }
    }

    #[must_use]
    pub fn contains(self, disease: Disease) -> bool {
        self.a == disease || self.b == disease
    }

    #[must_use]
    pub fn is_same_disease(self) -> bool {
        self.a == self.b
    }
}

impl Default for DiseasePair {
    fn default() -> Self {
        Self::new(Disease::Flu, Disease::Covid19)
    }
}
