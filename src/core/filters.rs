use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Disease, DiseasePair};

/// Filter values produced by the dashboard form.
///
/// The date bounds are applied by the record source; aggregation trusts
/// whatever range the source returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub disease_a: Disease,
    pub disease_b: Disease,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FilterSelection {
    #[must_use]
    pub fn new(disease_a: Disease, disease_b: Disease) -> Self {
        Self {
            disease_a,
            disease_b,
            start_date: None,
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_date_range(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn pair(&self) -> DiseasePair {
        DiseasePair::new(self.disease_a, self.disease_b)
    }

    /// Returns `true` when both bounds are set and the start lies after the end.
    ///
    /// Such a range is still forwarded to the source, which answers with an
    /// empty record set.
    #[must_use]
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }
}

impl Default for FilterSelection {
    /// Flu against COVID-19 over 2019-01-01..=2023-12-31.
    fn default() -> Self {
        Self {
            disease_a: Disease::Flu,
            disease_b: Disease::Covid19,
            start_date: NaiveDate::from_ymd_opt(2019, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31),
        }
    }
}
