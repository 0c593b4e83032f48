use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Disease, SeriesSlot};

/// One backend row: the number of cases of a disease recorded on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub disease: Disease,
    pub cases: u64,
}

impl CaseRecord {
    #[must_use]
    pub const fn new(date: NaiveDate, disease: Disease, cases: u64) -> Self {
        Self {
            date,
            disease,
            cases,
        }
    }
}

/// Per-date pair of values for the two selected series.
///
/// `None` means no record exists for that series on that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub value_a: Option<u64>,
    pub value_b: Option<u64>,
}

impl DateBucket {
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            value_a: None,
            value_b: None,
        }
    }

    #[must_use]
    pub const fn value(&self, slot: SeriesSlot) -> Option<u64> {
        match slot {
            SeriesSlot::A => self.value_a,
            SeriesSlot::B => self.value_b,
        }
    }

    /// Value drawn for `slot`; absent values render as zero.
    #[must_use]
    pub fn value_or_zero(&self, slot: SeriesSlot) -> u64 {
        self.value(slot).unwrap_or(0)
    }

    pub(crate) fn slot_mut(&mut self, slot: SeriesSlot) -> &mut Option<u64> {
        match slot {
            SeriesSlot::A => &mut self.value_a,
            SeriesSlot::B => &mut self.value_b,
        }
    }
}
