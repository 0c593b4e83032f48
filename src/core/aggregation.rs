use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CaseRecord, DateBucket, DiseasePair, SeriesSlot};

/// Resolution rule for several records sharing one `(date, disease)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The record processed last replaces earlier ones.
    #[default]
    LastWins,
    /// Case counts are added together (saturating).
    Sum,
}

/// Groups `records` into one bucket per date for the selected pair.
///
/// Equivalent to [`aggregate_with_policy`] with [`DuplicatePolicy::LastWins`].
#[must_use]
pub fn aggregate(records: &[CaseRecord], pair: DiseasePair) -> Vec<DateBucket> {
    aggregate_with_policy(records, pair, DuplicatePolicy::LastWins)
}

/// Groups `records` into one bucket per date for the selected pair.
///
/// Records for diseases outside the pair are ignored. Buckets come back in
/// ascending calendar order and carry `None` for a series without a record on
/// that date. Date-range filtering is the record source's job and is not
/// repeated here.
#[must_use]
pub fn aggregate_with_policy(
    records: &[CaseRecord],
    pair: DiseasePair,
    policy: DuplicatePolicy,
) -> Vec<DateBucket> {
    let mut by_date: BTreeMap<_, DateBucket> = BTreeMap::new();
    let mut ignored = 0_usize;

    for record in records {
        if !pair.contains(record.disease) {
            ignored += 1;
            continue;
        }

        let bucket = by_date
            .entry(record.date)
            .or_insert_with(|| DateBucket::empty(record.date));
        // With a = b the record feeds both slots.
        for slot in SeriesSlot::BOTH {
            if pair.get(slot) == record.disease {
                merge_value(bucket.slot_mut(slot), record.cases, policy);
            }
        }
    }

    trace!(
        records = records.len(),
        ignored,
        buckets = by_date.len(),
        "aggregated case records"
    );
    by_date.into_values().collect()
}

fn merge_value(slot: &mut Option<u64>, cases: u64, policy: DuplicatePolicy) {
    *slot = match (policy, *slot) {
        (DuplicatePolicy::LastWins, _) | (DuplicatePolicy::Sum, None) => Some(cases),
        (DuplicatePolicy::Sum, Some(previous)) => Some(previous.saturating_add(cases)),
    };
}

/// Headline numbers derived from one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub bucket_count: usize,
    /// Largest value across both series, absent counted as zero.
    pub max_value: u64,
    pub total_a: u64,
    pub total_b: u64,
}

impl AggregationSummary {
    #[must_use]
    pub fn from_buckets(buckets: &[DateBucket]) -> Self {
        buckets.iter().fold(
            Self {
                bucket_count: buckets.len(),
                ..Self::default()
            },
            |mut summary, bucket| {
                let a = bucket.value_or_zero(SeriesSlot::A);
                let b = bucket.value_or_zero(SeriesSlot::B);
                summary.max_value = summary.max_value.max(a).max(b);
                summary.total_a = summary.total_a.saturating_add(a);
                summary.total_b = summary.total_b.saturating_add(b);
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{AggregationSummary, DuplicatePolicy, aggregate, aggregate_with_policy};
    use crate::core::{CaseRecord, Disease, DiseasePair};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn duplicate_policy_last_wins_keeps_latest_record() {
        let records = [
            CaseRecord::new(day(2021, 3, 1), Disease::Flu, 10),
            CaseRecord::new(day(2021, 3, 1), Disease::Flu, 7),
        ];
        let buckets = aggregate(&records, DiseasePair::new(Disease::Flu, Disease::Measles));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].value_a, Some(7));
        assert_eq!(buckets[0].value_b, None);
    }

    #[test]
    fn duplicate_policy_sum_adds_counts() {
        let records = [
            CaseRecord::new(day(2021, 3, 1), Disease::Flu, 10),
            CaseRecord::new(day(2021, 3, 1), Disease::Flu, 7),
            CaseRecord::new(day(2021, 3, 1), Disease::Measles, u64::MAX),
            CaseRecord::new(day(2021, 3, 1), Disease::Measles, 1),
        ];
        let buckets = aggregate_with_policy(
            &records,
            DiseasePair::new(Disease::Flu, Disease::Measles),
            DuplicatePolicy::Sum,
        );
        assert_eq!(buckets[0].value_a, Some(17));
        assert_eq!(buckets[0].value_b, Some(u64::MAX));
    }

    #[test]
    fn same_disease_in_both_slots_fills_both_values() {
        let records = [CaseRecord::new(day(2020, 5, 1), Disease::Malaria, 42)];
        let buckets = aggregate(&records, DiseasePair::new(Disease::Malaria, Disease::Malaria));
        assert_eq!(buckets[0].value_a, Some(42));
        assert_eq!(buckets[0].value_b, Some(42));
    }

    #[test]
    fn summary_treats_absent_as_zero() {
        let records = [
            CaseRecord::new(day(2020, 1, 1), Disease::Flu, 100),
            CaseRecord::new(day(2020, 1, 1), Disease::Covid19, 50),
            CaseRecord::new(day(2020, 2, 1), Disease::Flu, 80),
        ];
        let summary = AggregationSummary::from_buckets(&aggregate(&records, DiseasePair::default()));
        assert_eq!(summary.bucket_count, 2);
        assert_eq!(summary.max_value, 100);
        assert_eq!(summary.total_a, 180);
        assert_eq!(summary.total_b, 50);
        assert_eq!(AggregationSummary::from_buckets(&[]), AggregationSummary::default());
    }
}
