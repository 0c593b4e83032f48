use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use epi_chart::core::{CaseRecord, Disease, DiseasePair, DuplicatePolicy, aggregate_with_policy};
use proptest::prelude::*;

fn disease_strategy() -> impl Strategy<Value = Disease> {
    prop::sample::select(Disease::ALL.to_vec())
}

fn record_strategy() -> impl Strategy<Value = CaseRecord> {
    (0u64..120, disease_strategy(), 0u64..5_000).prop_map(|(offset, disease, cases)| {
        let origin = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid origin");
        let date = origin
            .checked_add_days(Days::new(offset * 7))
            .expect("date in range");
        CaseRecord::new(date, disease, cases)
    })
}

proptest! {
    #[test]
    fn buckets_cover_exactly_the_dates_of_selected_records(
        records in prop::collection::vec(record_strategy(), 0..200),
        a in disease_strategy(),
        b in disease_strategy(),
    ) {
        let pair = DiseasePair::new(a, b);
        let buckets = aggregate_with_policy(&records, pair, DuplicatePolicy::LastWins);

        let expected: BTreeSet<NaiveDate> = records
            .iter()
            .filter(|record| pair.contains(record.disease))
            .map(|record| record.date)
            .collect();
        let actual: Vec<NaiveDate> = buckets.iter().map(|bucket| bucket.date).collect();

        prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
        prop_assert!(buckets.windows(2).all(|pair| pair[0].date < pair[1].date));
        prop_assert!(buckets.iter().all(|bucket| bucket.value_a.is_some() || bucket.value_b.is_some()));
    }

    #[test]
    fn last_wins_matches_final_record_per_key(
        records in prop::collection::vec(record_strategy(), 0..200),
        a in disease_strategy(),
        b in disease_strategy(),
    ) {
        let pair = DiseasePair::new(a, b);
        let buckets = aggregate_with_policy(&records, pair, DuplicatePolicy::LastWins);

        let mut latest: BTreeMap<(NaiveDate, Disease), u64> = BTreeMap::new();
        for record in &records {
            latest.insert((record.date, record.disease), record.cases);
        }

        for bucket in &buckets {
            prop_assert_eq!(bucket.value_a, latest.get(&(bucket.date, a)).copied());
            prop_assert_eq!(bucket.value_b, latest.get(&(bucket.date, b)).copied());
        }
    }

    #[test]
    fn sum_policy_preserves_per_series_totals(
        records in prop::collection::vec(record_strategy(), 0..200),
    ) {
        let pair = DiseasePair::new(Disease::Flu, Disease::Measles);
        let buckets = aggregate_with_policy(&records, pair, DuplicatePolicy::Sum);

        let total_for = |disease: Disease| -> u64 {
            records
                .iter()
                .filter(|record| record.disease == disease)
                .map(|record| record.cases)
                .sum()
        };
        let total_a: u64 = buckets.iter().filter_map(|bucket| bucket.value_a).sum();
        let total_b: u64 = buckets.iter().filter_map(|bucket| bucket.value_b).sum();

        prop_assert_eq!(total_a, total_for(Disease::Flu));
        prop_assert_eq!(total_b, total_for(Disease::Measles));
    }
}
