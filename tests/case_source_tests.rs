use chrono::NaiveDate;
use epi_chart::ChartError;
use epi_chart::api::{CaseQuery, CaseSource, InMemoryCaseSource, parse_case_records};
use epi_chart::core::{CaseRecord, Disease, FilterSelection};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn query_string_repeats_disease_then_bounds() {
    let filters = FilterSelection::new(Disease::Flu, Disease::Covid19)
        .with_date_range(day(2020, 1, 1), day(2020, 12, 31));
    let query = CaseQuery::from_filters(&filters);

    assert_eq!(
        query.to_query_string(),
        "disease=Flu&disease=COVID-19&start_date=2020-01-01&end_date=2020-12-31"
    );
}

#[test]
fn query_without_bounds_omits_date_parameters() {
    let query = CaseQuery::from_filters(&FilterSelection::new(Disease::Measles, Disease::Malaria));
    assert_eq!(query.to_query_string(), "disease=Measles&disease=Malaria");
}

#[test]
fn in_memory_source_filters_with_inclusive_bounds() {
    let mut source = InMemoryCaseSource::new(vec![
        CaseRecord::new(day(2019, 12, 31), Disease::Flu, 1),
        CaseRecord::new(day(2020, 1, 1), Disease::Flu, 2),
        CaseRecord::new(day(2020, 6, 1), Disease::Malaria, 3),
        CaseRecord::new(day(2020, 12, 31), Disease::Covid19, 4),
        CaseRecord::new(day(2021, 1, 1), Disease::Covid19, 5),
    ]);
    let filters = FilterSelection::new(Disease::Flu, Disease::Covid19)
        .with_date_range(day(2020, 1, 1), day(2020, 12, 31));

    let records = source
        .fetch(&CaseQuery::from_filters(&filters))
        .expect("fetch");

    let counts: Vec<u64> = records.iter().map(|record| record.cases).collect();
    assert_eq!(counts, vec![2, 4]);
    assert_eq!(source.fetch_count(), 1);
}

#[test]
fn inverted_range_returns_no_records() {
    let mut source = InMemoryCaseSource::new(vec![CaseRecord::new(
        day(2020, 6, 1),
        Disease::Flu,
        7,
    )]);
    let filters = FilterSelection::new(Disease::Flu, Disease::Covid19)
        .with_date_range(day(2021, 1, 1), day(2020, 1, 1));

    assert!(filters.has_inverted_range());
    assert!(source
        .fetch(&CaseQuery::from_filters(&filters))
        .expect("fetch")
        .is_empty());
}

#[test]
fn parses_backend_rows_in_several_date_forms() {
    let body = r#"[
        {"date": "2020-01-01", "disease": "Flu", "cases": 100},
        {"date": "Sat, 01 Feb 2020 00:00:00 GMT", "disease": "COVID-19", "cases": 50},
        {"date": "2020-03-01T00:00:00", "disease": "Measles", "cases": 12.0},
        {"date": "2020-04-01T00:00:00Z", "disease": "Malaria", "cases": 3}
    ]"#;
    let records = parse_case_records(body).expect("parse");

    assert_eq!(
        records,
        vec![
            CaseRecord::new(day(2020, 1, 1), Disease::Flu, 100),
            CaseRecord::new(day(2020, 2, 1), Disease::Covid19, 50),
            CaseRecord::new(day(2020, 3, 1), Disease::Measles, 12),
            CaseRecord::new(day(2020, 4, 1), Disease::Malaria, 3),
        ]
    );
}

#[test]
fn unknown_diseases_are_skipped() {
    let body = r#"[
        {"date": "2020-01-01", "disease": "Cholera", "cases": 9},
        {"date": "2020-01-01", "disease": "Flu", "cases": 1}
    ]"#;
    let records = parse_case_records(body).expect("parse");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].disease, Disease::Flu);
}

#[test]
fn error_body_maps_to_fetch_error() {
    let err = parse_case_records(r#"{"error": "database unavailable"}"#).expect_err("error body");
    match err {
        ChartError::Fetch(message) => assert_eq!(message, "database unavailable"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_rows_are_invalid_data() {
    for body in [
        r#"[{"date": "yesterday", "disease": "Flu", "cases": 1}]"#,
        r#"[{"date": "2020-01-01", "disease": "Flu", "cases": -4}]"#,
        r#"[{"date": "2020-01-01", "disease": "Flu", "cases": 1.5}]"#,
        r#"[{"date": "2020-01-01", "disease": "Flu", "cases": 18446744073709551616.0}]"#,
        r#"{"rows": []}"#,
        "not json",
    ] {
        assert!(
            matches!(parse_case_records(body), Err(ChartError::InvalidData(_))),
            "body should be rejected: {body}"
        );
    }
}

#[test]
fn source_built_from_json_serves_queries() {
    let mut source = InMemoryCaseSource::from_json_str(
        r#"[{"date": "2022-05-01", "disease": "Measles", "cases": 8}]"#,
    )
    .expect("load");
    source.push(CaseRecord::new(day(2022, 6, 1), Disease::Measles, 9));

    let all = source
        .fetch(&CaseQuery {
            diseases: Vec::new(),
            start_date: None,
            end_date: None,
        })
        .expect("fetch");
    assert_eq!(all.len(), 2);
    assert_eq!(source.records().len(), 2);
}
