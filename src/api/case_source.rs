use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::core::{CaseRecord, Disease, FilterSelection};
use crate::error::{ChartError, ChartResult};

/// Query sent to the record source for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseQuery {
    /// Diseases to include; empty means every disease.
    pub diseases: Vec<Disease>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CaseQuery {
    /// Query for both selected diseases and the selected date bounds.
    ///
    /// A pair selecting one disease twice still sends it twice; the backend
    /// treats the list as a set.
    #[must_use]
    pub fn from_filters(filters: &FilterSelection) -> Self {
        Self {
            diseases: vec![filters.disease_a, filters.disease_b],
            start_date: filters.start_date,
            end_date: filters.end_date,
        }
    }

    /// Query parameters in wire order: repeated `disease`, then the bounds.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .diseases
            .iter()
            .map(|disease| ("disease", disease.as_str().to_owned()))
            .collect();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// `disease=Flu&disease=COVID-19&start_date=...`. Every value is drawn
    /// from URL-safe characters, so no percent-encoding is needed.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Backend filter semantics: disease membership and inclusive date bounds.
    #[must_use]
    pub fn matches(&self, record: &CaseRecord) -> bool {
        (self.diseases.is_empty() || self.diseases.contains(&record.disease))
            && self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
    }
}

/// Supplier of case records for a query.
///
/// Implementations own transport concerns (timeouts, retries); callers only
/// see the resolved record set or an error.
pub trait CaseSource {
    fn fetch(&mut self, query: &CaseQuery) -> ChartResult<Vec<CaseRecord>>;
}

/// Record source over a fixed in-memory table, filtering like the backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseSource {
    records: Vec<CaseRecord>,
    fetch_count: usize,
}

impl InMemoryCaseSource {
    #[must_use]
    pub fn new(records: Vec<CaseRecord>) -> Self {
        Self {
            records,
            fetch_count: 0,
        }
    }

    /// Loads the table from a backend-shaped JSON body.
    pub fn from_json_str(body: &str) -> ChartResult<Self> {
        Ok(Self::new(parse_case_records(body)?))
    }

    pub fn push(&mut self, record: CaseRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }
}

impl CaseSource for InMemoryCaseSource {
    fn fetch(&mut self, query: &CaseQuery) -> ChartResult<Vec<CaseRecord>> {
        self.fetch_count += 1;
        let records: Vec<CaseRecord> = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .copied()
            .collect();
        debug!(
            table = self.records.len(),
            matched = records.len(),
            "in-memory case fetch"
        );
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    date: String,
    disease: String,
    cases: serde_json::Number,
}

/// Decodes a `/api/data` response body.
///
/// Rows naming a disease outside the known set are skipped. An
/// `{"error": "..."}` body becomes [`ChartError::Fetch`]; any other shape or a
/// malformed row is [`ChartError::InvalidData`].
pub fn parse_case_records(body: &str) -> ChartResult<Vec<CaseRecord>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse records json: {e}")))?;

    if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
        return Err(ChartError::Fetch(message.to_owned()));
    }

    let rows: Vec<CaseRow> = serde_json::from_value(value)
        .map_err(|e| ChartError::InvalidData(format!("unexpected records payload: {e}")))?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let Ok(disease) = row.disease.parse::<Disease>() else {
            trace!(index, disease = %row.disease, "skipping row for unknown disease");
            continue;
        };
        let date = parse_record_date(&row.date).ok_or_else(|| {
            ChartError::InvalidData(format!("row {index}: unrecognized date `{}`", row.date))
        })?;
        let cases = parse_case_count(&row.cases).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "row {index}: cases must be a non-negative integer, got {}",
                row.cases
            ))
        })?;
        records.push(CaseRecord::new(date, disease, cases));
    }
    Ok(records)
}

/// Accepts `YYYY-MM-DD`, RFC 3339 / naive ISO timestamps and the RFC 2822
/// form (`Wed, 01 Jan 2020 00:00:00 GMT`) some JSON encoders emit for dates.
fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_case_count(number: &serde_json::Number) -> Option<u64> {
    if let Some(value) = number.as_u64() {
        return Some(value);
    }
    // Integral floats (`12.0`) come out of dataframe-backed encoders.
    let value = number.as_f64()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64)
        .then_some(value as u64)
}

#[cfg(feature = "http-source")]
pub use http::HttpCaseSource;

#[cfg(feature = "http-source")]
mod http {
    use std::time::Duration;

    use tracing::{debug, warn};

    use super::{CaseQuery, CaseSource, parse_case_records};
    use crate::core::CaseRecord;
    use crate::error::{ChartError, ChartResult};

    /// Local backend address used by the reference dashboard.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Blocking HTTP client for the `/api/data` endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpCaseSource {
        client: reqwest::blocking::Client,
        endpoint: String,
    }

    impl HttpCaseSource {
        pub fn new(base_url: &str) -> ChartResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(12))
                .build()
                .map_err(|e| ChartError::Fetch(format!("http client error: {e}")))?;
            Ok(Self {
                client,
                endpoint: format!("{}/api/data", base_url.trim_end_matches('/')),
            })
        }

        pub fn localhost() -> ChartResult<Self> {
            Self::new(DEFAULT_BASE_URL)
        }

        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl CaseSource for HttpCaseSource {
        fn fetch(&mut self, query: &CaseQuery) -> ChartResult<Vec<CaseRecord>> {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&query.to_query_pairs())
                .send()
                .map_err(|e| ChartError::Fetch(format!("request error: {e}")))?;
            let status = response.status();
            let body = response
                .text()
                .map_err(|e| ChartError::Fetch(format!("failed to read body: {e}")))?;

            if !status.is_success() {
                let detail = match parse_case_records(&body) {
                    Err(ChartError::Fetch(message)) => message,
                    _ => body,
                };
                warn!(%status, "case backend returned an error");
                return Err(ChartError::Fetch(format!("{status}: {detail}")));
            }

            let records = parse_case_records(&body)?;
            debug!(count = records.len(), "fetched case records over http");
            Ok(records)
        }
    }
}
