//! epi-chart: grouped bar charts comparing case counts of two diseases.
//!
//! Records flow one way: a `CaseSource` supplies `CaseRecord`s, `aggregate`
//! groups them into date-ordered buckets and `ChartRenderer` lays the buckets
//! out as backend-agnostic draw primitives. `DashboardController` ties the
//! three together and keeps the chart in sync with the latest fetch.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartRenderer, DashboardConfig, DashboardController};
pub use core::{aggregate, aggregate_with_policy};
pub use error::{ChartError, ChartResult};
