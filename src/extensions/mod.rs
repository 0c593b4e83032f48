//! Extension points for hosts observing the dashboard.
//!
//! Keep extensions read-only and out of the aggregation and layout paths.

pub mod plugins;

pub use plugins::{DashboardContext, DashboardEvent, DashboardPlugin};
