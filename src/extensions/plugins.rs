use serde::{Deserialize, Serialize};

use crate::core::{FilterSelection, Viewport};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardContext {
    pub viewport: Viewport,
    /// Filters as currently edited in the form.
    pub filters: FilterSelection,
    /// Filters of the fetch whose records are on screen.
    pub applied_filters: Option<FilterSelection>,
    pub record_count: usize,
    pub bucket_count: usize,
    pub latest_applied_sequence: Option<u64>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DashboardEvent {
    FiltersChanged { filters: FilterSelection },
    FetchStarted { sequence: u64 },
    RecordsReplaced { sequence: u64, record_count: usize },
    StaleFetchDiscarded { sequence: u64, latest_applied: u64 },
    FetchFailed { sequence: u64 },
    Rendered { group_count: usize, bar_count: usize },
}

/// Observer hook for dashboard state changes.
///
/// Plugins are notified synchronously, in registration order, and cannot
/// mutate controller state.
pub trait DashboardPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: DashboardEvent, context: DashboardContext);
}
