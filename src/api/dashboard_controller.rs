use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    CaseRecord, DateBucket, DuplicatePolicy, FilterSelection, Viewport, aggregate_with_policy,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{DashboardEvent, DashboardPlugin};
use crate::render::{RenderFrame, Renderer};

use super::{CaseQuery, CaseSource, ChartRenderer, DashboardConfig};

/// Handle for one issued fetch.
///
/// Sequence numbers grow with every issued fetch; a completion is only
/// applied when no later fetch has been applied already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    sequence: u64,
    filters: FilterSelection,
}

impl FetchTicket {
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Filters the fetch was issued with.
    #[must_use]
    pub fn filters(&self) -> FilterSelection {
        self.filters
    }

    #[must_use]
    pub fn query(&self) -> CaseQuery {
        CaseQuery::from_filters(&self.filters)
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records replaced the previous set and the chart was redrawn.
    Applied {
        sequence: u64,
        record_count: usize,
        bar_count: usize,
    },
    /// A later fetch was already applied; the response was dropped.
    Stale { sequence: u64, latest_applied: u64 },
    /// The source failed; previous records and chart stay in place.
    Failed { sequence: u64, error: String },
}

/// Owns filter state and keeps the chart in sync with the latest records.
///
/// Every applied record set triggers exactly one synchronous
/// aggregate-then-render pass into the owned render target.
pub struct DashboardController<S: CaseSource, R: Renderer> {
    pub(super) source: S,
    pub(super) target: R,
    pub(super) chart: ChartRenderer,
    pub(super) viewport: Viewport,
    pub(super) duplicate_policy: DuplicatePolicy,
    pub(super) filters: FilterSelection,
    pub(super) applied_filters: Option<FilterSelection>,
    pub(super) records: Vec<CaseRecord>,
    pub(super) buckets: Vec<DateBucket>,
    pub(super) last_frame: Option<RenderFrame>,
    pub(super) next_sequence: u64,
    pub(super) latest_applied_sequence: Option<u64>,
    pub(super) plugins: Vec<Box<dyn DashboardPlugin>>,
}

impl<S: CaseSource, R: Renderer> DashboardController<S, R> {
    pub fn new(source: S, target: R, config: DashboardConfig) -> ChartResult<Self> {
        let chart = ChartRenderer::from_config(&config)?;
        Ok(Self {
            source,
            target,
            chart,
            viewport: config.viewport,
            duplicate_policy: config.duplicate_policy,
            filters: FilterSelection::default(),
            applied_filters: None,
            records: Vec::new(),
            buckets: Vec::new(),
            last_frame: None,
            next_sequence: 1,
            latest_applied_sequence: None,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterSelection) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn filters(&self) -> FilterSelection {
        self.filters
    }

    /// Updates the form state without fetching; the chart keeps showing the
    /// last applied records until [`Self::apply_filters`] runs.
    pub fn set_filters(&mut self, filters: FilterSelection) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.emit_event(DashboardEvent::FiltersChanged { filters });
    }

    #[must_use]
    pub fn applied_filters(&self) -> Option<FilterSelection> {
        self.applied_filters
    }

    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Buckets behind the frame currently on screen.
    #[must_use]
    pub fn buckets(&self) -> &[DateBucket] {
        &self.buckets
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    #[must_use]
    pub fn target(&self) -> &R {
        &self.target
    }

    #[must_use]
    pub fn latest_applied_sequence(&self) -> Option<u64> {
        self.latest_applied_sequence
    }

    #[must_use]
    pub fn into_parts(self) -> (S, R) {
        (self.source, self.target)
    }

    /// Fetches records for the current filters and applies them.
    ///
    /// Used for the initial load and for the explicit "apply filters" action.
    /// Source failures are reported through [`FetchOutcome::Failed`]; only a
    /// render target failure is returned as `Err`.
    pub fn apply_filters(&mut self) -> ChartResult<FetchOutcome> {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.query());
        self.complete_fetch(ticket, result)
    }

    /// Issues a ticket for an asynchronous fetch of the current filters.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            sequence: self.next_sequence,
            filters: self.filters,
        };
        self.next_sequence += 1;

        if ticket.filters.has_inverted_range() {
            warn!(
                sequence = ticket.sequence,
                "start date is after end date; expecting an empty record set"
            );
        }
        debug!(sequence = ticket.sequence, "case fetch started");
        self.emit_event(DashboardEvent::FetchStarted {
            sequence: ticket.sequence,
        });
        ticket
    }

    /// Applies the result of the fetch behind `ticket`.
    ///
    /// Results arriving after a later fetch was applied are discarded, so the
    /// chart always reflects the most recent resolved response.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ChartResult<Vec<CaseRecord>>,
    ) -> ChartResult<FetchOutcome> {
        let sequence = ticket.sequence;
        if sequence >= self.next_sequence {
            return Err(ChartError::InvalidData(format!(
                "fetch ticket {sequence} was not issued by this controller"
            )));
        }

        if let Some(latest_applied) = self
            .latest_applied_sequence
            .filter(|latest| sequence <= *latest)
        {
            warn!(sequence, latest_applied, "discarding stale case fetch");
            self.emit_event(DashboardEvent::StaleFetchDiscarded {
                sequence,
                latest_applied,
            });
            return Ok(FetchOutcome::Stale {
                sequence,
                latest_applied,
            });
        }

        let records = match result {
            Ok(records) => records,
            Err(err) => {
                warn!(sequence, error = %err, "case fetch failed; keeping previous records");
                self.emit_event(DashboardEvent::FetchFailed { sequence });
                return Ok(FetchOutcome::Failed {
                    sequence,
                    error: err.to_string(),
                });
            }
        };

        let record_count = records.len();
        debug!(sequence, record_count, "replacing case records");
        self.records = records;
        self.applied_filters = Some(ticket.filters);
        self.latest_applied_sequence = Some(sequence);
        self.emit_event(DashboardEvent::RecordsReplaced {
            sequence,
            record_count,
        });

        let bar_count = self.redraw()?.bars.len();
        Ok(FetchOutcome::Applied {
            sequence,
            record_count,
            bar_count,
        })
    }

    /// Aggregates the current records and renders them again.
    ///
    /// The selected pair comes from the applied filters, or from the form
    /// state before any fetch was applied.
    pub fn redraw(&mut self) -> ChartResult<&RenderFrame> {
        let pair = self.applied_filters.unwrap_or(self.filters).pair();
        self.buckets = aggregate_with_policy(&self.records, pair, self.duplicate_policy);
        let frame = self
            .chart
            .render(&mut self.target, &self.buckets, pair, self.viewport)?;

        self.emit_event(DashboardEvent::Rendered {
            group_count: frame.group_count(),
            bar_count: frame.bars.len(),
        });
        Ok(&*self.last_frame.insert(frame))
    }

    /// Resizes the canvas and redraws when a record set is on screen.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        if self.applied_filters.is_some() {
            self.redraw()?;
        }
        Ok(())
    }
}
