pub mod aggregation;
pub mod band_scale;
pub mod disease;
pub mod filters;
pub mod record;
pub mod scale;
pub mod types;

pub use aggregation::{AggregationSummary, DuplicatePolicy, aggregate, aggregate_with_policy};
pub use band_scale::BandScale;
pub use disease::{Disease, DiseasePair, SeriesSlot};
pub use filters::FilterSelection;
pub use record::{CaseRecord, DateBucket};
pub use scale::LinearScale;
pub use types::Viewport;
