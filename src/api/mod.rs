mod axis_label_format;
mod axis_ticks;
mod case_source;
mod chart_layout;
mod chart_renderer;
mod dashboard_config;
mod dashboard_controller;
mod plugin_registry;
mod render_frame_builder;
mod render_style;
mod validation;

pub use axis_label_format::{
    AxisLabelLocale, format_month_year_label, format_tick_label, format_value_label,
};
pub use axis_ticks::{DEFAULT_VALUE_TICK_COUNT, linear_ticks, tick_step};
#[cfg(feature = "http-source")]
pub use case_source::HttpCaseSource;
pub use case_source::{CaseQuery, CaseSource, InMemoryCaseSource, parse_case_records};
pub use chart_layout::{ChartLayout, PlotArea};
pub use chart_renderer::ChartRenderer;
pub use dashboard_config::DashboardConfig;
pub use dashboard_controller::{DashboardController, FetchOutcome, FetchTicket};
pub use render_style::RenderStyle;
