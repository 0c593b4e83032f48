use serde::{Deserialize, Serialize};

use crate::core::Viewport;

use super::axis_ticks::DEFAULT_VALUE_TICK_COUNT;

/// Fixed geometry of the grouped bar chart.
///
/// Defaults reproduce the reference dashboard: 50px margins on every side,
/// 20% band padding and a legend row just under the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Inner and outer padding of the date bands, as a fraction of the step.
    pub band_padding: f64,
    pub value_tick_count: usize,
    pub value_label_offset_px: f64,
    pub axis_tick_length_px: f64,
    pub axis_label_padding_px: f64,
    /// Distance from the bottom of the canvas margin up to the legend row.
    pub legend_offset_px: f64,
    pub legend_item_spacing_px: f64,
    pub legend_swatch_size_px: f64,
    pub legend_label_offset_x_px: f64,
    pub legend_label_baseline_px: f64,
    /// Distance below the bottom margin at which the caption baseline sits.
    pub caption_offset_px: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margin_top: 50.0,
            margin_right: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
            band_padding: 0.2,
            value_tick_count: DEFAULT_VALUE_TICK_COUNT,
            value_label_offset_px: 5.0,
            axis_tick_length_px: 6.0,
            axis_label_padding_px: 3.0,
            legend_offset_px: 20.0,
            legend_item_spacing_px: 150.0,
            legend_swatch_size_px: 20.0,
            legend_label_offset_x_px: 30.0,
            legend_label_baseline_px: 15.0,
            caption_offset_px: 30.0,
        }
    }
}

impl ChartLayout {
    /// Plot extents for `viewport`.
    ///
    /// `width`/`height` are the canvas size minus both margins. The date bands
    /// span `[margin_left, width]` and the value range is `[height, margin_top]`,
    /// so the bottom axis sits at `y = height`.
    #[must_use]
    pub fn plot_area(self, viewport: Viewport) -> PlotArea {
        let width = (f64::from(viewport.width) - self.margin_left - self.margin_right).max(0.0);
        let height = (f64::from(viewport.height) - self.margin_top - self.margin_bottom).max(0.0);
        PlotArea {
            left: self.margin_left,
            top: self.margin_top,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Date band range. A plot narrower than the left margin collapses to
    /// zero width at `left` instead of reversing the date order.
    #[must_use]
    pub fn band_range(self) -> (f64, f64) {
        (self.left, self.width.max(self.left))
    }

    /// Value range, bottom to top. Collapses onto `top` for short plots.
    #[must_use]
    pub fn value_range(self) -> (f64, f64) {
        (self.baseline_y(), self.top)
    }

    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.height.max(self.top)
    }
}
