use serde::{Deserialize, Serialize};

use crate::core::SeriesSlot;
use crate::render::Color;

const SERIES_A_BLUE: Color = Color::from_rgb8(0x00, 0x7B, 0xFF);
const SERIES_B_AMBER: Color = Color::from_rgb8(0xFF, 0xC1, 0x07);
const VALUE_LABEL_GRAY: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const CAPTION_GRAY: Color = Color::from_rgb8(0x66, 0x66, 0x66);
const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

/// Colors and font sizes for the current render frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub series_a_color: Color,
    pub series_b_color: Color,
    pub value_label_color: Color,
    pub value_label_font_size_px: f64,
    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub legend_label_color: Color,
    pub legend_font_size_px: f64,
    pub caption_color: Color,
    pub caption_font_size_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            series_a_color: SERIES_A_BLUE,
            series_b_color: SERIES_B_AMBER,
            value_label_color: VALUE_LABEL_GRAY,
            value_label_font_size_px: 12.0,
            axis_line_color: BLACK,
            axis_line_width: 1.0,
            axis_label_color: BLACK,
            axis_label_font_size_px: 10.0,
            legend_label_color: BLACK,
            legend_font_size_px: 14.0,
            caption_color: CAPTION_GRAY,
            caption_font_size_px: 14.0,
        }
    }
}

impl RenderStyle {
    /// Fill color for bars and legend swatch of `slot`.
    ///
    /// Colors follow the slot, not the disease, so a pair selecting the same
    /// disease twice still shows two distinct series.
    #[must_use]
    pub fn slot_color(&self, slot: SeriesSlot) -> Color {
        match slot {
            SeriesSlot::A => self.series_a_color,
            SeriesSlot::B => self.series_b_color,
        }
    }
}
