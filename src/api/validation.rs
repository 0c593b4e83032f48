use crate::error::{ChartError, ChartResult};

use super::{ChartLayout, RenderStyle};

const MAX_VALUE_TICK_COUNT: usize = 100;

fn require_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn require_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

pub(super) fn validate_layout(layout: ChartLayout) -> ChartResult<ChartLayout> {
    for (name, value) in [
        ("margin_top", layout.margin_top),
        ("margin_right", layout.margin_right),
        ("margin_bottom", layout.margin_bottom),
        ("margin_left", layout.margin_left),
        ("value_label_offset_px", layout.value_label_offset_px),
        ("axis_tick_length_px", layout.axis_tick_length_px),
        ("axis_label_padding_px", layout.axis_label_padding_px),
        ("legend_offset_px", layout.legend_offset_px),
        ("legend_item_spacing_px", layout.legend_item_spacing_px),
        ("legend_label_offset_x_px", layout.legend_label_offset_x_px),
        ("legend_label_baseline_px", layout.legend_label_baseline_px),
        ("caption_offset_px", layout.caption_offset_px),
    ] {
        require_non_negative(name, value)?;
    }
    require_positive("legend_swatch_size_px", layout.legend_swatch_size_px)?;

    if !layout.band_padding.is_finite() || !(0.0..1.0).contains(&layout.band_padding) {
        return Err(ChartError::InvalidData(
            "band_padding must be finite and in [0, 1)".to_owned(),
        ));
    }
    if !(1..=MAX_VALUE_TICK_COUNT).contains(&layout.value_tick_count) {
        return Err(ChartError::InvalidData(format!(
            "value_tick_count must be in [1, {MAX_VALUE_TICK_COUNT}]"
        )));
    }

    Ok(layout)
}

pub(super) fn validate_render_style(style: RenderStyle) -> ChartResult<RenderStyle> {
    for color in [
        style.series_a_color,
        style.series_b_color,
        style.value_label_color,
        style.axis_line_color,
        style.axis_label_color,
        style.legend_label_color,
        style.caption_color,
    ] {
        color.validate()?;
    }

    for (name, value) in [
        ("value_label_font_size_px", style.value_label_font_size_px),
        ("axis_line_width", style.axis_line_width),
        ("axis_label_font_size_px", style.axis_label_font_size_px),
        ("legend_font_size_px", style.legend_font_size_px),
        ("caption_font_size_px", style.caption_font_size_px),
    ] {
        require_positive(name, value)?;
    }

    Ok(style)
}
