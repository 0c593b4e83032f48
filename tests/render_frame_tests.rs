use approx::assert_relative_eq;
use chrono::NaiveDate;
use epi_chart::ChartError;
use epi_chart::api::{AxisLabelLocale, ChartRenderer, RenderStyle};
use epi_chart::core::{
    CaseRecord, DateBucket, Disease, DiseasePair, SeriesSlot, Viewport, aggregate,
};
use epi_chart::render::{Color, NullRenderer, TextHAlign};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn flu_covid_buckets() -> Vec<DateBucket> {
    let records = vec![
        CaseRecord::new(day(2020, 1, 1), Disease::Flu, 100),
        CaseRecord::new(day(2020, 1, 1), Disease::Covid19, 50),
        CaseRecord::new(day(2020, 2, 1), Disease::Flu, 80),
    ];
    aggregate(&records, DiseasePair::default())
}

#[test]
fn flu_covid_frame_has_expected_bar_geometry() {
    let chart = ChartRenderer::new();
    let frame = chart
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    assert_eq!(frame.bars.len(), 4);
    assert_eq!(frame.group_count(), 2);

    let step = 650.0 / 2.2;
    let first_band = 50.0 + (650.0 - step * 1.8) * 0.5;
    let bar_width = step * 0.8 * 0.5;

    let expected = [
        (0, SeriesSlot::A, 100, first_band, 50.0, 350.0),
        (0, SeriesSlot::B, 50, first_band + bar_width, 225.0, 175.0),
        (1, SeriesSlot::A, 80, first_band + step, 120.0, 280.0),
        (1, SeriesSlot::B, 0, first_band + step + bar_width, 400.0, 0.0),
    ];
    for (bar, (bucket_index, slot, value, x, y, height)) in frame.bars.iter().zip(expected) {
        assert_eq!(bar.bucket_index, bucket_index);
        assert_eq!(bar.slot, slot);
        assert_eq!(bar.value, value);
        assert_relative_eq!(bar.rect.x, x, epsilon = 1e-9);
        assert_relative_eq!(bar.rect.y, y, epsilon = 1e-9);
        assert_relative_eq!(bar.rect.height, height, epsilon = 1e-9);
        assert_relative_eq!(bar.rect.width, bar_width, epsilon = 1e-9);
        assert_relative_eq!(bar.rect.bottom(), 400.0, epsilon = 1e-9);
    }
}

#[test]
fn bars_are_colored_by_slot() {
    let frame = ChartRenderer::new()
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");
    let blue = Color::from_hex("#007BFF").expect("hex");
    let amber = Color::from_hex("#FFC107").expect("hex");

    assert!(frame.bars_for(SeriesSlot::A).all(|bar| bar.rect.fill_color == blue));
    assert!(frame.bars_for(SeriesSlot::B).all(|bar| bar.rect.fill_color == amber));
    assert_eq!(frame.legend[0].swatch.fill_color, blue);
    assert_eq!(frame.legend[1].swatch.fill_color, amber);
}

#[test]
fn value_labels_sit_above_bars_with_raw_numbers() {
    let frame = ChartRenderer::new()
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    let texts: Vec<&str> = frame.value_labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["100", "50", "80", "0"]);
    for (bar, label) in frame.bars.iter().zip(&frame.value_labels) {
        assert_relative_eq!(label.x, bar.rect.x + bar.rect.width * 0.5, epsilon = 1e-9);
        assert_relative_eq!(label.y, bar.rect.y - 5.0, epsilon = 1e-9);
        assert_relative_eq!(label.font_size_px, 12.0);
        assert_eq!(label.h_align, TextHAlign::Center);
    }
}

#[test]
fn value_axis_spans_zero_to_max_with_nice_ticks() {
    let frame = ChartRenderer::new()
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    let labels: Vec<&str> = frame
        .y_axis
        .ticks
        .iter()
        .map(|tick| tick.label.text.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["0", "10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]
    );
    assert_relative_eq!(frame.y_axis.ticks[0].mark.y1, 400.0);
    assert_relative_eq!(frame.y_axis.ticks[10].mark.y1, 50.0);
    assert_relative_eq!(frame.y_axis.domain_line.x1, 50.0);
}

#[test]
fn date_axis_labels_follow_locale_and_band_centers() {
    let buckets = flu_covid_buckets();
    let en = ChartRenderer::new()
        .build_frame(&buckets, DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");
    let pt = ChartRenderer::new()
        .with_locale(AxisLabelLocale::PtBr)
        .build_frame(&buckets, DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    let en_labels: Vec<&str> = en.x_axis.ticks.iter().map(|t| t.label.text.as_str()).collect();
    let pt_labels: Vec<&str> = pt.x_axis.ticks.iter().map(|t| t.label.text.as_str()).collect();
    assert_eq!(en_labels, vec!["January 2020", "February 2020"]);
    assert_eq!(pt_labels, vec!["janeiro de 2020", "fevereiro de 2020"]);

    let first_group_center = en.bars[0].rect.x + en.bars[0].rect.width;
    assert_relative_eq!(en.x_axis.ticks[0].mark.x1, first_group_center, epsilon = 1e-9);
    assert_relative_eq!(en.x_axis.domain_line.y1, 400.0);
    assert!(pt.caption.text.starts_with("Os números"));
}

#[test]
fn two_dates_in_one_month_keep_separate_bands() {
    let records = vec![
        CaseRecord::new(day(2021, 3, 1), Disease::Flu, 10),
        CaseRecord::new(day(2021, 3, 15), Disease::Flu, 20),
    ];
    let buckets = aggregate(&records, DiseasePair::default());
    let frame = ChartRenderer::new()
        .build_frame(&buckets, DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    assert_eq!(frame.group_count(), 2);
    assert_eq!(frame.x_axis.ticks[0].label.text, frame.x_axis.ticks[1].label.text);
    assert!(frame.bars[2].rect.x > frame.bars[1].rect.x);
}

#[test]
fn empty_buckets_render_axes_legend_and_caption_only() {
    let frame = ChartRenderer::new()
        .build_frame(&[], DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    assert!(frame.bars.is_empty());
    assert!(frame.value_labels.is_empty());
    assert!(frame.x_axis.ticks.is_empty());
    assert_eq!(frame.y_axis.ticks.len(), 1);
    assert_eq!(frame.y_axis.ticks[0].label.text, "0");
    assert_eq!(frame.legend.len(), 2);
    assert_eq!(frame.caption.text, "Numbers show the count of recorded cases.");
}

#[test]
fn all_zero_values_draw_flat_bars_on_the_baseline() {
    let records = vec![
        CaseRecord::new(day(2020, 1, 1), Disease::Flu, 0),
        CaseRecord::new(day(2020, 1, 1), Disease::Covid19, 0),
    ];
    let frame = ChartRenderer::new()
        .build_frame(
            &aggregate(&records, DiseasePair::default()),
            DiseasePair::default(),
            Viewport::REFERENCE,
        )
        .expect("frame");

    assert_eq!(frame.bars.len(), 2);
    for bar in &frame.bars {
        assert_relative_eq!(bar.rect.height, 0.0);
        assert_relative_eq!(bar.rect.y, 400.0);
    }
}

#[test]
fn legend_and_caption_use_fixed_positions() {
    let frame = ChartRenderer::new()
        .build_frame(
            &flu_covid_buckets(),
            DiseasePair::new(Disease::Measles, Disease::Malaria),
            Viewport::REFERENCE,
        )
        .expect("frame");

    let first = &frame.legend[0];
    let second = &frame.legend[1];
    assert_eq!(first.disease, Disease::Measles);
    assert_eq!(second.label.text, "Malaria");
    assert_relative_eq!(first.swatch.x, 50.0);
    assert_relative_eq!(first.swatch.y, 430.0);
    assert_relative_eq!(first.swatch.width, 20.0);
    assert_relative_eq!(second.swatch.x, 200.0);
    assert_relative_eq!(first.label.x, 80.0);
    assert_relative_eq!(first.label.y, 445.0);
    assert_relative_eq!(first.label.font_size_px, 14.0);

    assert_relative_eq!(frame.caption.x, 350.0);
    assert_relative_eq!(frame.caption.y, 480.0);
    assert_eq!(frame.caption.color, Color::from_hex("#666666").expect("hex"));
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = ChartRenderer::new()
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::new(0, 500))
        .expect_err("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 500 }));
}

#[test]
fn render_clears_target_before_each_pass() {
    let chart = ChartRenderer::new();
    let mut target = NullRenderer::default();
    let buckets = flu_covid_buckets();

    let first = chart
        .render(&mut target, &buckets, DiseasePair::default(), Viewport::REFERENCE)
        .expect("first render");
    let live_after_first = target.live_rect_count;
    let second = chart
        .render(&mut target, &buckets, DiseasePair::default(), Viewport::REFERENCE)
        .expect("second render");

    assert_eq!(first, second);
    assert_eq!(target.clear_count, 2);
    assert_eq!(target.frames_rendered, 2);
    assert_eq!(target.live_rect_count, live_after_first);
    assert_eq!(target.live_rect_count, 4 + 2);
}

#[test]
fn custom_series_colors_flow_into_bars() {
    let style = RenderStyle {
        series_a_color: Color::from_hex("#112233").expect("hex"),
        ..RenderStyle::default()
    };
    let frame = ChartRenderer::new()
        .with_style(style)
        .expect("valid style")
        .build_frame(&flu_covid_buckets(), DiseasePair::default(), Viewport::REFERENCE)
        .expect("frame");

    assert_eq!(frame.bars[0].rect.fill_color.to_hex(), "#112233");
}

#[test]
fn narrow_canvas_keeps_dates_left_to_right() {
    let records = vec![
        CaseRecord::new(day(2020, 1, 1), Disease::Flu, 10),
        CaseRecord::new(day(2020, 2, 1), Disease::Flu, 20),
    ];
    let frame = ChartRenderer::new()
        .build_frame(
            &aggregate(&records, DiseasePair::default()),
            DiseasePair::default(),
            Viewport::new(140, 300),
        )
        .expect("frame");

    assert_eq!(frame.bars.len(), 4);
    assert!(frame.validate().is_ok());
    for window in frame.bars.windows(2) {
        assert!(window[0].bucket_index <= window[1].bucket_index);
        assert!(window[1].rect.x >= window[0].rect.x);
    }
    assert!(frame.x_axis.ticks[1].mark.x1 >= frame.x_axis.ticks[0].mark.x1);
}
