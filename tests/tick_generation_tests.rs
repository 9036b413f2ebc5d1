use chronoscope::api::{MIN_TICK_SPACING_PX, period_tick_rows, period_ticks, row_opacity};
use chronoscope::core::{
    LinearScale, MetricUnits, Period, QuantizingTimeScale, TimelineTransform, Viewport, time_ticks,
    value_ticks,
};
use proptest::prelude::*;

#[test]
fn byte_axes_step_in_powers_of_two() {
    let scale = LinearScale::new((0.0, 5_000_000.0), (300.0, 0.0)).expect("valid scale");
    let ticks = value_ticks(scale, Viewport::new(600, 300), MetricUnits::Bytes);

    assert!(ticks.len() > 1);
    let step = ticks[1].value - ticks[0].value;
    assert_eq!(step, 1_048_576.0);
    assert_eq!(ticks[1].label, "1024 kB");
}

#[test]
fn percent_axes_label_fractions() {
    let scale = LinearScale::new((0.0, 1.0), (300.0, 0.0)).expect("valid scale");
    let ticks = value_ticks(scale, Viewport::new(600, 300), MetricUnits::Percent);
    let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["0.00%", "50.00%", "100.00%"]);
}

#[test]
fn long_ranges_label_days() {
    let start = 1_700_006_400.0;
    let scale =
        QuantizingTimeScale::new(start, 3_600.0, 24 * 14 + 1, (0.0, 1_000.0)).expect("valid scale");
    let ticks = time_ticks(scale, Viewport::new(1_000, 300));
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| tick.label.contains("Nov")));
}

#[test]
fn repeated_generation_is_identical() {
    let transform = TimelineTransform::new(1_710_504_000_000, 45_000.0, 0).expect("transform");
    assert_eq!(
        period_tick_rows(transform, 1_280.0),
        period_tick_rows(transform, 1_280.0)
    );
}

#[test]
fn zero_width_timeline_has_no_rows() {
    let transform = TimelineTransform::new(1_710_504_000_000, 45_000.0, 0).expect("transform");
    assert!(period_tick_rows(transform, 0.0).is_empty());
    assert!(period_ticks(Period::Day, transform, 0.0).is_empty());
}

#[test]
fn year_ticks_label_the_year() {
    let transform = TimelineTransform::new(1_710_504_000_000, 86_400_000.0, 0).expect("transform");
    let ticks = period_ticks(Period::Year, transform, 1_000.0);
    assert!(ticks.iter().any(|tick| tick.label == "2024"));
    assert!(ticks.iter().skip(1).all(|tick| tick.label.len() == 4));
}

proptest! {
    #[test]
    fn period_ticks_never_crowd(
        focus_ms in 946_684_800_000i64..1_893_456_000_000,
        log_duration in 250f64.ln()..259_200_000f64.ln(),
        width in 200.0f64..2_400.0
    ) {
        let transform =
            TimelineTransform::new(focus_ms, log_duration.exp(), 0).expect("transform");
        for row in period_tick_rows(transform, width) {
            prop_assert!(row.opacity > 0.0 && row.opacity <= 1.0);
            prop_assert_eq!(row.opacity, row_opacity(row.row));
            for pair in row.ticks.windows(2) {
                prop_assert!(pair[1].x - pair[0].x >= MIN_TICK_SPACING_PX);
            }
            for tick in &row.ticks {
                prop_assert!(tick.x >= 0.0 && tick.x <= width);
            }
        }
    }
}
