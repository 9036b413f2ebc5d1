use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, MetricUnits, QuantizingTimeScale, Viewport};

/// Upper bound on the number of value-axis intervals.
pub const VALUE_TICKS_TARGET: usize = 5;
/// Upper bound on the number of time-axis intervals.
pub const TIME_TICKS_TARGET: usize = 7;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

const TIME_STEPS_SEC: [f64; 21] = [
    1.0,
    2.0,
    5.0,
    10.0,
    15.0,
    30.0,
    60.0,
    120.0,
    300.0,
    600.0,
    900.0,
    1_800.0,
    3_600.0,
    7_200.0,
    10_800.0,
    21_600.0,
    43_200.0,
    86_400.0,
    172_800.0,
    604_800.0,
    1_209_600.0,
];

/// Axis label with its pixel offset along the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
    pub offset_px: f64,
}

/// Family of "human-sane" spacings between axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepCandidates {
    /// `1, 2, 5 x 10^k`.
    Decimal,
    /// Powers of two, for byte quantities.
    Binary,
}

impl StepCandidates {
    #[must_use]
    pub fn for_units(units: MetricUnits) -> Self {
        match units {
            MetricUnits::Bytes => Self::Binary,
            MetricUnits::None | MetricUnits::Percent => Self::Decimal,
        }
    }

    /// Ascending candidate steps.
    pub fn steps(self) -> Box<dyn Iterator<Item = f64>> {
        match self {
            Self::Decimal => Box::new((-6..=15).flat_map(|exponent| {
                let magnitude = 10_f64.powi(exponent);
                [1.0, 2.0, 5.0].into_iter().map(move |m| m * magnitude)
            })),
            Self::Binary => Box::new((0..=50).map(|exponent| 2_f64.powi(exponent))),
        }
    }
}

/// Smallest candidate step that splits `span` into fewer than `target` intervals.
#[must_use]
pub fn choose_step(
    span: f64,
    target: usize,
    candidates: impl IntoIterator<Item = f64>,
) -> Option<f64> {
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return None;
    }
    let target = target as f64;
    candidates
        .into_iter()
        .find(|step| *step > 0.0 && span / step < target)
}

/// Multiples of `step` inside `[start, end]`, computed by index to avoid drift.
fn step_multiples(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (start / step - 1e-9).ceil() as i64;
    let last = (end / step + 1e-9).floor() as i64;
    (first..=last).map(move |index| {
        let value = index as f64 * step;
        if value == 0.0 { 0.0 } else { value }
    })
}

/// Value-axis ticks for `scale`, labelled in `units`.
///
/// Returns nothing for a zero-size viewport or an empty domain.
#[must_use]
pub fn value_ticks(scale: LinearScale, viewport: Viewport, units: MetricUnits) -> Vec<Tick> {
    if !viewport.is_valid() {
        return Vec::new();
    }
    let (min, max) = scale.domain();
    let Some(step) = choose_step(
        max - min,
        VALUE_TICKS_TARGET,
        StepCandidates::for_units(units).steps(),
    ) else {
        return Vec::new();
    };

    step_multiples(min, max, step)
        .map(|value| Tick {
            value,
            label: units.format_axis(value, max),
            offset_px: scale.forward(value),
        })
        .collect()
}

/// Time-axis ticks over the extent of the sample grid, UTC labels.
#[must_use]
pub fn time_ticks(scale: QuantizingTimeScale, viewport: Viewport) -> Vec<Tick> {
    if !viewport.is_valid() {
        return Vec::new();
    }
    let start = scale.first_timestamp();
    let end = scale.last_timestamp();
    let Some(step) = choose_step(end - start, TIME_TICKS_TARGET, TIME_STEPS_SEC) else {
        return Vec::new();
    };

    step_multiples(start, end, step)
        .map(|value| Tick {
            value,
            label: format_time_label(value, step),
            offset_px: scale.forward_unquantized(value),
        })
        .collect()
}

fn format_time_label(timestamp_sec: f64, step_sec: f64) -> String {
    let Some(time) = DateTime::from_timestamp(timestamp_sec.round() as i64, 0) else {
        return format!("{timestamp_sec}");
    };
    let pattern = if step_sec < SECONDS_PER_MINUTE {
        "%H:%M:%S"
    } else if step_sec < SECONDS_PER_DAY {
        "%H:%M"
    } else {
        "%b %-d"
    };
    time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::{StepCandidates, choose_step, time_ticks, value_ticks};
    use crate::core::{LinearScale, MetricUnits, QuantizingTimeScale, Viewport};

    #[test]
    fn picks_smallest_step_below_target_count() {
        let step = choose_step(100.0, 5, StepCandidates::Decimal.steps());
        assert_eq!(step, Some(50.0));
        let step = choose_step(97.0, 8, StepCandidates::Decimal.steps());
        assert_eq!(step, Some(20.0));
        let step = choose_step(3_000.0, 5, StepCandidates::Binary.steps());
        assert_eq!(step, Some(1_024.0));
        assert_eq!(choose_step(0.0, 5, StepCandidates::Decimal.steps()), None);
    }

    #[test]
    fn value_ticks_cover_domain_with_labels() {
        let scale = LinearScale::new((0.0, 100.0), (200.0, 0.0)).expect("scale");
        let ticks = value_ticks(scale, Viewport::new(300, 200), MetricUnits::None);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0]);
        assert_eq!(ticks[1].label, "50");
        assert_eq!(ticks[1].offset_px, 100.0);
    }

    #[test]
    fn zero_size_viewport_draws_no_ticks() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 0.0)).expect("scale");
        assert!(value_ticks(scale, Viewport::new(300, 0), MetricUnits::None).is_empty());
        let time = QuantizingTimeScale::new(0.0, 9.0, 181, (0.0, 0.0)).expect("time");
        assert!(time_ticks(time, Viewport::new(0, 200)).is_empty());
    }

    #[test]
    fn time_ticks_align_to_wall_clock_steps() {
        let start = 1_500_000_000.0;
        let time = QuantizingTimeScale::new(start, 9.0, 201, (0.0, 800.0)).expect("time");
        let ticks = time_ticks(time, Viewport::new(800, 200));
        assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            assert_eq!(pair[1].value - pair[0].value, 300.0);
        }
        assert!(ticks.iter().all(|t| t.value % 300.0 == 0.0));
        assert!(ticks.iter().all(|t| t.label.len() == 5));
    }
}
