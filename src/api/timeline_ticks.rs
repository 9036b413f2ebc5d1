use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Period, PeriodInterval, TimelineTransform};

/// Closest two labels of one row may be.
pub const MIN_TICK_SPACING_PX: f64 = 70.0;
/// Parent interval width at which a row starts fading in.
pub const MAX_TICK_SPACING_PX: f64 = 415.0;
pub const FADE_OUT_FACTOR: f64 = 1.4;
pub const TICKS_ROW_SPACING_PX: f64 = 16.0;
pub const MAX_TICK_ROWS: f64 = 3.0;
/// Headroom required over `MIN_TICK_SPACING_PX` when picking an interval.
pub const INTERVAL_FIT_SLACK: f64 = 1.1;

/// Calendar label on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTick {
    pub timestamp_ms: i64,
    pub label: String,
    pub x: f64,
    /// The instant lies before the visible range; the label is pinned to the
    /// left edge.
    pub is_behind: bool,
}

/// Ticks of one period with the row placement for the current zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTickRow {
    pub period: Period,
    /// Fractional row index, 0 at the top.
    pub row: f64,
    pub y_px: f64,
    pub opacity: f64,
    pub ticks: Vec<PeriodTick>,
}

/// First interval of `intervals` whose labels would sit comfortably apart at
/// `duration_per_px_ms`.
#[must_use]
pub fn find_optimal_interval(
    intervals: &[PeriodInterval],
    duration_per_px_ms: f64,
) -> Option<PeriodInterval> {
    intervals.iter().copied().find(|interval| {
        interval.nominal_ms() / duration_per_px_ms >= MIN_TICK_SPACING_PX * INTERVAL_FIT_SLACK
    })
}

/// Tick labels of `period` across a timeline `width_px` wide.
///
/// The first tick is the last instant before the visible range, pinned to
/// `x = 0`. Steps are realigned to parent-period boundaries, so weekly day
/// ticks restart on the 1st of each month. Labels closer than
/// `MIN_TICK_SPACING_PX` drop the earlier one.
#[must_use]
pub fn period_ticks(period: Period, transform: TimelineTransform, width_px: f64) -> Vec<PeriodTick> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Vec::new();
    }
    let settings = period.settings();
    let Some(interval) = find_optimal_interval(settings.intervals, transform.duration_per_px_ms)
    else {
        return Vec::new();
    };

    let (start_ms, end_ms) = transform.visible_range_ms(width_px);
    let (Some(start), Some(end)) = (
        DateTime::<Utc>::from_timestamp_millis(start_ms.floor() as i64),
        DateTime::<Utc>::from_timestamp_millis(end_ms.ceil() as i64),
    ) else {
        return Vec::new();
    };

    let advance = |time: DateTime<Utc>| step_forward(time, interval, settings.parent);

    let mut time = settings.parent.unwrap_or(period).floor(start);
    while let Some(next) = advance(time).filter(|next| *next <= start) {
        time = next;
    }

    let mut ticks = vec![PeriodTick {
        timestamp_ms: time.timestamp_millis(),
        label: period.format_label(time),
        x: 0.0,
        is_behind: time < start,
    }];

    while let Some(next) = advance(time).filter(|next| *next < end) {
        time = next;
        ticks.push(PeriodTick {
            timestamp_ms: time.timestamp_millis(),
            label: period.format_label(time),
            x: transform.time_to_px(time.timestamp_millis() as f64, width_px),
            is_behind: false,
        });
    }

    drop_crowded_ticks(ticks, MIN_TICK_SPACING_PX)
}

/// `time + interval`, pulled back to the parent boundary it crossed.
fn step_forward(
    time: DateTime<Utc>,
    interval: PeriodInterval,
    parent: Option<Period>,
) -> Option<DateTime<Utc>> {
    let next = interval.add_to(time)?;
    Some(match parent {
        Some(parent) => {
            let boundary = parent.floor(next);
            if boundary > time { boundary } else { next }
        }
        None => next,
    })
}

/// Keeps ticks at least `min_spacing_px` apart; a crowded tick replaces the
/// one before it.
fn drop_crowded_ticks(ticks: Vec<PeriodTick>, min_spacing_px: f64) -> Vec<PeriodTick> {
    let mut selected: Vec<PeriodTick> = Vec::with_capacity(ticks.len());
    for tick in ticks {
        while selected
            .last()
            .is_some_and(|previous| tick.x - previous.x < min_spacing_px)
        {
            selected.pop();
        }
        selected.push(tick);
    }
    selected
}

/// How far `period` has slid down from the top row, in rows.
///
/// Each level contributes a log-scale transition between its fade-in and
/// fade-out zoom levels; the parentless year always contributes one row.
#[must_use]
pub fn vertical_shift(period: Period, duration_per_px_ms: f64) -> f64 {
    let settings = period.settings();
    let own = settings
        .parent
        .and_then(|parent| parent.settings().intervals.first().copied())
        .map_or(1.0, |parent_interval| {
            let faded_in = parent_interval.nominal_ms() / MAX_TICK_SPACING_PX;
            let faded_out = faded_in * FADE_OUT_FACTOR;
            let factor = (faded_out.ln() - duration_per_px_ms.ln())
                / (faded_out.ln() - faded_in.ln());
            factor.clamp(0.0, 1.0)
        });
    own + settings
        .child
        .map_or(0.0, |child| vertical_shift(child, duration_per_px_ms))
}

/// Full opacity on the visible rows, fading linearly over one row beyond.
#[must_use]
pub fn row_opacity(row: f64) -> f64 {
    let opacity = if row < 0.0 {
        1.0 + row
    } else if row > MAX_TICK_ROWS - 1.0 {
        MAX_TICK_ROWS - row
    } else {
        1.0
    };
    opacity.clamp(0.0, 1.0)
}

/// Rows of every period that is at least partly visible, coarsest first.
#[must_use]
pub fn period_tick_rows(transform: TimelineTransform, width_px: f64) -> Vec<PeriodTickRow> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Vec::new();
    }
    Period::ALL
        .into_iter()
        .filter_map(|period| {
            let row = MAX_TICK_ROWS - vertical_shift(period, transform.duration_per_px_ms);
            let opacity = row_opacity(row);
            (opacity > 0.0).then(|| PeriodTickRow {
                period,
                row,
                y_px: row * TICKS_ROW_SPACING_PX,
                opacity,
                ticks: period_ticks(period, transform, width_px),
            })
        })
        .collect()
}

/// Finest period whose row currently draws labels.
#[must_use]
pub fn finest_visible_period(rows: &[PeriodTickRow]) -> Option<Period> {
    rows.iter()
        .rev()
        .find(|row| !row.ticks.is_empty())
        .map(|row| row.period)
}
