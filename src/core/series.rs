use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

const METRIC_NAME_LABEL: &str = "__name__";
const TIMESTAMP_MATCH_EPSILON_SEC: f64 = 1e-6;

/// Upper bound on the samples one grid may span.
pub const MAX_GRID_SAMPLES: usize = 1_000_000;

/// One sample value as delivered by the query API: usually a string such as
/// `"12.5"` or `"+Inf"`, occasionally a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSampleValue {
    Number(f64),
    Text(String),
}

impl RawSampleValue {
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => parse_sample_value(text),
        }
    }
}

/// `[timestamp_sec, value]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample(pub f64, pub RawSampleValue);

/// Matrix-style input series: label set plus samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeries {
    #[serde(default)]
    pub metric: IndexMap<String, String>,
    #[serde(default)]
    pub values: Vec<RawSample>,
}

impl RawSeries {
    #[must_use]
    pub fn new(metric: IndexMap<String, String>, values: Vec<RawSample>) -> Self {
        Self { metric, values }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Vec<Self>> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse series json: {e}")))
    }
}

/// Parses a sample value; `+Inf`, `-Inf`, `NaN` and garbage become gaps.
#[must_use]
pub fn parse_sample_value(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Display name for a label set: `name{k="v", ...}`.
#[must_use]
pub fn series_name(metric: &IndexMap<String, String>) -> String {
    let name = metric
        .get(METRIC_NAME_LABEL)
        .map(String::as_str)
        .unwrap_or_default();
    let labels: Vec<String> = metric
        .iter()
        .filter(|(label, _)| label.as_str() != METRIC_NAME_LABEL)
        .map(|(label, value)| format!("{label}=\"{value}\""))
        .collect();

    if labels.is_empty() && !name.is_empty() {
        return name.to_owned();
    }
    format!("{name}{{{}}}", labels.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub timestamp_sec: f64,
    pub value: Option<f64>,
    /// Cumulative stacking base; zero unless stacking is active.
    pub offset: f64,
}

impl Datapoint {
    #[must_use]
    pub fn new(timestamp_sec: f64, value: Option<f64>) -> Self {
        Self {
            timestamp_sec,
            value,
            offset: 0.0,
        }
    }

    /// Plotted value: raw value plus stacking offset. Gaps stay gaps.
    #[must_use]
    pub fn graph_value(self) -> Option<f64> {
        self.value.map(|value| value + self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub name: String,
    pub index: usize,
    pub datapoints: Vec<Datapoint>,
}

impl Series {
    /// Builds a series from raw samples. Timestamps must be finite and
    /// strictly ascending.
    pub fn from_raw(index: usize, raw: &RawSeries) -> ChartResult<Self> {
        let mut datapoints = Vec::with_capacity(raw.values.len());
        for RawSample(timestamp_sec, value) in &raw.values {
            if !timestamp_sec.is_finite() {
                return Err(ChartError::InvalidData(
                    "sample timestamps must be finite".to_owned(),
                ));
            }
            if let Some(previous) = datapoints.last().map(|p: &Datapoint| p.timestamp_sec) {
                if *timestamp_sec <= previous {
                    return Err(ChartError::InvalidData(format!(
                        "sample timestamps must be strictly ascending ({timestamp_sec} after {previous})"
                    )));
                }
            }
            datapoints.push(Datapoint::new(*timestamp_sec, value.parse()));
        }

        let name = series_name(&raw.metric);
        Ok(Self {
            key: format!("{name}:{index}"),
            name,
            index,
            datapoints,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    /// Datapoint stored at exactly `timestamp_sec` (within float noise).
    #[must_use]
    pub fn datapoint_at(&self, timestamp_sec: f64) -> Option<Datapoint> {
        let position = self
            .datapoints
            .partition_point(|p| p.timestamp_sec < timestamp_sec - TIMESTAMP_MATCH_EPSILON_SEC);
        self.datapoints
            .get(position)
            .copied()
            .filter(|p| (p.timestamp_sec - timestamp_sec).abs() <= TIMESTAMP_MATCH_EPSILON_SEC)
    }
}

/// Parses every raw series, keying each by name and position.
pub fn parse_series(raw: &[RawSeries]) -> ChartResult<Vec<Series>> {
    raw.iter()
        .enumerate()
        .map(|(index, series)| Series::from_raw(index, series))
        .collect()
}

/// Uniform sample grid shared by all series of one graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub start_sec: f64,
    pub end_sec: f64,
    pub step_sec: f64,
}

impl TimeGrid {
    pub fn new(start_sec: f64, end_sec: f64, step_sec: f64) -> ChartResult<Self> {
        if !start_sec.is_finite() || !end_sec.is_finite() || end_sec < start_sec {
            return Err(ChartError::InvalidData(
                "time grid bounds must be finite and ordered".to_owned(),
            ));
        }
        if !step_sec.is_finite() || step_sec <= 0.0 {
            return Err(ChartError::InvalidData(
                "time grid step must be finite and > 0".to_owned(),
            ));
        }
        let grid = Self {
            start_sec,
            end_sec,
            step_sec,
        };
        grid.count()?;
        Ok(grid)
    }

    /// Infers the grid from the data: earliest to latest sample, stepping by
    /// the smallest spacing seen. Returns `None` when there are no samples.
    #[must_use]
    pub fn infer(series: &[Series]) -> Option<Self> {
        let mut start = f64::INFINITY;
        let mut end = f64::NEG_INFINITY;
        let mut step = f64::INFINITY;

        for item in series {
            let (Some(first), Some(last)) = (item.datapoints.first(), item.datapoints.last())
            else {
                continue;
            };
            start = start.min(first.timestamp_sec);
            end = end.max(last.timestamp_sec);
            for pair in item.datapoints.windows(2) {
                let spacing = pair[1].timestamp_sec - pair[0].timestamp_sec;
                if spacing > 0.0 {
                    step = step.min(spacing);
                }
            }
        }

        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        if !step.is_finite() {
            step = 1.0;
        }
        Some(Self {
            start_sec: start,
            end_sec: end,
            step_sec: step,
        })
    }

    /// Number of samples from start to end inclusive.
    ///
    /// Fails for grids spanning more than [`MAX_GRID_SAMPLES`] samples or
    /// built with non-finite fields.
    pub fn count(self) -> ChartResult<usize> {
        let steps = ((self.end_sec - self.start_sec) / self.step_sec).round();
        if !steps.is_finite() || steps < 0.0 || steps >= MAX_GRID_SAMPLES as f64 {
            return Err(ChartError::InvalidData(format!(
                "time grid spans more than {MAX_GRID_SAMPLES} samples"
            )));
        }
        Ok(steps as usize + 1)
    }
}

/// Recomputes stacking offsets in place.
///
/// When `stacked`, each datapoint's offset is the sum of the non-gap values
/// of the preceding series at the same timestamp; otherwise all offsets are
/// reset to zero. Series are stacked in iteration order.
pub fn stack_series<'a>(series: impl IntoIterator<Item = &'a mut Series>, stacked: bool) {
    let mut running: HashMap<i64, f64> = HashMap::new();
    let mut count = 0_usize;
    for item in series {
        count += 1;
        for point in &mut item.datapoints {
            if !stacked {
                point.offset = 0.0;
                continue;
            }
            let base = running.entry(timestamp_key(point.timestamp_sec)).or_insert(0.0);
            point.offset = *base;
            if let Some(value) = point.value {
                *base += value;
            }
        }
    }
    trace!(series = count, stacked, "stack offsets recomputed");
}

/// `(min, max)` over all plotted values, or `None` when everything is a gap.
#[must_use]
pub fn graph_value_extent(series: &[Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|item| item.datapoints.iter())
        .filter_map(|point| point.graph_value())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

fn timestamp_key(timestamp_sec: f64) -> i64 {
    (timestamp_sec * 1_000.0).round() as i64
}
