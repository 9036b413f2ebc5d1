use serde::{Deserialize, Serialize};

/// Placeholder rendered for gap samples.
pub const GAP_LABEL: &str = "---";

/// Values closer to zero than this render as a literal `0` for unitless metrics.
const NONE_ZERO_THRESHOLD: f64 = 0.01;

/// Share of the largest visible value used as the reference for axis labels.
pub const AXIS_REFERENCE_FRACTION: f64 = 0.1;
/// Share of the largest visible value used as the reference for tooltips.
pub const TOOLTIP_REFERENCE_FRACTION: f64 = 0.01;

const DECIMAL_SUFFIXES: [(f64, &str); 5] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
];

const BYTE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Unit family of a metric; decides tick candidates and label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnits {
    #[default]
    None,
    Bytes,
    Percent,
}

impl MetricUnits {
    /// Formats `value` with precision and suffix derived from `reference`, so
    /// every label of one view shares the same unit.
    #[must_use]
    pub fn format(self, value: Option<f64>, reference: f64) -> String {
        let Some(value) = value else {
            return GAP_LABEL.to_owned();
        };
        match self {
            Self::None => format_unitless(value, reference),
            Self::Bytes => format_bytes(value, reference),
            Self::Percent => format!("{:.2}%", value * 100.0),
        }
    }

    #[must_use]
    pub fn format_axis(self, value: f64, max_value: f64) -> String {
        self.format(Some(value), max_value * AXIS_REFERENCE_FRACTION)
    }

    #[must_use]
    pub fn format_tooltip(self, value: Option<f64>, max_value: f64) -> String {
        self.format(value, max_value * TOOLTIP_REFERENCE_FRACTION)
    }
}

fn reference_magnitude(value: f64, reference: f64) -> f64 {
    if reference.is_finite() && reference != 0.0 {
        reference.abs()
    } else {
        value.abs()
    }
}

fn format_unitless(value: f64, reference: f64) -> String {
    if value.abs() < NONE_ZERO_THRESHOLD {
        return "0".to_owned();
    }

    let magnitude = reference_magnitude(value, reference);
    let (divisor, suffix) = DECIMAL_SUFFIXES
        .iter()
        .copied()
        .find(|(threshold, _)| magnitude >= *threshold)
        .unwrap_or((1.0, ""));

    let scaled_reference = magnitude / divisor;
    let precision = if scaled_reference >= 1.0 {
        0
    } else if scaled_reference >= 0.1 {
        1
    } else if scaled_reference >= 0.01 {
        2
    } else {
        3
    };
    format!("{:.precision$}{suffix}", value / divisor)
}

fn format_bytes(value: f64, reference: f64) -> String {
    let magnitude = reference_magnitude(value, reference);
    let mut exponent = 0;
    while exponent + 1 < BYTE_UNITS.len() && magnitude >= 1024_f64.powi(exponent as i32 + 1) {
        exponent += 1;
    }
    let scaled = (value / 1024_f64.powi(exponent as i32)).round();
    format!("{scaled} {}", BYTE_UNITS[exponent])
}
