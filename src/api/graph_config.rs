use serde::{Deserialize, Serialize};

use crate::core::MetricUnits;
use crate::error::{ChartError, ChartResult};

use super::ColorScheme;

pub const DEFAULT_VALUES_MIN_SPREAD: f64 = 0.012;

/// Recognized options of the time-series graph.
///
/// Serializable with the camelCase names hosts already use, every field
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    pub show_stacked: bool,
    pub metric_units: MetricUnits,
    pub color_scheme: ColorScheme,
    /// Tooltips list only the focused series.
    pub simple_tooltip: bool,
    pub legend_collapsable: bool,
    pub legend_shown: bool,
    /// Smallest span of the value axis, so flat series do not fill the chart.
    pub values_min_spread: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            show_stacked: false,
            metric_units: MetricUnits::None,
            color_scheme: ColorScheme::Mixed,
            simple_tooltip: false,
            legend_collapsable: false,
            legend_shown: true,
            values_min_spread: DEFAULT_VALUES_MIN_SPREAD,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn with_stacked(mut self, show_stacked: bool) -> Self {
        self.show_stacked = show_stacked;
        self
    }

    #[must_use]
    pub fn with_metric_units(mut self, metric_units: MetricUnits) -> Self {
        self.metric_units = metric_units;
        self
    }

    #[must_use]
    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    #[must_use]
    pub fn with_simple_tooltip(mut self, simple_tooltip: bool) -> Self {
        self.simple_tooltip = simple_tooltip;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, shown: bool, collapsable: bool) -> Self {
        self.legend_shown = shown;
        self.legend_collapsable = collapsable;
        self
    }

    #[must_use]
    pub fn with_values_min_spread(mut self, values_min_spread: f64) -> Self {
        self.values_min_spread = values_min_spread;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.values_min_spread.is_finite() || self.values_min_spread < 0.0 {
            return Err(ChartError::InvalidData(
                "values min spread must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse graph config: {e}")))?;
        config.validate()
    }
}
