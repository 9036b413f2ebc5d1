use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    LinearScale, MetricUnits, QuantizingTimeScale, RawSeries, Series, Tick, TimeGrid, Viewport,
    graph_value_extent, parse_series, stack_series, time_ticks, value_ticks,
};
use crate::error::ChartResult;
use crate::render::Color;

use super::GraphConfig;

/// Everything the graph view is derived from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphProps {
    pub config: GraphConfig,
    pub raw_series: Vec<RawSeries>,
    /// Sample grid; inferred from the data when absent.
    pub grid: Option<TimeGrid>,
}

/// The part of a previous view state that survives re-derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphUiState {
    pub chart_size: Viewport,
    pub selected_legend_key: Option<String>,
}

/// A parsed series with its color and visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesView {
    pub series: Series,
    pub color: Color,
    pub visible: bool,
}

/// Fully derived graph state for one chart size and legend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphViewState {
    pub ui: GraphUiState,
    pub series: Vec<SeriesView>,
    /// Stacking is in effect (requested and no legend selection).
    pub stacked: bool,
    pub units: MetricUnits,
    pub value_domain: (f64, f64),
    /// `None` for a zero-size chart.
    pub value_scale: Option<LinearScale>,
    /// `None` for a zero-size chart or when there is no sample grid.
    pub time_scale: Option<QuantizingTimeScale>,
    pub value_ticks: Vec<Tick>,
    pub time_ticks: Vec<Tick>,
}

impl GraphViewState {
    /// State of a graph without data.
    #[must_use]
    pub fn empty(chart_size: Viewport) -> Self {
        Self {
            ui: GraphUiState {
                chart_size,
                selected_legend_key: None,
            },
            series: Vec::new(),
            stacked: false,
            units: MetricUnits::None,
            value_domain: (0.0, 0.0),
            value_scale: None,
            time_scale: None,
            value_ticks: Vec::new(),
            time_ticks: Vec::new(),
        }
    }

    #[must_use]
    pub fn chart_size(&self) -> Viewport {
        self.ui.chart_size
    }

    #[must_use]
    pub fn selected_legend_key(&self) -> Option<&str> {
        self.ui.selected_legend_key.as_deref()
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &SeriesView> {
        self.series.iter().filter(|view| view.visible)
    }

    #[must_use]
    pub fn has_series(&self, key: &str) -> bool {
        self.series.iter().any(|view| view.series.key == key)
    }

    /// Largest value shown on the value axis; reference for label formatting.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.value_domain.1
    }
}

/// Recomputes the whole view from `props` and the surviving UI state.
///
/// The previous selection is kept only while a series with that key exists.
pub fn derive_view_state(props: &GraphProps, prev: &GraphUiState) -> ChartResult<GraphViewState> {
    let config = props.config.validate()?;
    let parsed = parse_series(&props.raw_series)?;

    let selected_legend_key = prev
        .selected_legend_key
        .as_ref()
        .filter(|key| parsed.iter().any(|series| &series.key == *key))
        .cloned();
    if prev.selected_legend_key.is_some() && selected_legend_key.is_none() {
        debug!("legend selection dropped, series no longer present");
    }

    let stacked = config.show_stacked && selected_legend_key.is_none();
    let mut series: Vec<SeriesView> = parsed
        .into_iter()
        .map(|series| {
            let visible = selected_legend_key
                .as_ref()
                .is_none_or(|key| *key == series.key);
            SeriesView {
                color: config.color_scheme.color_for(series.index),
                series,
                visible,
            }
        })
        .collect();

    stack_series(
        series
            .iter_mut()
            .filter(|view| !view.visible)
            .map(|view| &mut view.series),
        false,
    );
    stack_series(
        series
            .iter_mut()
            .filter(|view| view.visible)
            .map(|view| &mut view.series),
        stacked,
    );

    let visible: Vec<Series> = series
        .iter()
        .filter(|view| view.visible)
        .map(|view| view.series.clone())
        .collect();
    let value_domain = value_domain(&visible, config.values_min_spread);

    let grid = match props.grid {
        Some(grid) => Some(grid),
        None => TimeGrid::infer(&visible),
    };

    let chart_size = prev.chart_size;
    let (value_scale, time_scale) = if chart_size.is_valid() {
        let width = f64::from(chart_size.width);
        let height = f64::from(chart_size.height);
        let value_scale = LinearScale::new(value_domain, (height, 0.0))?;
        let time_scale = grid
            .map(|grid| {
                QuantizingTimeScale::new(grid.start_sec, grid.step_sec, grid.count()?, (0.0, width))
            })
            .transpose()?;
        (Some(value_scale), time_scale)
    } else {
        (None, None)
    };

    let value_ticks = value_scale
        .map(|scale| value_ticks(scale, chart_size, config.metric_units))
        .unwrap_or_default();
    let time_ticks = time_scale
        .map(|scale| time_ticks(scale, chart_size))
        .unwrap_or_default();

    trace!(
        series = series.len(),
        visible = visible.len(),
        stacked,
        value_ticks = value_ticks.len(),
        time_ticks = time_ticks.len(),
        "graph view derived"
    );

    Ok(GraphViewState {
        ui: GraphUiState {
            chart_size,
            selected_legend_key,
        },
        series,
        stacked,
        units: config.metric_units,
        value_domain,
        value_scale,
        time_scale,
        value_ticks,
        time_ticks,
    })
}

/// `[min(0, lowest), max(highest, low + min_spread)]`.
fn value_domain(visible: &[Series], min_spread: f64) -> (f64, f64) {
    let (lowest, highest) = graph_value_extent(visible).unwrap_or((0.0, 0.0));
    let low = lowest.min(0.0);
    (low, highest.max(low + min_spread))
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{GraphProps, GraphUiState, derive_view_state};
    use crate::api::GraphConfig;
    use crate::core::{RawSample, RawSampleValue, RawSeries, Viewport};

    fn raw(name: &str, values: &[f64]) -> RawSeries {
        let mut metric = IndexMap::new();
        metric.insert("__name__".to_owned(), name.to_owned());
        RawSeries::new(
            metric,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| RawSample(i as f64 * 10.0, RawSampleValue::Number(*v)))
                .collect(),
        )
    }

    fn props(stacked: bool) -> GraphProps {
        GraphProps {
            config: GraphConfig::default().with_stacked(stacked),
            raw_series: vec![raw("a", &[1.0, 2.0]), raw("b", &[3.0, 4.0])],
            grid: None,
        }
    }

    fn ui(selected: Option<&str>) -> GraphUiState {
        GraphUiState {
            chart_size: Viewport::new(400, 200),
            selected_legend_key: selected.map(str::to_owned),
        }
    }

    #[test]
    fn stacked_domain_covers_cumulative_values() {
        let view = derive_view_state(&props(true), &ui(None)).expect("view");
        assert!(view.stacked);
        assert_eq!(view.value_domain, (0.0, 6.0));
        assert!(!view.value_ticks.is_empty());
        assert!(!view.time_ticks.is_empty());
    }

    #[test]
    fn selection_disables_stacking_and_hides_other_series() {
        let view = derive_view_state(&props(true), &ui(Some("b:1"))).expect("view");
        assert!(!view.stacked);
        assert_eq!(view.visible_series().count(), 1);
        assert_eq!(view.value_domain, (0.0, 4.0));
        assert!(
            view.series
                .iter()
                .all(|s| s.series.datapoints.iter().all(|p| p.offset == 0.0))
        );
    }

    #[test]
    fn stale_selection_is_dropped() {
        let view = derive_view_state(&props(false), &ui(Some("gone:7"))).expect("view");
        assert_eq!(view.selected_legend_key(), None);
        assert_eq!(view.visible_series().count(), 2);
    }

    #[test]
    fn flat_series_get_the_minimum_spread() {
        let props = GraphProps {
            raw_series: vec![raw("flat", &[0.0, 0.0])],
            ..GraphProps::default()
        };
        let view = derive_view_state(&props, &ui(None)).expect("view");
        assert_eq!(view.value_domain, (0.0, 0.012));
    }

    #[test]
    fn zero_size_chart_has_no_scales_or_ticks() {
        let view = derive_view_state(
            &props(false),
            &GraphUiState {
                chart_size: Viewport::new(0, 200),
                selected_legend_key: None,
            },
        )
        .expect("view");
        assert!(view.value_scale.is_none());
        assert!(view.time_scale.is_none());
        assert!(view.value_ticks.is_empty());
        assert!(view.time_ticks.is_empty());
    }
}
