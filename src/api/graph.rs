use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::core::{RawSeries, TimeGrid, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{GraphEvent, GraphObserver, ObserverRegistry};
use crate::interaction::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
use crate::render::{RenderFrame, Renderer};

use super::{
    GraphConfig, GraphProps, GraphUiState, GraphViewState, HoverUpdate, LegendEntry, LegendState,
    build_graph_frame, derive_view_state, legend_entries, resolve_hover, toggle_selection,
};

/// Stateful time-series graph consumed by host applications.
///
/// Owns the props, the derived view, hover and legend state, and forwards
/// user-facing changes to registered observers. Every input change goes
/// through `derive_view_state`.
pub struct TimeSeriesGraph<R: Renderer> {
    renderer: R,
    props: GraphProps,
    view: GraphViewState,
    legend: LegendState,
    hover: Option<HoverUpdate>,
    last_cursor: Option<(f64, f64)>,
    resize_debouncer: Debouncer<Viewport>,
    observers: ObserverRegistry<dyn GraphObserver>,
}

impl<R: Renderer> TimeSeriesGraph<R> {
    pub fn new(renderer: R, chart_size: Viewport, config: GraphConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let props = GraphProps {
            config,
            ..GraphProps::default()
        };
        let view = derive_view_state(
            &props,
            &GraphUiState {
                chart_size,
                selected_legend_key: None,
            },
        )?;
        Ok(Self {
            renderer,
            legend: LegendState::new(config.legend_shown, config.legend_collapsable),
            props,
            view,
            hover: None,
            last_cursor: None,
            resize_debouncer: Debouncer::new(DEFAULT_DEBOUNCE_WINDOW),
            observers: ObserverRegistry::default(),
        })
    }

    #[must_use]
    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debouncer = Debouncer::new(window);
        self
    }

    #[must_use]
    pub fn config(&self) -> GraphConfig {
        self.props.config
    }

    #[must_use]
    pub fn view_state(&self) -> &GraphViewState {
        &self.view
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverUpdate> {
        self.hover.as_ref()
    }

    #[must_use]
    pub fn legend(&self) -> LegendState {
        self.legend
    }

    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        legend_entries(&self.view.series, self.view.selected_legend_key())
    }

    pub fn register_observer(&mut self, observer: Box<dyn GraphObserver>) -> ChartResult<()> {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.unregister(observer_id)
    }

    /// Replaces the raw series. Invalid data leaves the graph untouched.
    pub fn set_data(&mut self, raw_series: Vec<RawSeries>) -> ChartResult<()> {
        let mut props = self.props.clone();
        props.raw_series = raw_series;
        self.apply_props(props)?;
        debug!(series = self.view.series.len(), "graph data replaced");
        Ok(())
    }

    /// Fixes the sample grid; `None` infers it from the data.
    pub fn set_grid(&mut self, grid: Option<TimeGrid>) -> ChartResult<()> {
        if let Some(grid) = grid {
            grid.count()?;
        }
        let mut props = self.props.clone();
        props.grid = grid;
        self.apply_props(props)
    }

    pub fn set_config(&mut self, config: GraphConfig) -> ChartResult<()> {
        let config = config.validate()?;
        let mut props = self.props.clone();
        props.config = config;
        self.apply_props(props)?;
        self.legend = LegendState::new(config.legend_shown, config.legend_collapsable);
        Ok(())
    }

    /// Records a new chart size. The view is re-derived and observers are
    /// notified once the resize debounce window has elapsed.
    pub fn resize(&mut self, width: u32, height: u32, now: Instant) {
        let chart_size = Viewport::new(width, height);
        if chart_size == self.view.chart_size() {
            if self.resize_debouncer.cancel().is_some() {
                trace!(width, height, "graph resize settled back to current size");
            }
            return;
        }
        trace!(width, height, "graph resize scheduled");
        self.resize_debouncer.push(chart_size, now);
    }

    /// Applies a settled resize. Returns `true` when one was applied.
    pub fn poll_debounced(&mut self, now: Instant) -> ChartResult<bool> {
        let Some(chart_size) = self.resize_debouncer.poll(now) else {
            return Ok(false);
        };
        let ui = GraphUiState {
            chart_size,
            selected_legend_key: self.view.ui.selected_legend_key.clone(),
        };
        self.view = derive_view_state(&self.props, &ui)?;
        self.refresh_hover();
        debug!(
            width = chart_size.width,
            height = chart_size.height,
            "graph resized"
        );
        self.emit(&GraphEvent::ChartResized {
            chart_width: chart_size.width,
            chart_height: chart_size.height,
        });
        Ok(true)
    }

    /// Resolves hover for a cursor at chart pixel `(x, y)` and notifies
    /// observers. A cursor that cannot be resolved clears the hover.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&HoverUpdate> {
        self.last_cursor = Some((x, y));
        match resolve_hover(&self.view, x, y, self.props.config.simple_tooltip) {
            Some(update) => {
                self.emit(&GraphEvent::HoverUpdated(update.clone()));
                self.hover = Some(update);
            }
            None => self.clear_hover(),
        }
        self.hover.as_ref()
    }

    /// Clears all hover state at once. Observers receive an empty update.
    pub fn pointer_leave(&mut self) {
        self.last_cursor = None;
        self.clear_hover();
    }

    /// Legend click: selects `key`, or clears the selection when `key` is
    /// already selected or `None`.
    pub fn select_legend_series(&mut self, key: Option<&str>) -> ChartResult<()> {
        if let Some(key) = key {
            if !self.view.has_series(key) {
                return Err(ChartError::UnknownSeries(key.to_owned()));
            }
        }
        let selected = toggle_selection(self.view.selected_legend_key(), key);
        if selected.as_deref() == self.view.selected_legend_key() {
            return Ok(());
        }

        let ui = GraphUiState {
            chart_size: self.view.chart_size(),
            selected_legend_key: selected.clone(),
        };
        self.view = derive_view_state(&self.props, &ui)?;
        debug!(key = ?selected, "legend selection changed");
        self.emit(&GraphEvent::SelectedLegendSeriesChanged { key: selected });
        self.refresh_hover();
        Ok(())
    }

    /// Shows or hides the legend when it is collapsable. Returns visibility.
    pub fn toggle_legend(&mut self) -> bool {
        self.legend.toggle()
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        build_graph_frame(&self.view, self.hover.as_ref())
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply_props(&mut self, props: GraphProps) -> ChartResult<()> {
        let view = derive_view_state(&props, &self.view.ui)
            .inspect_err(|err| warn!(error = %err, "rejected graph props"))?;
        let previous_key = self.view.ui.selected_legend_key.clone();
        self.props = props;
        self.view = view;
        if previous_key.is_some() && self.view.selected_legend_key().is_none() {
            self.emit(&GraphEvent::SelectedLegendSeriesChanged { key: None });
        }
        self.refresh_hover();
        Ok(())
    }

    fn refresh_hover(&mut self) {
        if let Some((x, y)) = self.last_cursor {
            self.pointer_move(x, y);
        }
    }

    fn clear_hover(&mut self) {
        if self.hover.take().is_some() {
            self.emit(&GraphEvent::HoverUpdated(HoverUpdate::cleared()));
        }
    }

    fn emit(&mut self, event: &GraphEvent) {
        if self.observers.is_empty() {
            return;
        }
        trace!(observers = self.observers.len(), "dispatching graph event");
        self.observers.for_each(|observer| observer.on_graph_event(event));
    }
}

impl<R: Renderer> std::fmt::Debug for TimeSeriesGraph<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSeriesGraph")
            .field("props", &self.props)
            .field("hover", &self.hover)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
