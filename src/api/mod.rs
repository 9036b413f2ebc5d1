//! Host-facing graph and timeline engines plus the pure derivations behind
//! them.

mod clock;
mod color_scheme;
mod graph;
mod graph_config;
mod graph_frame;
mod hover;
mod json_contract;
mod legend;
mod timeline;
mod timeline_config;
mod timeline_frame;
mod timeline_ticks;
mod view_state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use color_scheme::ColorScheme;
pub use graph::TimeSeriesGraph;
pub use graph_config::{DEFAULT_VALUES_MIN_SPREAD, GraphConfig};
pub use graph_frame::build_graph_frame;
pub use hover::{FocusMode, HoverPoint, HoverUpdate, focused_index, resolve_hover};
pub use json_contract::{
    HOVER_UPDATE_JSON_SCHEMA_V1, HoverUpdateJsonContractV1, period_tick_rows_to_json_pretty,
};
pub use legend::{LegendEntry, LegendState, legend_entries, toggle_selection};
pub use timeline::{Timeline, WheelOutcome};
pub use timeline_config::{DEFAULT_ZOOM_DEBOUNCE_MS, TimelineConfig};
pub use timeline_frame::build_timeline_frame;
pub use timeline_ticks::{
    FADE_OUT_FACTOR, INTERVAL_FIT_SLACK, MAX_TICK_ROWS, MAX_TICK_SPACING_PX, MIN_TICK_SPACING_PX,
    PeriodTick, PeriodTickRow, TICKS_ROW_SPACING_PX, finest_visible_period, find_optimal_interval,
    period_tick_rows, period_ticks, row_opacity, vertical_shift,
};
pub use view_state::{GraphProps, GraphUiState, GraphViewState, SeriesView, derive_view_state};
