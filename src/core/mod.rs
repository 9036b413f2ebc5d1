pub mod period;
pub mod quantize;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod transform;
pub mod types;
pub mod units;

pub use period::{Period, PeriodInterval, PeriodSettings};
pub use quantize::QuantizingTimeScale;
pub use scale::LinearScale;
pub use series::{
    Datapoint, MAX_GRID_SAMPLES, RawSample, RawSampleValue, RawSeries, Series, TimeGrid,
    graph_value_extent, parse_sample_value, parse_series, series_name, stack_series,
};
pub use ticks::{StepCandidates, Tick, choose_step, time_ticks, value_ticks};
pub use transform::{
    DEFAULT_RANGE_MS, INITIAL_DURATION_PER_PX_MS, MAX_DURATION_PER_PX_MS, MIN_DURATION_PER_PX_MS,
    TimelineTransform, ZoomLimits,
};
pub use types::Viewport;
pub use units::{GAP_LABEL, MetricUnits};
