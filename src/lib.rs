//! chronoscope: time-series graph and time-travel timeline math.
//!
//! Scales, tick generation, hover focus and pan/zoom transforms are pure
//! functions in `core`; `api` wraps them in stateful engines that emit
//! backend-agnostic `RenderFrame`s and notify registered observers.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GraphConfig, TimeSeriesGraph, Timeline, TimelineConfig};
pub use error::{ChartError, ChartResult};
