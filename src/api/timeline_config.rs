use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_RANGE_MS, INITIAL_DURATION_PER_PX_MS, ZoomLimits};
use crate::error::{ChartError, ChartResult};
use crate::extensions::AnnotationPlacementConfig;
use crate::interaction::WheelSettings;

pub const DEFAULT_ZOOM_DEBOUNCE_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub zoom_limits: ZoomLimits,
    pub initial_duration_per_px_ms: f64,
    pub range_ms: i64,
    pub zoom_debounce_ms: u64,
    pub wheel: WheelSettings,
    /// Ask the host to suppress the default scroll action of wheel events
    /// over the timeline.
    pub prevent_wheel_default: bool,
    pub annotations: AnnotationPlacementConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            zoom_limits: ZoomLimits::default(),
            initial_duration_per_px_ms: INITIAL_DURATION_PER_PX_MS,
            range_ms: DEFAULT_RANGE_MS,
            zoom_debounce_ms: DEFAULT_ZOOM_DEBOUNCE_MS,
            wheel: WheelSettings::default(),
            prevent_wheel_default: true,
            annotations: AnnotationPlacementConfig::default(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn with_zoom_limits(mut self, zoom_limits: ZoomLimits) -> Self {
        self.zoom_limits = zoom_limits;
        self
    }

    #[must_use]
    pub fn with_initial_duration_per_px_ms(mut self, duration_per_px_ms: f64) -> Self {
        self.initial_duration_per_px_ms = duration_per_px_ms;
        self
    }

    #[must_use]
    pub fn with_range_ms(mut self, range_ms: i64) -> Self {
        self.range_ms = range_ms;
        self
    }

    #[must_use]
    pub fn with_zoom_debounce_ms(mut self, zoom_debounce_ms: u64) -> Self {
        self.zoom_debounce_ms = zoom_debounce_ms;
        self
    }

    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelSettings) -> Self {
        self.wheel = wheel;
        self
    }

    #[must_use]
    pub fn with_prevent_wheel_default(mut self, prevent_wheel_default: bool) -> Self {
        self.prevent_wheel_default = prevent_wheel_default;
        self
    }

    #[must_use]
    pub fn zoom_debounce(self) -> Duration {
        Duration::from_millis(self.zoom_debounce_ms)
    }

    pub fn validate(self) -> ChartResult<Self> {
        let zoom_limits = self.zoom_limits.validate()?;
        self.wheel.validate()?;
        if !self.initial_duration_per_px_ms.is_finite() || self.initial_duration_per_px_ms <= 0.0 {
            return Err(ChartError::InvalidData(
                "initial duration per pixel must be finite and > 0".to_owned(),
            ));
        }
        if self.range_ms < 0 {
            return Err(ChartError::InvalidData(
                "timeline range must be >= 0".to_owned(),
            ));
        }
        Ok(Self {
            zoom_limits,
            ..self
        })
    }
}
