use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const MIN_DURATION_PER_PX_MS: f64 = 250.0;
pub const MAX_DURATION_PER_PX_MS: f64 = 3.0 * 86_400_000.0;
pub const INITIAL_DURATION_PER_PX_MS: f64 = 60_000.0;
pub const DEFAULT_RANGE_MS: i64 = 3_600_000;

/// Allowed band for the timeline's zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_duration_per_px_ms: f64,
    pub max_duration_per_px_ms: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_duration_per_px_ms: MIN_DURATION_PER_PX_MS,
            max_duration_per_px_ms: MAX_DURATION_PER_PX_MS,
        }
    }
}

impl ZoomLimits {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_duration_per_px_ms.is_finite()
            || !self.max_duration_per_px_ms.is_finite()
            || self.min_duration_per_px_ms <= 0.0
        {
            return Err(ChartError::InvalidData(
                "zoom limits must be finite and > 0".to_owned(),
            ));
        }
        if self.min_duration_per_px_ms > self.max_duration_per_px_ms {
            return Err(ChartError::InvalidData(
                "zoom limit min must be <= max".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, duration_per_px_ms: f64) -> f64 {
        duration_per_px_ms.clamp(self.min_duration_per_px_ms, self.max_duration_per_px_ms)
    }
}

/// Pan/zoom state of the timeline. The focused timestamp sits at the
/// horizontal center; `range_ms` is the selected window ending there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineTransform {
    pub focused_timestamp_ms: i64,
    pub duration_per_px_ms: f64,
    pub range_ms: i64,
}

impl TimelineTransform {
    pub fn new(
        focused_timestamp_ms: i64,
        duration_per_px_ms: f64,
        range_ms: i64,
    ) -> ChartResult<Self> {
        if !duration_per_px_ms.is_finite() || duration_per_px_ms <= 0.0 {
            return Err(ChartError::InvalidData(
                "duration per pixel must be finite and > 0".to_owned(),
            ));
        }
        if range_ms < 0 {
            return Err(ChartError::InvalidData(
                "timeline range must be >= 0".to_owned(),
            ));
        }
        Ok(Self {
            focused_timestamp_ms,
            duration_per_px_ms,
            range_ms,
        })
    }

    /// `(start_ms, end_ms)` covered by a timeline `width_px` wide.
    #[must_use]
    pub fn visible_range_ms(self, width_px: f64) -> (f64, f64) {
        let half = 0.5 * width_px * self.duration_per_px_ms;
        let focused = self.focused_timestamp_ms as f64;
        (focused - half, focused + half)
    }

    #[must_use]
    pub fn time_to_px(self, timestamp_ms: f64, width_px: f64) -> f64 {
        0.5 * width_px + (timestamp_ms - self.focused_timestamp_ms as f64) / self.duration_per_px_ms
    }

    #[must_use]
    pub fn px_to_time(self, pixel: f64, width_px: f64) -> f64 {
        self.focused_timestamp_ms as f64 + (pixel - 0.5 * width_px) * self.duration_per_px_ms
    }

    /// Moves the focus against the drag direction, never past `now_ms`.
    /// Returns `true` when the focus changed.
    pub fn pan_by_px(&mut self, drag_delta_px: f64, now_ms: i64) -> bool {
        if !drag_delta_px.is_finite() || drag_delta_px == 0.0 {
            return false;
        }
        let target = self.focused_timestamp_ms as f64 - drag_delta_px * self.duration_per_px_ms;
        self.set_focus(target.round() as i64, now_ms)
    }

    /// Sets the focus directly, clamped to `now_ms`.
    pub fn set_focus(&mut self, timestamp_ms: i64, now_ms: i64) -> bool {
        let clamped = timestamp_ms.min(now_ms);
        let changed = clamped != self.focused_timestamp_ms;
        self.focused_timestamp_ms = clamped;
        changed
    }

    /// Divides the duration per pixel by `factor` (> 1 zooms in) and clamps it
    /// into `limits`. Returns `true` when the zoom level changed.
    pub fn zoom_by_factor(&mut self, factor: f64, limits: ZoomLimits) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let clamped = limits.clamp(self.duration_per_px_ms / factor);
        let changed = clamped != self.duration_per_px_ms;
        self.duration_per_px_ms = clamped;
        changed
    }
}
