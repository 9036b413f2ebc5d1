use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Unit of `WheelInput::delta_y`, as reported by the host's wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
}

impl WheelInput {
    #[must_use]
    pub fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            delta_mode: WheelDeltaMode::Pixel,
        }
    }

    #[must_use]
    pub fn lines(delta_y: f64) -> Self {
        Self {
            delta_y,
            delta_mode: WheelDeltaMode::Line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    pub line_height_px: f64,
    pub page_height_px: f64,
    /// Exponent per pixel of wheel travel.
    pub sensitivity: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            line_height_px: 33.0,
            page_height_px: 800.0,
            sensitivity: 0.002,
        }
    }
}

impl WheelSettings {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.line_height_px, "line_height_px"),
            (self.page_height_px, "page_height_px"),
            (self.sensitivity, "sensitivity"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "wheel setting `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    fn unit_px(self, mode: WheelDeltaMode) -> f64 {
        match mode {
            WheelDeltaMode::Pixel => 1.0,
            WheelDeltaMode::Line => self.line_height_px,
            WheelDeltaMode::Page => self.page_height_px,
        }
    }
}

/// Zoom factor `exp(-delta_y * unit_px * sensitivity)`; `> 1` zooms in.
///
/// Returns `None` for a zero delta.
pub fn resolve_wheel_zoom_factor(
    input: WheelInput,
    settings: WheelSettings,
) -> ChartResult<Option<f64>> {
    if !input.delta_y.is_finite() {
        return Err(ChartError::InvalidData(
            "wheel delta must be finite".to_owned(),
        ));
    }
    if input.delta_y == 0.0 {
        return Ok(None);
    }

    let exponent = -input.delta_y * settings.unit_px(input.delta_mode) * settings.sensitivity;
    let factor = exponent.exp();
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}
