use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Time axis that snaps any timestamp to the nearest member of a uniform
/// sample grid `{start + i * step | 0 <= i < count}`.
///
/// Hover positions always resolve to an exact sample. When a timestamp sits
/// exactly halfway between two samples the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizingTimeScale {
    start_sec: f64,
    step_sec: f64,
    count: usize,
    pixels: LinearScale,
}

impl QuantizingTimeScale {
    pub fn new(
        start_sec: f64,
        step_sec: f64,
        count: usize,
        range: (f64, f64),
    ) -> ChartResult<Self> {
        if !start_sec.is_finite() {
            return Err(ChartError::InvalidData(
                "quantized time start must be finite".to_owned(),
            ));
        }
        if !step_sec.is_finite() || step_sec <= 0.0 {
            return Err(ChartError::InvalidData(
                "quantized time step must be finite and > 0".to_owned(),
            ));
        }
        if count == 0 {
            return Err(ChartError::InvalidData(
                "quantized time scale needs at least one timestamp".to_owned(),
            ));
        }

        let end_sec = start_sec + step_sec * (count - 1) as f64;
        let pixels = LinearScale::new((start_sec, end_sec), range)?;
        Ok(Self {
            start_sec,
            step_sec,
            count,
            pixels,
        })
    }

    #[must_use]
    pub fn step_sec(self) -> f64 {
        self.step_sec
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn first_timestamp(self) -> f64 {
        self.start_sec
    }

    #[must_use]
    pub fn last_timestamp(self) -> f64 {
        self.timestamp_at(self.count - 1)
    }

    /// Continuous input domain, padded by half a step on each side.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        let half = 0.5 * self.step_sec;
        (self.start_sec - half, self.last_timestamp() + half)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.pixels.range()
    }

    #[must_use]
    pub fn timestamp_at(self, index: usize) -> f64 {
        self.start_sec + self.step_sec * index.min(self.count - 1) as f64
    }

    pub fn timestamps(self) -> impl Iterator<Item = f64> {
        (0..self.count).map(move |index| self.timestamp_at(index))
    }

    /// Index of the grid member nearest to `time_sec`; exact half-step ties go
    /// to the lower index.
    #[must_use]
    pub fn index_of(self, time_sec: f64) -> usize {
        if !time_sec.is_finite() {
            return if time_sec > 0.0 { self.count - 1 } else { 0 };
        }
        let steps = (time_sec - self.start_sec) / self.step_sec;
        let nearest = (steps - 0.5).ceil();
        if nearest <= 0.0 {
            0
        } else {
            (nearest as usize).min(self.count - 1)
        }
    }

    #[must_use]
    pub fn quantize(self, time_sec: f64) -> f64 {
        self.timestamp_at(self.index_of(time_sec))
    }

    /// Pixel position of the grid member nearest to `time_sec`.
    #[must_use]
    pub fn forward(self, time_sec: f64) -> f64 {
        self.pixels.forward(self.quantize(time_sec))
    }

    /// Pixel position of `time_sec` without snapping, for axis ticks that do
    /// not sit on the sample grid.
    #[must_use]
    pub fn forward_unquantized(self, time_sec: f64) -> f64 {
        self.pixels.forward(time_sec)
    }

    /// Grid timestamp nearest to the pixel position.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.quantize(self.pixels.invert(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::QuantizingTimeScale;

    fn scale() -> QuantizingTimeScale {
        QuantizingTimeScale::new(100.0, 10.0, 5, (0.0, 400.0)).expect("scale")
    }

    #[test]
    fn snaps_to_nearest_member() {
        let scale = scale();
        assert_eq!(scale.quantize(103.0), 100.0);
        assert_eq!(scale.quantize(107.0), 110.0);
        assert_eq!(scale.quantize(-1_000.0), 100.0);
        assert_eq!(scale.quantize(1_000.0), 140.0);
    }

    #[test]
    fn exact_midpoint_goes_to_the_earlier_sample() {
        let scale = scale();
        assert_eq!(scale.quantize(105.0), 100.0);
        assert_eq!(scale.quantize(125.0), 120.0);
    }

    #[test]
    fn members_are_spread_evenly_over_the_range() {
        let scale = scale();
        assert_eq!(scale.forward(100.0), 0.0);
        assert_eq!(scale.forward(120.0), 200.0);
        assert_eq!(scale.forward(140.0), 400.0);
        assert_eq!(scale.invert(190.0), 120.0);
        assert_eq!(scale.domain(), (95.0, 145.0));
    }

    #[test]
    fn single_sample_maps_to_range_midpoint() {
        let scale = QuantizingTimeScale::new(50.0, 15.0, 1, (0.0, 300.0)).expect("scale");
        assert_eq!(scale.forward(0.0), 150.0);
        assert_eq!(scale.invert(299.0), 50.0);
    }

    #[test]
    fn rejects_empty_or_non_positive_grids() {
        assert!(QuantizingTimeScale::new(0.0, 1.0, 0, (0.0, 1.0)).is_err());
        assert!(QuantizingTimeScale::new(0.0, 0.0, 3, (0.0, 1.0)).is_err());
        assert!(QuantizingTimeScale::new(f64::NAN, 1.0, 3, (0.0, 1.0)).is_err());
    }
}
