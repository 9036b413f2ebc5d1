use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::Color;

use super::GraphViewState;

/// Snapshot of one visible series at the hovered timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub key: String,
    pub name: String,
    pub color: Color,
    /// `None` for a gap sample.
    pub value: Option<f64>,
    /// Value plus stacking offset.
    pub graph_value: Option<f64>,
    /// Tooltip text for `value`.
    pub label: String,
    pub focused: bool,
}

/// Payload of the hover callback. The default value is the cleared state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverUpdate {
    pub hover_points: Vec<HoverPoint>,
    pub hover_timestamp_sec: Option<f64>,
    pub hover_x: Option<f64>,
    pub hover_y: Option<f64>,
}

impl HoverUpdate {
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.hover_points.is_empty() && self.hover_timestamp_sec.is_none()
    }

    /// The single focused point; `None` when nothing or every point of a
    /// multi-series hover is focused.
    #[must_use]
    pub fn focused_point(&self) -> Option<&HoverPoint> {
        let mut focused = self.hover_points.iter().filter(|point| point.focused);
        match (focused.next(), focused.next()) {
            (Some(point), None) => Some(point),
            _ => None,
        }
    }
}

/// How the focused series is picked among the hovered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
    /// Smallest value at or above the cursor: the band the cursor is inside.
    Stacked,
    /// Value nearest to the cursor; the first series wins ties.
    Line,
}

/// Index of the focused entry of `graph_values` for a cursor at
/// `cursor_value`. Gaps never take focus.
#[must_use]
pub fn focused_index(
    graph_values: &[Option<f64>],
    cursor_value: f64,
    mode: FocusMode,
) -> Option<usize> {
    let candidates = graph_values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.map(|value| (index, value)));
    match mode {
        FocusMode::Stacked => candidates
            .filter(|(_, value)| *value >= cursor_value)
            .min_by_key(|(_, value)| OrderedFloat(*value))
            .map(|(index, _)| index),
        FocusMode::Line => candidates
            .min_by_key(|(_, value)| OrderedFloat((value - cursor_value).abs()))
            .map(|(index, _)| index),
    }
}

/// Resolves the hover state for a cursor at pixel `(x, y)`.
///
/// Returns `None` when nothing can be hovered: no visible series, no scales
/// (zero-size chart or empty grid), or a non-finite cursor.
#[must_use]
pub fn resolve_hover(
    view: &GraphViewState,
    x: f64,
    y: f64,
    simple_tooltip: bool,
) -> Option<HoverUpdate> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let (value_scale, time_scale) = (view.value_scale?, view.time_scale?);
    if view.visible_series().next().is_none() {
        return None;
    }

    let cursor_value = value_scale.invert(y);
    let timestamp_sec = time_scale.invert(x);

    let mut graph_values: SmallVec<[Option<f64>; 16]> = SmallVec::new();
    let mut hover_points: Vec<HoverPoint> = view
        .visible_series()
        .map(|view_series| {
            let datapoint = view_series.series.datapoint_at(timestamp_sec);
            let value = datapoint.and_then(|point| point.value);
            let graph_value = datapoint.and_then(|point| point.graph_value());
            graph_values.push(graph_value);
            HoverPoint {
                key: view_series.series.key.clone(),
                name: view_series.series.name.clone(),
                color: view_series.color,
                value,
                graph_value,
                label: view.units.format_tooltip(value, view.max_value()),
                focused: false,
            }
        })
        .collect();

    let mode = if view.stacked {
        FocusMode::Stacked
    } else {
        FocusMode::Line
    };
    match focused_index(&graph_values, cursor_value, mode) {
        Some(index) => hover_points[index].focused = true,
        None => hover_points
            .iter_mut()
            .for_each(|point| point.focused = true),
    }
    if simple_tooltip {
        hover_points.retain(|point| point.focused);
    }

    Some(HoverUpdate {
        hover_points,
        hover_timestamp_sec: Some(timestamp_sec),
        hover_x: Some(time_scale.forward(timestamp_sec)),
        hover_y: Some(y),
    })
}

#[cfg(test)]
mod tests {
    use super::{FocusMode, focused_index};

    const STACKED: [Option<f64>; 3] = [Some(3.0), Some(10.0), Some(22.0)];

    #[test]
    fn stacked_focus_is_the_band_containing_the_cursor() {
        assert_eq!(focused_index(&STACKED, 8.0, FocusMode::Stacked), Some(1));
        assert_eq!(focused_index(&STACKED, 3.0, FocusMode::Stacked), Some(0));
        assert_eq!(focused_index(&STACKED, 30.0, FocusMode::Stacked), None);
    }

    #[test]
    fn line_focus_is_the_nearest_value() {
        assert_eq!(focused_index(&STACKED, 8.0, FocusMode::Line), Some(1));
        assert_eq!(focused_index(&STACKED, 100.0, FocusMode::Line), Some(2));
    }

    #[test]
    fn line_ties_go_to_the_first_series() {
        let values = [Some(4.0), Some(6.0)];
        assert_eq!(focused_index(&values, 5.0, FocusMode::Line), Some(0));
    }

    #[test]
    fn gaps_never_take_focus() {
        let values = [None, Some(10.0)];
        assert_eq!(focused_index(&values, 0.0, FocusMode::Line), Some(1));
        assert_eq!(focused_index(&[None, None], 0.0, FocusMode::Stacked), None);
    }
}
