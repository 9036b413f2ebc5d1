#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{LinearScale, QuantizingTimeScale};
use crate::render::{Color, LinePrimitive, PathPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{GraphViewState, HoverUpdate, SeriesView};

const SERIES_STROKE_WIDTH: f64 = 1.5;
const FOCUSED_STROKE_WIDTH: f64 = 2.5;
const STACKED_FILL_OPACITY: f64 = 0.6;
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.08);
const LABEL_COLOR: Color = Color::rgb(0.45, 0.45, 0.45);
const HOVER_GUIDE_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.35);
const LABEL_FONT_SIZE_PX: f64 = 11.0;
const LABEL_INSET_PX: f64 = 4.0;

/// Scene for one graph draw: series polylines split at gaps (filled bands when
/// stacked), value grid with labels, time labels and the hover guide.
///
/// A zero-size chart or a view without scales yields an empty frame.
#[must_use]
pub fn build_graph_frame(view: &GraphViewState, hover: Option<&HoverUpdate>) -> RenderFrame {
    let mut frame = RenderFrame::new(view.chart_size());
    let (Some(value_scale), Some(time_scale)) = (view.value_scale, view.time_scale) else {
        return frame;
    };
    if !view.chart_size().is_valid() {
        return frame;
    }
    let width = f64::from(view.chart_size().width);
    let height = f64::from(view.chart_size().height);

    for tick in &view.value_ticks {
        frame.lines.push(LinePrimitive::new(
            0.0,
            tick.offset_px,
            width,
            tick.offset_px,
            1.0,
            GRID_COLOR,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            LABEL_INSET_PX,
            tick.offset_px - LABEL_INSET_PX,
            LABEL_FONT_SIZE_PX,
            LABEL_COLOR,
            TextHAlign::Left,
        ));
    }

    for tick in &view.time_ticks {
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            tick.offset_px,
            height - LABEL_INSET_PX,
            LABEL_FONT_SIZE_PX,
            LABEL_COLOR,
            TextHAlign::Center,
        ));
    }

    let focused_key = hover
        .and_then(HoverUpdate::focused_point)
        .map(|point| point.key.as_str());
    let visible: Vec<&SeriesView> = view.visible_series().collect();

    #[cfg(feature = "parallel-projection")]
    let projected: Vec<Vec<PathPrimitive>> = visible
        .par_iter()
        .map(|series| {
            project_series(series, time_scale, value_scale, view.stacked, focused_key)
        })
        .collect();

    #[cfg(not(feature = "parallel-projection"))]
    let projected: Vec<Vec<PathPrimitive>> = visible
        .iter()
        .map(|series| {
            project_series(series, time_scale, value_scale, view.stacked, focused_key)
        })
        .collect();

    frame.paths.extend(projected.into_iter().flatten());

    if let Some(hover_x) = hover.and_then(|update| update.hover_x) {
        frame.lines.push(LinePrimitive::new(
            hover_x,
            0.0,
            hover_x,
            height,
            1.0,
            HOVER_GUIDE_COLOR,
        ));
    }

    frame
}

/// One path per run of consecutive non-gap samples.
fn project_series(
    view: &SeriesView,
    time_scale: QuantizingTimeScale,
    value_scale: LinearScale,
    stacked: bool,
    focused_key: Option<&str>,
) -> Vec<PathPrimitive> {
    let stroke_width = if focused_key == Some(view.series.key.as_str()) {
        FOCUSED_STROKE_WIDTH
    } else {
        SERIES_STROKE_WIDTH
    };

    let mut paths = Vec::new();
    let mut points = Vec::new();
    let mut baseline = Vec::new();
    let mut flush = |points: &mut Vec<(f64, f64)>, baseline: &mut Vec<(f64, f64)>| {
        if points.is_empty() {
            return;
        }
        let path = PathPrimitive::stroke(std::mem::take(points), stroke_width, view.color);
        let baseline = std::mem::take(baseline);
        paths.push(if stacked {
            path.with_fill(baseline, view.color.faded(STACKED_FILL_OPACITY))
        } else {
            path
        });
    };

    for point in &view.series.datapoints {
        match point.graph_value() {
            Some(graph_value) => {
                let x = time_scale.forward(point.timestamp_sec);
                points.push((x, value_scale.forward(graph_value)));
                baseline.push((x, value_scale.forward(point.offset)));
            }
            None => flush(&mut points, &mut baseline),
        }
    }
    flush(&mut points, &mut baseline);
    paths
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::build_graph_frame;
    use crate::api::{GraphConfig, GraphProps, GraphUiState, derive_view_state};
    use crate::core::{RawSample, RawSampleValue, RawSeries, Viewport};

    fn props(stacked: bool) -> GraphProps {
        let values = ["1", "2", "NaN", "4", "5"];
        GraphProps {
            config: GraphConfig::default().with_stacked(stacked),
            raw_series: vec![RawSeries::new(
                IndexMap::new(),
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| RawSample(i as f64 * 15.0, RawSampleValue::Text((*v).to_owned())))
                    .collect(),
            )],
            grid: None,
        }
    }

    #[test]
    fn gaps_split_series_into_separate_paths() {
        let ui = GraphUiState {
            chart_size: Viewport::new(300, 100),
            selected_legend_key: None,
        };
        let view = derive_view_state(&props(false), &ui).expect("view");
        let frame = build_graph_frame(&view, None);
        assert_eq!(frame.paths.len(), 2);
        assert_eq!(frame.paths[0].points.len(), 2);
        assert!(frame.paths.iter().all(|path| path.fill_color.is_none()));
        frame.validate().expect("valid frame");
    }

    #[test]
    fn stacked_paths_are_filled_to_their_offsets() {
        let ui = GraphUiState {
            chart_size: Viewport::new(300, 100),
            selected_legend_key: None,
        };
        let view = derive_view_state(&props(true), &ui).expect("view");
        let frame = build_graph_frame(&view, None);
        assert!(frame.paths.iter().all(|path| path.fill_color.is_some()));
        assert!(
            frame
                .paths
                .iter()
                .all(|path| path.baseline.len() == path.points.len())
        );
    }

    #[test]
    fn zero_size_chart_draws_nothing() {
        let ui = GraphUiState {
            chart_size: Viewport::new(0, 0),
            selected_legend_key: None,
        };
        let view = derive_view_state(&props(false), &ui).expect("view");
        assert!(build_graph_frame(&view, None).is_empty());
    }
}
