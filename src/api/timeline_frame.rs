use crate::core::{TimelineTransform, Viewport};
use crate::extensions::PlacedDeployment;
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{PeriodTickRow, TICKS_ROW_SPACING_PX};

const TICK_COLOR: Color = Color::rgb(0.35, 0.35, 0.4);
const RANGE_COLOR: Color = Color::rgba(0.36, 0.55, 0.94, 0.2);
const FOCUS_COLOR: Color = Color::rgb(0.36, 0.55, 0.94);
const DEPLOYMENT_COLOR: Color = Color::rgb(0.96, 0.62, 0.04);
const LABEL_FONT_SIZE_PX: f64 = 11.0;
const LABEL_OFFSET_PX: f64 = 3.0;

/// Scene for one timeline draw: selected range, focus line, period label
/// rows faded by their opacity, and deployment markers.
#[must_use]
pub fn build_timeline_frame(
    viewport: Viewport,
    transform: TimelineTransform,
    rows: &[PeriodTickRow],
    deployments: &[PlacedDeployment],
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    if !viewport.is_valid() {
        return frame;
    }
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    let focused = transform.focused_timestamp_ms as f64;
    let range_start = transform
        .time_to_px(focused - transform.range_ms as f64, width)
        .clamp(0.0, width);
    let range_end = transform.time_to_px(focused, width).clamp(0.0, width);
    frame.rects.push(RectPrimitive::new(
        range_start,
        0.0,
        range_end - range_start,
        height,
        RANGE_COLOR,
    ));
    let center = 0.5 * width;
    frame
        .lines
        .push(LinePrimitive::new(center, 0.0, center, height, 1.0, FOCUS_COLOR));

    for row in rows {
        let color = TICK_COLOR.faded(row.opacity);
        for tick in &row.ticks {
            if !tick.is_behind {
                frame.lines.push(LinePrimitive::new(
                    tick.x,
                    row.y_px,
                    tick.x,
                    row.y_px + TICKS_ROW_SPACING_PX,
                    1.0,
                    color,
                ));
            }
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                tick.x + LABEL_OFFSET_PX,
                row.y_px + TICKS_ROW_SPACING_PX - LABEL_OFFSET_PX,
                LABEL_FONT_SIZE_PX,
                color,
                TextHAlign::Left,
            ));
        }
    }

    for deployment in deployments {
        let top = height - deployment.lane_offset_px;
        frame.lines.push(LinePrimitive::new(
            deployment.x,
            0.0,
            deployment.x,
            top,
            2.0,
            DEPLOYMENT_COLOR,
        ));
        if let Some(label) = deployment.label.as_deref().filter(|label| !label.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                label,
                deployment.x,
                top - LABEL_OFFSET_PX,
                LABEL_FONT_SIZE_PX,
                DEPLOYMENT_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::build_timeline_frame;
    use crate::api::period_tick_rows;
    use crate::core::{TimelineTransform, Viewport};

    #[test]
    fn range_highlight_ends_at_the_focus() {
        let transform = TimelineTransform::new(1_710_504_000_000, 60_000.0, 3_600_000)
            .expect("transform");
        let rows = period_tick_rows(transform, 1_000.0);
        let frame = build_timeline_frame(Viewport::new(1_000, 60), transform, &rows, &[]);
        let range = frame.rects[0];
        assert_eq!(range.x, 440.0);
        assert_eq!(range.width, 60.0);
        assert!(!frame.texts.is_empty());
        frame.validate().expect("valid frame");
    }

    #[test]
    fn zero_size_timeline_draws_nothing() {
        let transform = TimelineTransform::new(0, 60_000.0, 0).expect("transform");
        assert!(build_timeline_frame(Viewport::new(0, 60), transform, &[], &[]).is_empty());
    }
}
