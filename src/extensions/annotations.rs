use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::TimelineTransform;
use crate::error::{ChartError, ChartResult};

/// Deployment (or any point-in-time event) shown on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub timestamp_ms: i64,
    pub label: Option<String>,
}

impl Deployment {
    #[must_use]
    pub fn new(id: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            id: id.into(),
            timestamp_ms,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPlacementConfig {
    pub marker_width_px: f64,
    pub label_char_width_px: f64,
    pub label_horizontal_padding_px: f64,
    pub lane_height_px: f64,
    pub min_horizontal_gap_px: f64,
}

impl Default for AnnotationPlacementConfig {
    fn default() -> Self {
        Self {
            marker_width_px: 2.0,
            label_char_width_px: 6.0,
            label_horizontal_padding_px: 4.0,
            lane_height_px: 12.0,
            min_horizontal_gap_px: 4.0,
        }
    }
}

impl AnnotationPlacementConfig {
    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.marker_width_px, "marker_width_px"),
            (self.label_char_width_px, "label_char_width_px"),
            (
                self.label_horizontal_padding_px,
                "label_horizontal_padding_px",
            ),
            (self.lane_height_px, "lane_height_px"),
            (self.min_horizontal_gap_px, "min_horizontal_gap_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "annotation config `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedDeployment {
    pub id: String,
    pub timestamp_ms: i64,
    pub x: f64,
    pub lane: usize,
    pub lane_offset_px: f64,
    pub label: Option<String>,
    pub collision_left_px: f64,
    pub collision_right_px: f64,
}

/// Positions deployments on a timeline `width_px` wide.
///
/// Deployments outside the visible range are dropped. Colliding labels are
/// moved to the first lane with room; order is stable by x, then id.
pub fn place_deployments(
    deployments: &[Deployment],
    transform: TimelineTransform,
    width_px: f64,
    config: AnnotationPlacementConfig,
) -> ChartResult<Vec<PlacedDeployment>> {
    let config = config.validate()?;
    if deployments.is_empty() || !width_px.is_finite() || width_px <= 0.0 {
        return Ok(Vec::new());
    }

    let mut prepared: Vec<(f64, &Deployment)> = deployments
        .iter()
        .map(|deployment| {
            (
                transform.time_to_px(deployment.timestamp_ms as f64, width_px),
                deployment,
            )
        })
        .filter(|(x, _)| (0.0..=width_px).contains(x))
        .collect();

    prepared.sort_by(|(left_x, left), (right_x, right)| {
        OrderedFloat(*left_x)
            .cmp(&OrderedFloat(*right_x))
            .then_with(|| left.id.cmp(&right.id))
    });

    let mut lane_last_right = Vec::<f64>::new();
    let placed = prepared
        .into_iter()
        .map(|(x, deployment)| {
            let span_half = 0.5
                * config
                    .marker_width_px
                    .max(label_width(deployment.label.as_deref(), config));
            let left = x - span_half;
            let right = x + span_half;
            let lane = allocate_lane(&mut lane_last_right, left, right, config.min_horizontal_gap_px);
            PlacedDeployment {
                id: deployment.id.clone(),
                timestamp_ms: deployment.timestamp_ms,
                x,
                lane,
                lane_offset_px: lane as f64 * config.lane_height_px,
                label: deployment.label.clone(),
                collision_left_px: left,
                collision_right_px: right,
            }
        })
        .collect();

    Ok(placed)
}

fn label_width(text: Option<&str>, config: AnnotationPlacementConfig) -> f64 {
    text.map_or(0.0, |value| {
        value.chars().count() as f64 * config.label_char_width_px
            + 2.0 * config.label_horizontal_padding_px
    })
}

fn allocate_lane(last_right: &mut Vec<f64>, left: f64, right: f64, min_gap: f64) -> usize {
    for (lane, lane_last_right) in last_right.iter_mut().enumerate() {
        if left >= *lane_last_right + min_gap {
            *lane_last_right = right;
            return lane;
        }
    }
    last_right.push(right);
    last_right.len() - 1
}
