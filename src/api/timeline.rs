use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Period, TimelineTransform, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    Deployment, ObserverRegistry, PlacedDeployment, TimelineEvent, TimelineObserver,
    place_deployments,
};
use crate::interaction::{Debouncer, InteractionState, WheelInput, resolve_wheel_zoom_factor};
use crate::render::{RenderFrame, Renderer};

use super::{
    Clock, PeriodTickRow, TimelineConfig, build_timeline_frame, finest_visible_period,
    period_tick_rows,
};

/// Result of one wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelOutcome {
    /// The host should suppress the event's default scroll action.
    pub prevent_default: bool,
    pub zoom_changed: bool,
    pub duration_per_px_ms: f64,
}

/// Pannable, zoomable time-travel timeline.
///
/// Panning is bounded by the clock's "now". Pan commits are reported when the
/// drag ends; zoom changes are reported once the zoom debounce settles.
pub struct Timeline<R: Renderer, C: Clock> {
    renderer: R,
    clock: C,
    config: TimelineConfig,
    viewport: Viewport,
    transform: TimelineTransform,
    interaction: InteractionState,
    zoom_debouncer: Debouncer<()>,
    deployments: Vec<Deployment>,
    observers: ObserverRegistry<dyn TimelineObserver>,
}

impl<R: Renderer, C: Clock> Timeline<R, C> {
    /// Creates a timeline focused on the clock's current time.
    pub fn new(renderer: R, clock: C, viewport: Viewport, config: TimelineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let transform = TimelineTransform::new(
            clock.now_ms(),
            config
                .zoom_limits
                .clamp(config.initial_duration_per_px_ms),
            config.range_ms,
        )?;
        Ok(Self {
            renderer,
            clock,
            viewport,
            transform,
            interaction: InteractionState::default(),
            zoom_debouncer: Debouncer::new(config.zoom_debounce()),
            deployments: Vec::new(),
            observers: ObserverRegistry::default(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn transform(&self) -> TimelineTransform {
        self.transform
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn register_observer(&mut self, observer: Box<dyn TimelineObserver>) -> ChartResult<()> {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.unregister(observer_id)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        trace!(
            width = viewport.width,
            height = viewport.height,
            "timeline resized"
        );
        self.viewport = viewport;
    }

    pub fn drag_start(&mut self) {
        self.interaction.on_pan_start();
        debug!(
            focused_timestamp_ms = self.transform.focused_timestamp_ms,
            "timeline pan started"
        );
    }

    /// Pans by a drag of `delta_px` (positive = rightwards = into the past).
    /// Returns `true` when the focus moved.
    pub fn drag_move(&mut self, delta_px: f64) -> bool {
        if !self.interaction.on_pan_move() {
            return false;
        }
        let now_ms = self.clock.now_ms();
        self.transform.pan_by_px(delta_px, now_ms)
    }

    /// Ends the drag. A drag that moved yields and dispatches `Panned`.
    pub fn drag_end(&mut self) -> Option<TimelineEvent> {
        if !self.interaction.on_pan_end() {
            return None;
        }
        debug!(
            focused_timestamp_ms = self.transform.focused_timestamp_ms,
            "timeline pan committed"
        );
        let event = TimelineEvent::Panned;
        self.emit(event);
        Some(event)
    }

    /// Zooms around the focused timestamp; the `Zoomed` event follows once
    /// wheel input has settled.
    pub fn wheel(&mut self, input: WheelInput, now: Instant) -> ChartResult<WheelOutcome> {
        let zoom_changed = match resolve_wheel_zoom_factor(input, self.config.wheel)? {
            Some(factor) => self
                .transform
                .zoom_by_factor(factor, self.config.zoom_limits),
            None => false,
        };
        if zoom_changed {
            self.zoom_debouncer.push((), now);
        } else {
            trace!(
                duration_per_px_ms = self.transform.duration_per_px_ms,
                "wheel zoom clamped"
            );
        }
        Ok(WheelOutcome {
            prevent_default: self.config.prevent_wheel_default,
            zoom_changed,
            duration_per_px_ms: self.transform.duration_per_px_ms,
        })
    }

    /// Delivers a settled zoom as `Zoomed` with the finest period that
    /// currently draws labels.
    pub fn poll_debounced(&mut self, now: Instant) -> Option<TimelineEvent> {
        self.zoom_debouncer.poll(now)?;
        let period = finest_visible_period(&self.period_tick_rows()).unwrap_or(Period::Year);
        debug!(
            period = period.name(),
            duration_per_px_ms = self.transform.duration_per_px_ms,
            "timeline zoom settled"
        );
        let event = TimelineEvent::Zoomed { period };
        self.emit(event);
        Some(event)
    }

    /// Focuses `timestamp_ms`, never past now. Returns `true` when it moved.
    pub fn jump_to(&mut self, timestamp_ms: i64) -> bool {
        let now_ms = self.clock.now_ms();
        self.transform.set_focus(timestamp_ms, now_ms)
    }

    pub fn set_range_ms(&mut self, range_ms: i64) -> ChartResult<()> {
        if range_ms < 0 {
            return Err(ChartError::InvalidData(
                "timeline range must be >= 0".to_owned(),
            ));
        }
        self.transform.range_ms = range_ms;
        Ok(())
    }

    #[must_use]
    pub fn visible_range_ms(&self) -> (f64, f64) {
        self.transform.visible_range_ms(self.width_px())
    }

    pub fn time_to_px(&self, timestamp_ms: f64) -> ChartResult<f64> {
        self.require_viewport()?;
        Ok(self.transform.time_to_px(timestamp_ms, self.width_px()))
    }

    pub fn px_to_time(&self, pixel: f64) -> ChartResult<f64> {
        self.require_viewport()?;
        Ok(self.transform.px_to_time(pixel, self.width_px()))
    }

    #[must_use]
    pub fn period_tick_rows(&self) -> Vec<PeriodTickRow> {
        period_tick_rows(self.transform, self.width_px())
    }

    pub fn set_deployments(&mut self, deployments: Vec<Deployment>) {
        debug!(count = deployments.len(), "timeline deployments replaced");
        self.deployments = deployments;
    }

    /// Deployments inside the visible range, laid out into label lanes.
    pub fn deployments(&self) -> ChartResult<Vec<PlacedDeployment>> {
        place_deployments(
            &self.deployments,
            self.transform,
            self.width_px(),
            self.config.annotations,
        )
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let deployments = self.deployments()?;
        Ok(build_timeline_frame(
            self.viewport,
            self.transform,
            &self.period_tick_rows(),
            &deployments,
        ))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn width_px(&self) -> f64 {
        f64::from(self.viewport.width)
    }

    fn require_viewport(&self) -> ChartResult<()> {
        if self.viewport.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            })
        }
    }

    fn emit(&mut self, event: TimelineEvent) {
        let transform = self.transform;
        self.observers
            .for_each(|observer| observer.on_timeline_event(event, transform));
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Timeline;
    use crate::api::{FixedClock, TimelineConfig};
    use crate::core::{Period, Viewport};
    use crate::extensions::TimelineEvent;
    use crate::interaction::WheelInput;
    use crate::render::NullRenderer;

    const NOW_MS: i64 = 1_710_504_000_000;

    fn timeline() -> Timeline<NullRenderer, FixedClock> {
        Timeline::new(
            NullRenderer::default(),
            FixedClock::new(NOW_MS),
            Viewport::new(1_000, 60),
            TimelineConfig::default(),
        )
        .expect("timeline")
    }

    #[test]
    fn click_without_drag_does_not_report_a_pan() {
        let mut timeline = timeline();
        timeline.drag_start();
        assert_eq!(timeline.drag_end(), None);
    }

    #[test]
    fn drag_into_the_past_commits_once() {
        let mut timeline = timeline();
        timeline.drag_start();
        assert!(timeline.drag_move(10.0));
        assert_eq!(timeline.transform().focused_timestamp_ms, NOW_MS - 600_000);
        assert_eq!(timeline.drag_end(), Some(TimelineEvent::Panned));
    }

    #[test]
    fn wheel_zoom_is_reported_after_it_settles() {
        let mut timeline = timeline();
        let start = Instant::now();
        let outcome = timeline.wheel(WheelInput::pixels(-100.0), start).expect("wheel");
        assert!(outcome.prevent_default);
        assert!(outcome.zoom_changed);
        assert!(outcome.duration_per_px_ms < 60_000.0);

        assert_eq!(timeline.poll_debounced(start + Duration::from_millis(100)), None);
        assert_eq!(
            timeline.poll_debounced(start + Duration::from_millis(200)),
            Some(TimelineEvent::Zoomed {
                period: Period::Minute
            })
        );
        assert_eq!(timeline.poll_debounced(start + Duration::from_millis(400)), None);
    }

    #[test]
    fn pixel_mapping_requires_a_sized_timeline() {
        let mut timeline = timeline();
        timeline.resize(Viewport::new(0, 60));
        let err = timeline.time_to_px(0.0).expect_err("must fail");
        assert!(format!("{err}").contains("viewport"));
    }
}
