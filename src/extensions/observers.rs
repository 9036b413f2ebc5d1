use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::HoverUpdate;
use crate::core::{Period, TimelineTransform};
use crate::error::{ChartError, ChartResult};

/// Notifications raised by the time-series graph, at most one per user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
    HoverUpdated(HoverUpdate),
    /// Delivered after the resize debounce window.
    ChartResized { chart_width: u32, chart_height: u32 },
    SelectedLegendSeriesChanged { key: Option<String> },
}

/// Notifications raised by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// Zoom level settled (after the debounce window) on the given finest
    /// visible period.
    Zoomed { period: Period },
    /// A drag that actually moved the timeline has ended.
    Panned,
}

/// Identity shared by all observers so registries can reject duplicates.
pub trait Observer {
    fn id(&self) -> &str;
}

/// Host hook for graph callbacks.
pub trait GraphObserver: Observer {
    fn on_graph_event(&mut self, event: &GraphEvent);
}

/// Host hook for timeline callbacks; receives the transform at delivery time.
pub trait TimelineObserver: Observer {
    fn on_timeline_event(&mut self, event: TimelineEvent, transform: TimelineTransform);
}

/// Ordered set of observers keyed by unique, non-empty id.
pub struct ObserverRegistry<O: Observer + ?Sized> {
    observers: Vec<Box<O>>,
}

impl<O: Observer + ?Sized> Default for ObserverRegistry<O> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<O: Observer + ?Sized> ObserverRegistry<O> {
    pub fn register(&mut self, observer: Box<O>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.contains(&observer_id) {
            return Err(ChartError::DuplicateObserver(observer_id));
        }
        debug!(observer_id = %observer_id, "observer registered");
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id. Returns `true` when removed.
    pub fn unregister(&mut self, observer_id: &str) -> bool {
        let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        else {
            return false;
        };
        self.observers.remove(position);
        true
    }

    #[must_use]
    pub fn contains(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|entry| entry.id() == observer_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Calls `notify` on every observer in registration order.
    pub fn for_each(&mut self, mut notify: impl FnMut(&mut O)) {
        for observer in &mut self.observers {
            notify(observer.as_mut());
        }
    }
}
