//! Host-facing hooks and timeline overlays.

pub mod annotations;
pub mod observers;

pub use annotations::{
    AnnotationPlacementConfig, Deployment, PlacedDeployment, place_deployments,
};
pub use observers::{
    GraphEvent, GraphObserver, Observer, ObserverRegistry, TimelineEvent, TimelineObserver,
};
