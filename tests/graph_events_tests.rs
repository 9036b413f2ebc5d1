use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chronoscope::api::{GraphConfig, TimeSeriesGraph};
use chronoscope::core::{RawSeries, TimeGrid, Viewport};
use chronoscope::extensions::{GraphEvent, GraphObserver, Observer};
use chronoscope::render::NullRenderer;
use chronoscope::{ChartError, ChartResult};

struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<GraphEvent>>>,
}

impl Observer for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }
}

impl GraphObserver for RecordingObserver {
    fn on_graph_event(&mut self, event: &GraphEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn series() -> ChartResult<Vec<RawSeries>> {
    RawSeries::from_json_str(
        r#"[
            {"metric": {"__name__": "cpu", "mode": "user"}, "values": [[0, "1"], [15, "2"], [30, "3"]]},
            {"metric": {"__name__": "cpu", "mode": "system"}, "values": [[0, "2"], [15, "2"], [30, "1"]]}
        ]"#,
    )
}

fn recording_graph(
    config: GraphConfig,
) -> (TimeSeriesGraph<NullRenderer>, Rc<RefCell<Vec<GraphEvent>>>) {
    let mut graph = TimeSeriesGraph::new(NullRenderer::default(), Viewport::new(300, 150), config)
        .expect("graph");
    graph.set_data(series().expect("json")).expect("data");
    let events = Rc::new(RefCell::new(Vec::new()));
    graph
        .register_observer(Box::new(RecordingObserver {
            id: "recorder".to_owned(),
            events: Rc::clone(&events),
        }))
        .expect("register");
    (graph, events)
}

#[test]
fn leaving_the_chart_clears_hover_once() {
    let (mut graph, events) = recording_graph(GraphConfig::default());
    graph.pointer_move(150.0, 75.0);
    graph.pointer_leave();
    graph.pointer_leave();

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    let GraphEvent::HoverUpdated(first) = &events[0] else {
        panic!("expected hover event, got {:?}", events[0]);
    };
    assert_eq!(first.hover_points.len(), 2);
    let GraphEvent::HoverUpdated(cleared) = &events[1] else {
        panic!("expected hover event, got {:?}", events[1]);
    };
    assert!(cleared.is_cleared());
    assert!(graph.hover().is_none());
}

#[test]
fn legend_click_toggles_selection() {
    let (mut graph, events) = recording_graph(GraphConfig::default().with_stacked(true));
    assert!(graph.view_state().stacked);

    graph
        .select_legend_series(Some("cpu{mode=\"system\"}:1"))
        .expect("select");
    assert!(!graph.view_state().stacked);
    assert_eq!(graph.view_state().visible_series().count(), 1);
    let entries = graph.legend_entries();
    assert!(entries[0].dimmed);
    assert!(entries[1].selected);

    graph
        .select_legend_series(Some("cpu{mode=\"system\"}:1"))
        .expect("deselect");
    assert_eq!(graph.view_state().selected_legend_key(), None);

    let keys: Vec<Option<String>> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            GraphEvent::SelectedLegendSeriesChanged { key } => Some(key.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        keys,
        vec![Some("cpu{mode=\"system\"}:1".to_owned()), None]
    );
}

#[test]
fn unknown_legend_key_is_rejected() {
    let (mut graph, events) = recording_graph(GraphConfig::default());
    let err = graph
        .select_legend_series(Some("missing:9"))
        .expect_err("must fail");
    assert!(matches!(err, ChartError::UnknownSeries(_)));
    assert!(events.borrow().is_empty());
}

#[test]
fn new_data_drops_a_selection_whose_series_is_gone() {
    let (mut graph, events) = recording_graph(GraphConfig::default());
    graph.select_legend_series(Some("cpu{mode=\"user\"}:0")).expect("select");
    graph.set_data(Vec::new()).expect("data");

    assert_eq!(graph.view_state().selected_legend_key(), None);
    assert_eq!(
        events.borrow().last(),
        Some(&GraphEvent::SelectedLegendSeriesChanged { key: None })
    );
}

#[test]
fn resize_is_reported_once_after_the_burst_settles() {
    let (mut graph, events) = recording_graph(GraphConfig::default());
    let start = Instant::now();
    for step in 0..5_u32 {
        graph.resize(300 + step * 10, 150, start + Duration::from_millis(u64::from(step) * 50));
    }

    assert!(!graph.poll_debounced(start + Duration::from_millis(300)).expect("poll"));
    assert!(graph.poll_debounced(start + Duration::from_millis(400)).expect("poll"));
    assert!(!graph.poll_debounced(start + Duration::from_millis(800)).expect("poll"));

    assert_eq!(
        events.borrow().as_slice(),
        &[GraphEvent::ChartResized {
            chart_width: 340,
            chart_height: 150
        }]
    );
    assert_eq!(graph.view_state().chart_size(), Viewport::new(340, 150));
}

#[test]
fn legend_collapses_only_when_allowed() {
    let (mut fixed, _) = recording_graph(GraphConfig::default().with_legend(true, false));
    assert!(fixed.toggle_legend());

    let (mut collapsable, _) = recording_graph(GraphConfig::default().with_legend(true, true));
    assert!(!collapsable.toggle_legend());
    assert!(!collapsable.legend().is_shown());
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let (mut graph, events) = recording_graph(GraphConfig::default());
    let err = graph
        .register_observer(Box::new(RecordingObserver {
            id: "recorder".to_owned(),
            events: Rc::clone(&events),
        }))
        .expect_err("duplicate must fail");
    assert!(format!("{err}").contains("already registered"));

    let err = graph
        .register_observer(Box::new(RecordingObserver {
            id: String::new(),
            events: Rc::clone(&events),
        }))
        .expect_err("empty id must fail");
    assert!(format!("{err}").contains("must not be empty"));

    assert!(graph.unregister_observer("recorder"));
    graph.pointer_move(10.0, 10.0);
    assert!(events.borrow().is_empty());
}

#[test]
fn render_submits_series_and_axes() {
    let (mut graph, _) = recording_graph(GraphConfig::default());
    graph.pointer_move(150.0, 75.0);
    graph.render().expect("render");

    let renderer = graph.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_path_count, 2);
    assert!(renderer.last_line_count > 1);
    assert!(renderer.last_text_count > 0);
}

#[test]
fn oversized_grid_is_rejected_without_touching_the_view() {
    let (mut graph, _) = recording_graph(GraphConfig::default());
    assert!(TimeGrid::new(0.0, 1e30, 1e-10).is_err());

    let grid = TimeGrid {
        start_sec: 0.0,
        end_sec: 1e30,
        step_sec: 1e-10,
    };
    let err = graph.set_grid(Some(grid)).expect_err("oversized grid");
    assert!(format!("{err}").contains("time grid spans more than"));
    assert!(graph.view_state().time_scale.is_some());

    graph
        .set_grid(Some(TimeGrid::new(0.0, 30.0, 15.0).expect("grid")))
        .expect("grid");
    let scale = graph.view_state().time_scale.expect("time scale");
    assert_eq!(scale.invert(300.0), 30.0);
}
