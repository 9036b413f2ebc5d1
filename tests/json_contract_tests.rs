use chronoscope::api::{
    GraphConfig, HoverPoint, HoverUpdate, TimeSeriesGraph, period_tick_rows_to_json_pretty,
};
use chronoscope::core::{RawSeries, TimelineTransform, Viewport};
use chronoscope::render::{Color, NullRenderer};

fn hover() -> HoverUpdate {
    HoverUpdate {
        hover_points: vec![HoverPoint {
            key: "up:0".to_owned(),
            name: "up".to_owned(),
            color: Color::from_hex(0x5b8def),
            value: Some(1.0),
            graph_value: Some(1.0),
            label: "1".to_owned(),
            focused: true,
        }],
        hover_timestamp_sec: Some(1_700_000_000.0),
        hover_x: Some(120.0),
        hover_y: Some(42.0),
    }
}

#[test]
fn hover_contract_v1_is_versioned_and_readable() {
    let json = hover().to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    assert_eq!(HoverUpdate::from_json_compat_str(&json).expect("parse"), hover());
}

#[test]
fn bare_hover_payload_is_accepted() {
    let json = hover().to_json_pretty().expect("serialize");
    assert_eq!(HoverUpdate::from_json_compat_str(&json).expect("parse"), hover());
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = hover()
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");
    let err = HoverUpdate::from_json_compat_str(&json).expect_err("must fail");
    assert!(format!("{err}").contains("unsupported hover update schema version"));
}

#[test]
fn view_state_and_timeline_rows_serialize() {
    let mut graph = TimeSeriesGraph::new(
        NullRenderer::default(),
        Viewport::new(200, 100),
        GraphConfig::default(),
    )
    .expect("graph");
    let raw = RawSeries::from_json_str(
        r#"[{"metric": {"__name__": "up"}, "values": [[0, 1], [10, "1"]]}]"#,
    )
    .expect("json");
    graph.set_data(raw).expect("data");
    let json = graph.view_state().to_json_pretty().expect("view json");
    assert!(json.contains("\"key\": \"up:0\""));

    let transform = TimelineTransform::new(1_710_504_000_000, 60_000.0, 0).expect("transform");
    let rows = chronoscope::api::period_tick_rows(transform, 1_000.0);
    let json = period_tick_rows_to_json_pretty(&rows).expect("rows json");
    assert!(json.contains("\"period\": \"minute\""));
    assert!(transform.to_json_pretty().expect("transform json").contains("focused_timestamp_ms"));
}
