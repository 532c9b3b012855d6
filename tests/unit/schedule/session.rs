use std::collections::HashMap;

use super::*;
use crate::{BoundingBox, NodeId, TaskLayoutNode};

fn timeline() -> Timeline {
    Timeline::new(vec![
        TaskLayoutNode::new("a", 0, 0.0).with_successor("b"),
        TaskLayoutNode::new("b", 0, 0.0),
    ])
}

fn measured(b_left: f64) -> HashMap<NodeId, BoundingBox> {
    let mut m = HashMap::new();
    m.insert(NodeId::from("a"), BoundingBox::new(30.0, 20.0, 80.0, 40.0));
    m.insert(NodeId::from("b"), BoundingBox::new(30.0, b_left, 80.0, 40.0));
    m
}

#[test]
fn nothing_is_shown_before_settle() {
    let t0 = Instant::now();
    let mut s = ConnectorSession::new(timeline()).unwrap();
    s.trigger(RecomputeTrigger::Mount, t0);

    assert!(!s.tick(t0 + Duration::from_millis(50), &measured(300.0)));
    assert!(s.connectors().is_empty());
    assert_eq!(s.generation(), None);

    assert!(s.tick(t0 + Duration::from_millis(100), &measured(300.0)));
    assert_eq!(s.connectors().len(), 1);
    assert_eq!(s.connectors()[0].path_command, "M 100 50 L 300 50");
    assert_eq!(s.generation(), Some(1));
}

#[test]
fn resize_replaces_previous_output() {
    let t0 = Instant::now();
    let mut s = ConnectorSession::with_settle_delay(timeline(), Duration::ZERO).unwrap();
    s.trigger(RecomputeTrigger::Mount, t0);
    assert!(s.tick(t0, &measured(300.0)));

    s.trigger(RecomputeTrigger::WindowResize, t0);
    assert!(s.tick(t0, &measured(500.0)));
    assert_eq!(s.connectors()[0].path_command, "M 100 50 L 500 50");
    assert_eq!(s.generation(), Some(2));
}

#[test]
fn async_pass_overtaken_by_newer_trigger_is_dropped() {
    let t0 = Instant::now();
    let mut s = ConnectorSession::with_settle_delay(timeline(), Duration::ZERO).unwrap();
    s.trigger(RecomputeTrigger::Mount, t0);
    let stale = s.begin(t0).unwrap();
    let stale_result = s.measure(&measured(300.0));

    s.trigger(RecomputeTrigger::ContainerResize, t0);
    assert!(!s.finish(stale, stale_result));
    assert!(s.connectors().is_empty());

    let fresh = s.begin(t0).unwrap();
    let fresh_result = s.measure(&measured(400.0));
    assert!(s.finish(fresh, fresh_result));
    assert_eq!(s.connectors()[0].end_point.x, 400.0);
}

#[test]
fn invalid_connector_options_are_rejected() {
    let mut t = timeline();
    t.connector.same_row_epsilon = f64::NAN;
    assert!(ConnectorSession::new(t).is_err());
}

#[test]
fn non_finite_offsets_are_rejected() {
    let mut t = timeline();
    t.vertical_offset = f64::NAN;
    assert!(ConnectorSession::new(t).is_err());

    let mut t = timeline();
    t.origin.left = f64::INFINITY;
    assert!(ConnectorSession::with_settle_delay(t, Duration::ZERO).is_err());
}
