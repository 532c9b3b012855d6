use std::collections::HashMap;

use super::*;
use crate::connect::path::parse_path_command;

fn boxes(entries: &[(&str, BoundingBox)]) -> HashMap<NodeId, BoundingBox> {
    entries
        .iter()
        .map(|(id, b)| (NodeId::from(*id), *b))
        .collect()
}

// Right edge at (100, 50).
fn box_a() -> BoundingBox {
    BoundingBox::new(30.0, 20.0, 80.0, 40.0)
}

// Left edge at (300, 50).
fn box_b() -> BoundingBox {
    BoundingBox::new(30.0, 300.0, 80.0, 40.0)
}

// Left edge at (300, 150).
fn box_c() -> BoundingBox {
    BoundingBox::new(130.0, 300.0, 80.0, 40.0)
}

#[test]
fn same_row_emits_straight_line() {
    let nodes = [
        TaskLayoutNode::new("a", 0, 0.0).with_successor("b"),
        TaskLayoutNode::new("b", 0, 0.0),
    ];
    let src = boxes(&[("a", box_a()), ("b", box_b())]);
    let out = compute_connectors(&nodes, &src, ContainerOrigin::default(), 0.0);

    assert_eq!(out.len(), 1);
    let p = &out[0];
    assert_eq!(p.shape, PathShape::Line);
    assert_eq!(p.path_command, "M 100 50 L 300 50");
    assert_eq!(p.start_point, Point::new(100.0, 50.0));
    assert_eq!(p.end_point, Point::new(300.0, 50.0));
    assert_eq!(p.marker_radius, 4.0);
    assert_eq!(p.from, NodeId::from("a"));
    assert_eq!(p.to, NodeId::from("b"));
}

#[test]
fn different_rows_emit_s_curve() {
    let nodes = [
        TaskLayoutNode::new("a", 0, 0.0).with_successor("c"),
        TaskLayoutNode::new("c", 1, 0.0),
    ];
    let src = boxes(&[("a", box_a()), ("c", box_c())]);
    let out = compute_connectors(&nodes, &src, ContainerOrigin::default(), 0.0);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].path_command, "M 100 50 C 200 50, 200 150, 300 150");

    let parsed = parse_path_command(&out[0].path_command).unwrap();
    let (c1, c2) = parsed.controls.unwrap();
    let mid = (parsed.start.x + parsed.end.x) / 2.0;
    assert_eq!((c1.x, c1.y), (mid, parsed.start.y));
    assert_eq!((c2.x, c2.y), (mid, parsed.end.y));
}

#[test]
fn epsilon_boundary_is_exclusive() {
    let nodes = [TaskLayoutNode::new("a", 0, 0.0).with_successor("b")];
    let just_inside = BoundingBox::new(31.9, 300.0, 80.0, 40.0);
    let at_edge = BoundingBox::new(32.0, 300.0, 80.0, 40.0);

    let inside = compute_connectors(
        &nodes,
        &boxes(&[("a", box_a()), ("b", just_inside)]),
        ContainerOrigin::default(),
        0.0,
    );
    assert_eq!(inside[0].shape, PathShape::Line);

    let edge = compute_connectors(
        &nodes,
        &boxes(&[("a", box_a()), ("b", at_edge)]),
        ContainerOrigin::default(),
        0.0,
    );
    assert_eq!(edge[0].shape, PathShape::Curve);
}

#[test]
fn origin_and_vertical_offset_translate_points() {
    let nodes = [TaskLayoutNode::new("a", 0, 0.0).with_successor("b")];
    let src = boxes(&[("a", box_a()), ("b", box_b())]);
    let out = compute_connectors(&nodes, &src, ContainerOrigin::new(20.0, 10.0), 3.0);
    assert_eq!(out[0].path_command, "M 80 43 L 280 43");
}

#[test]
fn nodes_without_successor_emit_nothing() {
    let nodes = [TaskLayoutNode::new("a", 0, 0.0), TaskLayoutNode::new("b", 0, 0.0)];
    let src = boxes(&[("a", box_a()), ("b", box_b())]);
    assert!(compute_connectors(&nodes, &src, ContainerOrigin::default(), 0.0).is_empty());
}

#[test]
fn unresolved_references_are_skipped_without_affecting_others() {
    let nodes = [
        TaskLayoutNode::new("a", 0, 0.0).with_successor("ghost"),
        TaskLayoutNode::new("unmounted", 0, 0.0).with_successor("b"),
        TaskLayoutNode::new("self", 0, 0.0).with_successor("self"),
        TaskLayoutNode::new("nan", 0, 0.0).with_successor("b"),
        TaskLayoutNode::new("b", 0, 0.0).with_successor("c"),
        TaskLayoutNode::new("c", 1, 0.0),
    ];
    let src = boxes(&[
        ("a", box_a()),
        ("b", box_a()),
        ("c", box_c()),
        ("self", box_b()),
        ("nan", BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0)),
    ]);
    let out = compute_connectors(&nodes, &src, ContainerOrigin::default(), 0.0);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].from, NodeId::from("b"));
}

#[test]
fn output_follows_node_order() {
    let nodes = [
        TaskLayoutNode::new("c", 1, 0.0).with_successor("a"),
        TaskLayoutNode::new("a", 0, 0.0).with_successor("b"),
    ];
    let src = boxes(&[("a", box_a()), ("b", box_b()), ("c", box_c())]);
    let out = compute_connectors(&nodes, &src, ContainerOrigin::default(), 0.0);
    let froms: Vec<&str> = out.iter().map(|p| p.from.as_str()).collect();
    assert_eq!(froms, ["c", "a"]);
}

#[test]
fn repeated_calls_are_identical() {
    let nodes = [
        TaskLayoutNode::new("a", 0, 0.0).with_successor("c"),
        TaskLayoutNode::new("c", 1, 0.0).with_successor("b"),
    ];
    let src = boxes(&[("a", box_a()), ("b", box_b()), ("c", box_c())]);
    let first = compute_connectors(&nodes, &src, ContainerOrigin::new(1.5, 2.5), 1.0);
    let second = compute_connectors(&nodes, &src, ContainerOrigin::new(1.5, 2.5), 1.0);
    assert_eq!(first, second);
}

#[test]
fn custom_opts_change_tolerance_and_radius() {
    let engine = ConnectorEngine::new(ConnectorOpts {
        same_row_epsilon: 200.0,
        marker_radius: 6.0,
    });
    let nodes = [TaskLayoutNode::new("a", 0, 0.0).with_successor("c")];
    let src = boxes(&[("a", box_a()), ("c", box_c())]);
    let out = engine.compute(&nodes, &src, ContainerOrigin::default(), 0.0);
    assert_eq!(out[0].shape, PathShape::Line);
    assert_eq!(out[0].marker_radius, 6.0);
}

#[test]
fn opts_validation() {
    assert!(ConnectorOpts::default().validate().is_ok());
    let zero_eps = ConnectorOpts {
        same_row_epsilon: 0.0,
        ..ConnectorOpts::default()
    };
    assert!(zero_eps.validate().is_ok());
    let bad_eps = ConnectorOpts {
        same_row_epsilon: -1.0,
        ..ConnectorOpts::default()
    };
    assert!(bad_eps.validate().is_err());
    let bad_radius = ConnectorOpts {
        marker_radius: 0.0,
        ..ConnectorOpts::default()
    };
    assert!(bad_radius.validate().is_err());
}
