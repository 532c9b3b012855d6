use super::*;

#[test]
fn edges_and_center_follow_size() {
    let b = BoundingBox::new(30.0, 10.0, 90.0, 40.0);
    assert_eq!(b.right(), 100.0);
    assert_eq!(b.bottom(), 70.0);
    assert_eq!(b.center_y(), 50.0);
}

#[test]
fn rect_conversion_normalizes_inverted_edges() {
    let b = BoundingBox::from_rect(Rect::new(100.0, 70.0, 10.0, 30.0));
    assert_eq!(b, BoundingBox::new(30.0, 10.0, 90.0, 40.0));
    assert_eq!(b.to_rect(), Rect::new(10.0, 30.0, 100.0, 70.0));
}

#[test]
fn non_finite_components_are_detected() {
    assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_finite());
    assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    assert!(!BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
}

#[test]
fn origin_localizes_points() {
    let origin = ContainerOrigin::new(20.0, 5.0);
    assert_eq!(origin.localize(120.0, 55.0), Point::new(100.0, 50.0));
}

#[test]
fn origin_fields_default_when_missing() {
    let origin: ContainerOrigin = serde_json::from_str(r#"{"left": 3}"#).unwrap();
    assert_eq!(origin, ContainerOrigin::new(3.0, 0.0));
}
