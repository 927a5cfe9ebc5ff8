use super::*;
use kurbo::{PathEl, Shape as _};

#[test]
fn outline_is_a_single_closed_subpath() {
    let els = heart_outline().elements();
    assert!(matches!(els.first(), Some(PathEl::MoveTo(_))));
    assert!(matches!(els.last(), Some(PathEl::ClosePath)));
    assert_eq!(
        els.iter()
            .filter(|e| matches!(e, PathEl::MoveTo(_)))
            .count(),
        1
    );
    assert_eq!(
        els.iter()
            .filter(|e| matches!(e, PathEl::CurveTo(..)))
            .count(),
        4
    );
}

#[test]
fn cached_outline_matches_a_fresh_build() {
    assert_eq!(heart_outline(), &build_heart_outline());
}

#[test]
fn local_outline_spans_roughly_one_hundred_by_eighty() {
    let bb = heart_outline().bounding_box();
    assert!((bb.width() - 100.25).abs() < 1.0, "{bb:?}");
    assert!(bb.height() > 78.0 && bb.height() < 82.0, "{bb:?}");
}

#[test]
fn transform_maps_anchor_to_center() {
    let t = heart_transform(Point::new(200.0, 150.0), 50.0, Vec2::new(1.0, 1.0));
    let p = t * HEART_ANCHOR;
    assert!((p.x - 200.0).abs() < 1e-9);
    assert!((p.y - 150.0).abs() < 1e-9);
}

#[test]
fn placed_heart_scales_to_requested_size() {
    let size = 200.5;
    let bb = placed_heart(Point::new(0.0, 0.0), size, Vec2::new(1.0, 1.0)).bounding_box();
    assert!((bb.width() - size).abs() < 2.0, "{bb:?}");
}

#[test]
fn vertical_mirror_flips_the_point_of_the_heart() {
    let up = placed_heart(Point::ORIGIN, 100.25, Vec2::new(1.0, 1.0)).bounding_box();
    let down = placed_heart(Point::ORIGIN, 100.25, Vec2::new(1.0, -1.0)).bounding_box();
    assert!((up.max_y() + down.min_y()).abs() < 1e-9);
    assert!((up.min_y() + down.max_y()).abs() < 1e-9);
}

#[test]
fn visibility_is_a_bounding_square_overlap_test() {
    let canvas = Canvas::new(100, 100).unwrap();
    assert!(heart_visible(Point::new(50.0, 50.0), 1.0, canvas));
    assert!(heart_visible(Point::new(-10.0, 50.0), 20.0, canvas));
    assert!(!heart_visible(Point::new(-10.1, 50.0), 20.0, canvas));
    assert!(!heart_visible(Point::new(50.0, 130.0), 40.0, canvas));
    assert!(heart_visible(Point::new(50.0, 130.0), 60.0, canvas));
}

#[test]
fn bounds_are_centered_squares() {
    let r = heart_bounds(Point::new(10.0, 20.0), 8.0);
    assert_eq!(r, Rect::new(6.0, 16.0, 14.0, 24.0));
}
