use super::*;

fn pts(raw: &[(f64, f64, f64)]) -> Vec<ControlPoint> {
    raw.iter()
        .map(|&(x, y, s)| ControlPoint::new(x, y).with_strength(s))
        .collect()
}

fn angle_between(a: Vec2, b: Vec2) -> f64 {
    (a.cross(b)).atan2(a.dot(b)).abs()
}

#[test]
fn two_points_are_a_line_with_euclidean_length() {
    let path = CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (3.0, 4.0, 0.0)])).unwrap();
    assert_eq!(path.segments().len(), 1);
    assert!(matches!(path.segments()[0], PathSeg::Line(_)));
    assert!((path.length() - 5.0).abs() < 1e-12);
    let mid = path.point_at(0.5);
    assert!((mid - Point::new(1.5, 2.0)).hypot() < 1e-9);
}

#[test]
fn fewer_than_two_points_is_a_geometry_error() {
    let err = CurvePath::build(&pts(&[(0.0, 0.0, 0.0)])).unwrap_err();
    assert!(matches!(err, StrokeError::Geometry(_)));
    assert!(CurvePath::build(&[]).is_err());
}

#[test]
fn three_smooth_points_make_one_quadratic_through_the_ends() {
    let path =
        CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (0.5, 1.0, 0.0), (1.0, 0.0, 0.0)])).unwrap();
    assert_eq!(path.segments().len(), 1);
    let PathSeg::Quad(q) = path.segments()[0] else {
        panic!("expected a quadratic segment");
    };
    assert_eq!(q.p0, Point::new(0.0, 0.0));
    assert_eq!(q.p1, Point::new(0.5, 1.0));
    assert_eq!(q.p2, Point::new(1.0, 0.0));
    assert!((path.point_at(0.5) - Point::new(0.5, 0.5)).hypot() < 1e-6);
}

#[test]
fn interior_segments_meet_at_midpoints() {
    let path = CurvePath::build(&pts(&[
        (0.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (2.0, 0.0, 0.0),
        (3.0, 1.0, 0.0),
    ]))
    .unwrap();
    let segs = path.segments();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].eval(1.0), Point::new(1.5, 0.5));
    assert_eq!(segs[1].eval(0.0), Point::new(1.5, 0.5));
    assert_eq!(segs[1].eval(1.0), Point::new(3.0, 1.0));
}

#[test]
fn smooth_points_give_c1_joins() {
    let path = CurvePath::build(&pts(&[
        (0.0, 0.0, 0.0),
        (1.0, 2.0, 0.5),
        (2.0, 0.0, 0.0),
        (3.0, 2.0, 0.2),
        (4.0, 0.0, 0.0),
    ]))
    .unwrap();
    let segs = path.segments();
    for w in segs.windows(2) {
        let before = seg_tangent(&w[0], 1.0);
        let after = seg_tangent(&w[1], 0.0);
        assert!(angle_between(before, after) < 1e-9);
    }
}

#[test]
fn corner_points_give_a_direction_discontinuity_at_the_point() {
    let path =
        CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 0.0, 0.0)])).unwrap();
    let segs = path.segments();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].eval(1.0), Point::new(1.0, 1.0));
    let corner_len = path.segment_ends()[0];
    let before = path.tangent_at_length(corner_len - 1e-6);
    let after = path.tangent_at_length(corner_len + 1e-6);
    assert!(angle_between(before, after) > 1.0);
}

#[test]
fn threshold_is_exclusive() {
    let at = CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.5), (2.0, 0.0, 0.0)])).unwrap();
    assert_eq!(at.segments().len(), 1);
    let above =
        CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.51), (2.0, 0.0, 0.0)])).unwrap();
    assert_eq!(above.segments().len(), 2);
}

#[test]
fn resample_is_evenly_spaced_and_keeps_the_ends() {
    let path = CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)])).unwrap();
    let out = path.resample(5);
    assert_eq!(out.len(), 5);
    for (k, p) in out.iter().enumerate() {
        assert!((p.x - k as f64 * 0.25).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    let curved =
        CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (1.0, 2.0, 0.0), (2.0, 0.0, 0.0)])).unwrap();
    let out = curved.resample(6);
    let gaps: Vec<f64> = out.windows(2).map(|w| (w[1] - w[0]).hypot()).collect();
    let step = curved.length() / 5.0;
    // Chords are never longer than the arc step, and all roughly equal.
    for g in &gaps {
        assert!(*g <= step + 1e-9);
        assert!(*g > step * 0.9);
    }
    assert_eq!(out[5], Point::new(2.0, 0.0));
}

#[test]
fn scale_is_applied_before_measuring() {
    let p = pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)]);
    let path = CurvePath::build_scaled(&p, Vec2::new(3.0, 4.0)).unwrap();
    assert!((path.length() - 5.0).abs() < 1e-12);
}

#[test]
fn bez_path_export_has_one_element_per_segment_plus_move() {
    let path = CurvePath::build(&pts(&[
        (0.0, 0.0, 0.0),
        (1.0, 1.0, 1.0),
        (2.0, 0.0, 0.0),
        (3.0, 1.0, 0.0),
    ]))
    .unwrap();
    let bez = path.to_bez_path();
    assert_eq!(bez.elements().len(), path.segments().len() + 1);
}

#[test]
fn line_intersection_and_endpoint_fallback() {
    let path = CurvePath::build(&pts(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)])).unwrap();
    let hit = path.intersect_line(Line::new((0.5, -1.0), (0.5, 1.0)));
    assert!(!hit.fallback);
    assert!((hit.point - Point::new(0.5, 0.0)).hypot() < 1e-9);
    assert!((hit.length - 0.5).abs() < 1e-9);

    let miss = path.intersect_line(Line::new((3.0, -1.0), (3.0, 1.0)));
    assert!(miss.fallback);
    assert_eq!(miss.point, Point::new(2.0, 0.0));
    assert_eq!(miss.length, path.length());
}
