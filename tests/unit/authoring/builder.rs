use super::*;
use crate::animation::interp::InterpMode;
use crate::foundation::core::Vec2;

fn three_groups() -> Builder {
    Builder::author(|b| {
        for name in ["a", "b", "c"] {
            b.group(GroupSettings::named(name))?;
            b.curve([(0.0, 0.0), (1.0, 0.0)])?;
        }
        Ok(())
    })
    .unwrap()
}

#[test]
fn negative_group_index_resolves_from_the_end() {
    let mut b = three_groups();
    assert_eq!(b.select_group(-1).unwrap(), 2);
    assert_eq!(b.group_at(-1).unwrap().name.as_deref(), Some("c"));
    assert_eq!(b.select_group(-4).unwrap(), 2);
    assert_eq!(b.select_group(4).unwrap(), 1);
}

#[test]
fn selecting_without_groups_is_an_error() {
    let mut b = Builder::new();
    assert!(matches!(b.select_group(0), Err(StrokeError::Validation(_))));
}

#[test]
fn curve_creates_a_default_group_and_converts_through_the_stack() {
    let mut b = Builder::new();
    b.set_transform(TransformSpec::translate(1.0, 2.0));
    let c = b.curve([(0.0, 0.0), (1.0, 0.0)]).unwrap();
    assert_eq!(c, 0);
    assert_eq!(b.group_count(), 1);
    let curve = b.group_at(0).unwrap().curve(0).unwrap();
    assert_eq!(curve.points[0].pos, Point::new(1.0, 2.0));
    assert_eq!(curve.points[1].pos, Point::new(2.0, 2.0));
}

#[test]
fn single_point_curve_is_a_geometry_error() {
    let mut b = Builder::new();
    let err = b.curve([(0.0, 0.0)]).unwrap_err();
    assert!(matches!(err, StrokeError::Geometry(_)));
}

#[test]
fn keyframes_are_structural_copies_and_stay_aligned() {
    let mut b = three_groups();
    let f = b
        .keyframe(FrameSettings {
            strength: 1.0,
            ..FrameSettings::default()
        })
        .unwrap();
    assert_eq!(f, 1);
    assert_eq!(b.frames().len(), 2);
    assert_eq!(b.frames()[1].groups, b.frames()[0].groups);

    b.map_points(1, 0, 0, |p| p.pos.y += 1.0).unwrap();
    assert_eq!(b.frames()[0].groups[0].curves[0].points[0].pos.y, 0.0);
    assert_eq!(b.frames()[1].groups[0].curves[0].points[0].pos.y, 1.0);

    // Groups created after branching appear in every frame.
    b.group(GroupSettings::default()).unwrap();
    b.curve([(0.0, 0.0), (0.0, 1.0)]).unwrap();
    assert_eq!(b.frames()[0].groups.len(), 4);
    assert_eq!(b.frames()[1].groups.len(), 4);
    b.validate_alignment().unwrap();
}

#[test]
fn creation_after_packing_is_an_authoring_error() {
    let mut b = three_groups();
    b.mark_initialized(3);
    assert!(matches!(
        b.group(GroupSettings::default()),
        Err(StrokeError::Authoring(_))
    ));
    assert!(matches!(
        b.curve([(0.0, 0.0), (1.0, 1.0)]),
        Err(StrokeError::Authoring(_))
    ));
    assert!(matches!(
        b.keyframe(FrameSettings::default()),
        Err(StrokeError::Authoring(_))
    ));

    // Existing points stay editable with the same count.
    let same = vec![ControlPoint::new(0.0, 1.0), ControlPoint::new(1.0, 1.0)];
    b.set_curve_points(0, 0, 0, same).unwrap();
    let more = vec![
        ControlPoint::new(0.0, 1.0),
        ControlPoint::new(0.5, 1.0),
        ControlPoint::new(1.0, 1.0),
    ];
    assert!(matches!(
        b.set_curve_points(0, 0, 0, more),
        Err(StrokeError::Authoring(_))
    ));
    assert!(matches!(b.log().last(), Some(AuthoringOp::EditPoints { .. })));
}

#[test]
fn misaligned_frames_fail_validation() {
    let mut b = three_groups();
    b.keyframe(FrameSettings::default()).unwrap();
    b.frames_mut()[1].groups.pop();
    assert!(matches!(
        b.validate_alignment(),
        Err(StrokeError::Validation(_))
    ));
}

#[test]
fn intersection_falls_back_to_nearest_endpoint() {
    let b = three_groups();
    let hit = b
        .intersect(0, 0, 0, Line::new((0.25, -1.0), (0.25, 1.0)))
        .unwrap();
    assert!(!hit.fallback);
    assert!((hit.point.x - 0.25).abs() < 1e-9);

    let miss = b
        .intersect(0, 0, 0, Line::new((-3.0, -1.0), (-3.0, 1.0)))
        .unwrap();
    assert!(miss.fallback);
    assert_eq!(miss.point, Point::new(0.0, 0.0));
}

#[test]
fn point_along_uses_the_group_scale() {
    let mut b = three_groups();
    b.set_group_transform(0, Transform::from_scale(Vec2::new(2.0, 1.0)))
        .unwrap();
    let p = b.point_along(0, 0, 0, 1.0).unwrap();
    assert!((p.x - 2.0).abs() < 1e-9);
}

#[test]
fn transform_at_interpolates_group_transforms() {
    let mut b = three_groups();
    b.keyframe(FrameSettings::default()).unwrap();
    b.set_group_transform(-1, Transform::from_translate(Vec2::new(4.0, 0.0)))
        .unwrap();
    let opts = InterpOpts {
        mode: InterpMode::Linear,
        looped: false,
    };
    let mid = b.transform_at(-1, 0.5, opts).unwrap();
    assert!((mid.translate.x - 2.0).abs() < 1e-12);
    assert_eq!(b.transform_at(2, 1.0, opts).unwrap().translate.x, 4.0);
}

#[test]
fn normalize_resamples_short_curves_only() {
    let mut short = Curve::new(vec![
        ControlPoint::new(0.0, 0.0).with_strength(0.2),
        ControlPoint::new(4.0, 0.0).with_strength(0.9),
    ]);
    assert!(short.normalize_to(5).unwrap());
    assert_eq!(short.len(), 5);
    for (k, p) in short.points.iter().enumerate() {
        assert!((p.x() - k as f64).abs() < 1e-9);
    }
    assert_eq!(short.points[0].strength(), 0.2);
    assert_eq!(short.points[4].strength(), 0.9);
    assert_eq!(short.points[2].strength(), 0.0);

    let before = short.clone();
    assert!(!short.normalize_to(5).unwrap());
    assert_eq!(short, before);
}

#[test]
fn log_records_operations_and_serializes() {
    let b = three_groups();
    assert!(matches!(b.log()[0], AuthoringOp::Group { group: 0, .. }));
    let json = serde_json::to_string(b.log()).unwrap();
    assert!(json.contains("\"op\":\"curve\""));
}

#[test]
fn point_edits_reject_non_finite_positions() {
    let mut b = three_groups();
    let err = b
        .set_curve_points(
            0,
            0,
            0,
            vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(f64::NAN, 0.0)],
        )
        .unwrap_err();
    assert!(matches!(err, StrokeError::Geometry(_)));

    let before = b.frames().to_vec();
    let err = b.map_points(0, 1, 0, |p| p.pos.x = f64::INFINITY).unwrap_err();
    assert!(matches!(err, StrokeError::Geometry(_)));
    assert_eq!(b.frames(), &before[..]);
}

#[test]
fn alignment_check_reports_non_finite_points() {
    let mut b = three_groups();
    b.keyframe(FrameSettings::default()).unwrap();
    b.frames_mut()[1].groups[2].curves[0].points[1].pos.y = f64::NAN;
    let err = b.validate_alignment().unwrap_err();
    assert!(err.to_string().contains("frame 1 group 2 curve 0"));
}
