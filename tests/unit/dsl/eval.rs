use super::*;

fn apply(line: &str, opts: &DslOptions) -> (Builder, DslOutcome) {
    let mut b = Builder::new();
    let out = author_line(&mut b, line, opts).unwrap();
    (b, out)
}

#[test]
fn hi_is_translated_scaled_and_rotated() {
    let (b, out) = apply("hi +0.5,0.5 *0.8 @0.25", &DslOptions::default());
    assert_eq!(out.layout.groups.len(), 2);
    assert_eq!(b.stack().depth(), 0);
    assert_eq!(b.stack().current(), Transform::IDENTITY);

    // Top of the 'h' stem: (0.05, 1.0) in em units at the default 0.1 size.
    let top = b.group_at(0).unwrap().curves[0].points[0].pos;
    // (0.005, 0.1) * 0.8 = (0.004, 0.08); a quarter turn gives (-0.08, 0.004).
    assert!((top - Point::new(0.42, 0.504)).hypot() < 1e-12);

    let expected = Transform {
        translate: Vec2::new(0.5, 0.5),
        scale: Vec2::new(0.8, 0.8),
        rotate: std::f64::consts::FRAC_PI_2,
    };
    assert!(out.transform.approx_eq(&expected, 1e-12));
}

#[test]
fn unsupported_characters_do_not_fail() {
    let (b, out) = apply("h#i +0.5,0.5", &DslOptions::default());
    assert_eq!(out.layout.skipped, vec!['#']);
    assert_eq!(b.group_count(), 2);
}

#[test]
fn scalars_broadcast_for_translation() {
    let (_, out) = apply("l +0.25", &DslOptions::default());
    assert_eq!(out.transform.translate, Vec2::new(0.25, 0.25));
}

#[test]
fn per_group_values_are_interpolated_by_index() {
    let (b, _) = apply("lll +[0,0 1,0]", &DslOptions::default());
    let xs: Vec<f64> = (0..3)
        .map(|g| b.group_at(g).unwrap().transform.translate.x)
        .collect();
    assert_eq!(xs, vec![0.0, 0.5, 1.0]);

    let (b, _) = apply("ll @[1/4]", &DslOptions::default());
    for g in 0..2 {
        let r = b.group_at(g).unwrap().transform.rotate;
        assert!((r - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}

#[test]
fn ranges_are_seeded_and_bounded() {
    let opts = DslOptions {
        seed: 7,
        ..DslOptions::default()
    };
    let (_, a) = apply("l +0~1 @0~1/2", &opts);
    let (_, b) = apply("l +0~1 @0~1/2", &opts);
    assert_eq!(a.transform, b.transform);
    assert!((0.0..1.0).contains(&a.transform.translate.x));

    let (_, c) = apply("l \\seed 99 +0~1", &opts);
    let (_, d) = apply("l \\seed 99 +0~1", &DslOptions::default());
    assert_eq!(c.transform, d.transform);
}

#[test]
fn coordinate_ranges_pick_points_on_the_line_or_curve() {
    for seed in 0..16 {
        let opts = DslOptions {
            seed,
            ..DslOptions::default()
        };
        let (_, out) = apply("l +0,0~2,0", &opts);
        let t = out.transform.translate;
        assert_eq!(t.y, 0.0);
        assert!((0.0..=2.0).contains(&t.x));

        let (_, out) = apply("l +0,0~1,1~2,0", &opts);
        let t = out.transform.translate;
        // The averaged quadratic through the three points stays under y = 0.5.
        assert!((0.0..=0.5 + 1e-9).contains(&t.y));
        assert!((0.0..=2.0).contains(&t.x));
    }
}

#[test]
fn thickness_call_sets_text_group_thickness() {
    let (b, _) = apply("ab \\thickness 0.03", &DslOptions::default());
    assert_eq!(b.group_at(0).unwrap().thickness, Some(0.03));
    assert_eq!(b.group_at(1).unwrap().thickness, Some(0.03));
}

#[test]
fn negative_thickness_depends_on_strictness() {
    let (b, _) = apply("a \\thickness -1", &DslOptions::default());
    assert_eq!(b.group_at(0).unwrap().thickness, None);

    let strict = DslOptions {
        strictness: Strictness::Strict,
        ..DslOptions::default()
    };
    let err = author_line(&mut Builder::new(), "a \\thickness -1", &strict).unwrap_err();
    assert!(matches!(err, StrokeError::Dsl(_)));
}

#[test]
fn strict_parse_errors_surface_as_dsl_errors() {
    let strict = DslOptions {
        strictness: Strictness::Strict,
        ..DslOptions::default()
    };
    let err = author_line(&mut Builder::new(), "a \\wobble", &strict).unwrap_err();
    assert!(matches!(err, StrokeError::Dsl(ref e) if e.offset == 2));
}
