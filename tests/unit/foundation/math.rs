use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"strokes");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b's');
    b.write_bytes(b"trokes");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_float_bits() {
    let mut a = Fnv1a64::new_default();
    a.write_f32(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f32(-0.0);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn rng_is_reproducible_and_in_range() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..64 {
        let x = a.range(-2.0, 3.0);
        assert_eq!(x, b.range(-2.0, 3.0));
        assert!((-2.0..3.0).contains(&x));
    }
    assert_ne!(Rng64::new(1).next_u64(), Rng64::new(2).next_u64());
}

#[test]
fn quad_lerp_hits_endpoints_and_bends_toward_control() {
    let s = Point::new(0.0, 0.0);
    let c = Point::new(0.5, 1.0);
    let e = Point::new(1.0, 0.0);
    assert_eq!(quad_lerp(&s, &c, &e, 0.0), s);
    assert_eq!(quad_lerp(&s, &c, &e, 1.0), e);
    assert_eq!(quad_lerp(&s, &c, &e, 0.5), Point::new(0.5, 0.5));
}

#[test]
fn transform_lerp_is_field_wise() {
    let a = Transform::IDENTITY;
    let b = Transform {
        translate: Vec2::new(2.0, 4.0),
        scale: Vec2::new(3.0, 1.0),
        rotate: 1.0,
    };
    let m = midpoint(&a, &b);
    assert_eq!(m.translate, Vec2::new(1.0, 2.0));
    assert_eq!(m.scale, Vec2::new(2.0, 1.0));
    assert_eq!(m.rotate, 0.5);
}
