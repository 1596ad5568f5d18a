use super::*;
use crate::glyph::library::glyph;

#[test]
fn hi_creates_one_group_per_glyph() {
    let mut b = Builder::new();
    let layout = write_text(&mut b, "hi", &TextOptions::default()).unwrap();
    assert_eq!(layout.groups, vec![0, 1]);
    assert!(layout.skipped.is_empty());
    assert_eq!(b.group_count(), 2);
    assert_eq!(b.group_at(0).unwrap().curves.len(), glyph('h').unwrap().strokes.len());
    assert_eq!(b.group_at(1).unwrap().name.as_deref(), Some("i"));
    // Stack is balanced afterwards.
    assert_eq!(b.stack().depth(), 0);
}

#[test]
fn glyphs_are_scaled_and_advanced() {
    let opts = TextOptions {
        size: 2.0,
        letter_spacing: 0.5,
        ..TextOptions::default()
    };
    let mut b = Builder::new();
    let layout = write_text(&mut b, "ll", &opts).unwrap();
    let first = &b.group_at(0).unwrap().curves[0].points[0];
    let second = &b.group_at(1).unwrap().curves[0].points[0];
    // 'l' is a vertical stem at x = 0.1, top at 1.0.
    assert!((first.x() - 0.2).abs() < 1e-12);
    assert!((first.y() - 2.0).abs() < 1e-12);
    assert!((second.x() - (0.2 + (0.1 + 0.5) * 2.0)).abs() < 1e-12);
    assert!((layout.advance - 2.0 * 2.0 * 0.6).abs() < 1e-12);
}

#[test]
fn unsupported_characters_are_skipped() {
    let mut b = Builder::new();
    let layout = write_text(&mut b, "h#i ~", &TextOptions::default()).unwrap();
    assert_eq!(layout.groups.len(), 2);
    assert_eq!(layout.skipped, vec!['#', '~']);
}

#[test]
fn text_follows_the_current_transform() {
    let mut b = Builder::new();
    b.set_transform(TransformSpec::translate(1.0, 1.0));
    write_text(&mut b, "l", &TextOptions::default()).unwrap();
    let p = &b.group_at(0).unwrap().curves[0].points[1];
    assert!((p.x() - 1.01).abs() < 1e-12);
    assert!((p.y() - 1.0).abs() < 1e-12);
}

#[test]
fn thickness_is_set_on_groups() {
    let opts = TextOptions {
        thickness: Some(0.02),
        ..TextOptions::default()
    };
    let mut b = Builder::new();
    write_text(&mut b, "a", &opts).unwrap();
    assert_eq!(b.group_at(0).unwrap().thickness, Some(0.02));
}

#[test]
fn invalid_size_is_rejected() {
    let opts = TextOptions {
        size: 0.0,
        ..TextOptions::default()
    };
    assert!(write_text(&mut Builder::new(), "a", &opts).is_err());
}
