use super::*;
use crate::authoring::point::ControlPoint;
use crate::geometry::path::CurvePath;

#[test]
fn every_required_character_has_a_glyph() {
    for ch in ('a'..='z').chain('0'..='9').chain(".,!?-+".chars()) {
        assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
    }
    assert_eq!(supported_chars().count(), 26 + 10 + 6);
}

#[test]
fn uppercase_maps_to_lowercase_and_unknowns_are_none() {
    assert_eq!(glyph('H').map(|g| g.ch), Some('h'));
    assert!(glyph('#').is_none());
    assert!(glyph('é').is_none());
}

#[test]
fn every_stroke_builds_a_path() {
    for ch in supported_chars() {
        let g = glyph(ch).unwrap();
        assert!(g.width() > 0.0, "{ch:?} has no width");
        for stroke in g.strokes {
            let points: Vec<ControlPoint> = stroke
                .iter()
                .map(|&(x, y, s)| ControlPoint::new(x, y).with_strength(s))
                .collect();
            let path = CurvePath::build(&points).unwrap();
            assert!(path.length() > 0.0);
        }
    }
}
