//! Built-in single-stroke glyph table.
//!
//! Coordinates are in a 1-unit em box, y up: baseline at 0, x-height 0.5, cap height 1.0.
//! Each stroke is a list of `(x, y, strength)` control points.

type Stroke = &'static [(f64, f64, f64)];

/// Strokes drawing one character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Character drawn (lowercase for letters).
    pub ch: char,
    /// Strokes, each one curve.
    pub strokes: &'static [Stroke],
}

impl Glyph {
    /// Rightmost x of any stroke point.
    pub fn width(&self) -> f64 {
        self.strokes
            .iter()
            .flat_map(|s| s.iter())
            .map(|&(x, _, _)| x)
            .fold(0.0, f64::max)
    }
}

macro_rules! glyphs {
    ($($ch:literal => [$([$(($x:expr, $y:expr, $s:expr)),+ $(,)?]),+ $(,)?]),+ $(,)?) => {
        &[$(Glyph { ch: $ch, strokes: &[$(&[$(($x, $y, $s)),+]),+] }),+]
    };
}

static GLYPHS: &[Glyph] = glyphs! {
    'a' => [
        [(0.45, 0.3, 0.0), (0.25, 0.5, 0.0), (0.05, 0.3, 0.0), (0.2, 0.0, 0.0), (0.45, 0.15, 0.0)],
        [(0.45, 0.5, 0.0), (0.45, 0.0, 0.0)],
    ],
    'b' => [
        [(0.05, 1.0, 0.0), (0.05, 0.0, 0.0)],
        [
            (0.05, 0.3, 0.0), (0.25, 0.5, 0.0), (0.45, 0.25, 0.0),
            (0.25, 0.0, 0.0), (0.05, 0.15, 0.0),
        ],
    ],
    'c' => [
        [(0.45, 0.4, 0.0), (0.25, 0.5, 0.0), (0.05, 0.25, 0.0), (0.25, 0.0, 0.0), (0.45, 0.1, 0.0)],
    ],
    'd' => [
        [(0.45, 1.0, 0.0), (0.45, 0.0, 0.0)],
        [
            (0.45, 0.3, 0.0), (0.25, 0.5, 0.0), (0.05, 0.25, 0.0),
            (0.25, 0.0, 0.0), (0.45, 0.15, 0.0),
        ],
    ],
    'e' => [
        [
            (0.05, 0.25, 0.0), (0.45, 0.25, 1.0), (0.35, 0.5, 0.0), (0.05, 0.35, 0.0),
            (0.15, 0.0, 0.0), (0.45, 0.1, 0.0),
        ],
    ],
    'f' => [
        [(0.4, 0.95, 0.0), (0.25, 1.0, 0.0), (0.15, 0.85, 0.0), (0.15, 0.0, 0.0)],
        [(0.0, 0.5, 0.0), (0.35, 0.5, 0.0)],
    ],
    'g' => [
        [(0.45, 0.3, 0.0), (0.25, 0.5, 0.0), (0.05, 0.3, 0.0), (0.2, 0.05, 0.0), (0.45, 0.2, 0.0)],
        [(0.45, 0.5, 0.0), (0.45, -0.15, 0.0), (0.3, -0.25, 0.0), (0.1, -0.2, 0.0)],
    ],
    'h' => [
        [(0.05, 1.0, 0.0), (0.05, 0.0, 0.0)],
        [(0.05, 0.3, 0.0), (0.25, 0.5, 0.0), (0.45, 0.4, 0.0), (0.45, 0.0, 0.0)],
    ],
    'i' => [
        [(0.1, 0.5, 0.0), (0.1, 0.0, 0.0)],
        [(0.1, 0.7, 0.0), (0.1, 0.72, 0.0)],
    ],
    'j' => [
        [(0.3, 0.5, 0.0), (0.3, -0.15, 0.0), (0.15, -0.25, 0.0), (0.0, -0.2, 0.0)],
        [(0.3, 0.7, 0.0), (0.3, 0.72, 0.0)],
    ],
    'k' => [
        [(0.05, 1.0, 0.0), (0.05, 0.0, 0.0)],
        [(0.4, 0.5, 0.0), (0.05, 0.2, 1.0), (0.4, 0.0, 0.0)],
    ],
    'l' => [
        [(0.1, 1.0, 0.0), (0.1, 0.0, 0.0)],
    ],
    'm' => [
        [(0.05, 0.5, 0.0), (0.05, 0.0, 0.0)],
        [(0.05, 0.35, 0.0), (0.2, 0.5, 0.0), (0.3, 0.35, 0.0), (0.3, 0.0, 0.0)],
        [(0.3, 0.35, 0.0), (0.45, 0.5, 0.0), (0.55, 0.35, 0.0), (0.55, 0.0, 0.0)],
    ],
    'n' => [
        [(0.05, 0.5, 0.0), (0.05, 0.0, 0.0)],
        [(0.05, 0.35, 0.0), (0.25, 0.5, 0.0), (0.45, 0.35, 0.0), (0.45, 0.0, 0.0)],
    ],
    'o' => [
        [
            (0.25, 0.5, 0.0), (0.45, 0.5, 0.0), (0.45, 0.0, 0.0), (0.05, 0.0, 0.0),
            (0.05, 0.5, 0.0), (0.25, 0.5, 0.0),
        ],
    ],
    'p' => [
        [(0.05, 0.5, 0.0), (0.05, -0.25, 0.0)],
        [(0.05, 0.4, 0.0), (0.25, 0.5, 0.0), (0.45, 0.25, 0.0), (0.25, 0.0, 0.0), (0.05, 0.1, 0.0)],
    ],
    'q' => [
        [(0.45, 0.5, 0.0), (0.45, -0.25, 0.0)],
        [(0.45, 0.4, 0.0), (0.25, 0.5, 0.0), (0.05, 0.25, 0.0), (0.25, 0.0, 0.0), (0.45, 0.1, 0.0)],
    ],
    'r' => [
        [(0.05, 0.5, 0.0), (0.05, 0.0, 0.0)],
        [(0.05, 0.3, 0.0), (0.2, 0.5, 0.0), (0.4, 0.45, 0.0)],
    ],
    's' => [
        [
            (0.4, 0.45, 0.0), (0.25, 0.5, 0.0), (0.05, 0.4, 0.0), (0.25, 0.25, 0.0),
            (0.45, 0.1, 0.0), (0.25, 0.0, 0.0), (0.05, 0.05, 0.0),
        ],
    ],
    't' => [
        [(0.15, 0.8, 0.0), (0.15, 0.1, 0.0), (0.25, 0.0, 0.0), (0.4, 0.05, 0.0)],
        [(0.0, 0.5, 0.0), (0.35, 0.5, 0.0)],
    ],
    'u' => [
        [(0.05, 0.5, 0.0), (0.05, 0.15, 0.0), (0.25, 0.0, 0.0), (0.45, 0.15, 0.0)],
        [(0.45, 0.5, 0.0), (0.45, 0.0, 0.0)],
    ],
    'v' => [
        [(0.0, 0.5, 0.0), (0.225, 0.0, 1.0), (0.45, 0.5, 0.0)],
    ],
    'w' => [
        [(0.0, 0.5, 0.0), (0.15, 0.0, 1.0), (0.3, 0.4, 1.0), (0.45, 0.0, 1.0), (0.6, 0.5, 0.0)],
    ],
    'x' => [
        [(0.05, 0.5, 0.0), (0.45, 0.0, 0.0)],
        [(0.45, 0.5, 0.0), (0.05, 0.0, 0.0)],
    ],
    'y' => [
        [(0.05, 0.5, 0.0), (0.25, 0.05, 0.0)],
        [(0.45, 0.5, 0.0), (0.15, -0.25, 0.0)],
    ],
    'z' => [
        [(0.05, 0.5, 0.0), (0.45, 0.5, 1.0), (0.05, 0.0, 1.0), (0.45, 0.0, 0.0)],
    ],
    '0' => [
        [
            (0.25, 1.0, 0.0), (0.5, 1.0, 0.0), (0.5, 0.0, 0.0), (0.0, 0.0, 0.0),
            (0.0, 1.0, 0.0), (0.25, 1.0, 0.0),
        ],
    ],
    '1' => [
        [(0.1, 0.8, 0.0), (0.25, 1.0, 1.0), (0.25, 0.0, 0.0)],
    ],
    '2' => [
        [(0.05, 0.8, 0.0), (0.25, 1.0, 0.0), (0.45, 0.8, 0.0), (0.05, 0.0, 1.0), (0.45, 0.0, 0.0)],
    ],
    '3' => [
        [
            (0.05, 0.9, 0.0), (0.25, 1.0, 0.0), (0.45, 0.8, 0.0), (0.25, 0.55, 1.0),
            (0.45, 0.3, 0.0), (0.25, 0.0, 0.0), (0.05, 0.1, 0.0),
        ],
    ],
    '4' => [
        [(0.35, 0.0, 0.0), (0.35, 1.0, 1.0), (0.0, 0.3, 1.0), (0.5, 0.3, 0.0)],
    ],
    '5' => [
        [
            (0.45, 1.0, 0.0), (0.1, 1.0, 1.0), (0.05, 0.55, 1.0), (0.3, 0.6, 0.0),
            (0.45, 0.3, 0.0), (0.25, 0.0, 0.0), (0.05, 0.1, 0.0),
        ],
    ],
    '6' => [
        [
            (0.4, 0.95, 0.0), (0.1, 0.7, 0.0), (0.05, 0.2, 0.0), (0.25, 0.0, 0.0),
            (0.45, 0.25, 0.0), (0.25, 0.5, 0.0), (0.05, 0.3, 0.0),
        ],
    ],
    '7' => [
        [(0.05, 1.0, 0.0), (0.45, 1.0, 1.0), (0.15, 0.0, 0.0)],
    ],
    '8' => [
        [
            (0.25, 0.55, 0.0), (0.45, 0.8, 0.0), (0.25, 1.0, 0.0), (0.05, 0.8, 0.0),
            (0.25, 0.55, 0.0), (0.45, 0.3, 0.0), (0.25, 0.0, 0.0), (0.05, 0.3, 0.0),
            (0.25, 0.55, 0.0),
        ],
    ],
    '9' => [
        [
            (0.45, 0.7, 0.0), (0.25, 0.5, 0.0), (0.05, 0.75, 0.0), (0.25, 1.0, 0.0),
            (0.45, 0.8, 0.0), (0.4, 0.3, 0.0), (0.1, 0.05, 0.0),
        ],
    ],
    '.' => [
        [(0.05, 0.0, 0.0), (0.05, 0.02, 0.0)],
    ],
    ',' => [
        [(0.08, 0.05, 0.0), (0.02, -0.12, 0.0)],
    ],
    '!' => [
        [(0.05, 1.0, 0.0), (0.05, 0.3, 0.0)],
        [(0.05, 0.0, 0.0), (0.05, 0.02, 0.0)],
    ],
    '?' => [
        [(0.05, 0.8, 0.0), (0.2, 1.0, 0.0), (0.4, 0.85, 0.0), (0.2, 0.5, 0.0), (0.2, 0.3, 0.0)],
        [(0.2, 0.0, 0.0), (0.2, 0.02, 0.0)],
    ],
    '-' => [
        [(0.05, 0.35, 0.0), (0.35, 0.35, 0.0)],
    ],
    '+' => [
        [(0.05, 0.35, 0.0), (0.45, 0.35, 0.0)],
        [(0.25, 0.15, 0.0), (0.25, 0.55, 0.0)],
    ],
};

/// Glyph for `ch`; uppercase letters map to lowercase.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let ch = ch.to_ascii_lowercase();
    GLYPHS.iter().find(|g| g.ch == ch)
}

/// Every character with a glyph.
pub fn supported_chars() -> impl Iterator<Item = char> {
    GLYPHS.iter().map(|g| g.ch)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/library.rs"]
mod tests;
