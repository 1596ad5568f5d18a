use crate::foundation::core::Point;

/// Strength above which an interior point becomes a hard corner (two lines) instead of the
/// control point of a smooth quadratic segment.
pub const CORNER_THRESHOLD: f64 = 0.5;

/// Per-point color, either HSL or RGB. Channels are packed as-is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Color {
    /// Hue, saturation, lightness.
    Hsl(f64, f64, f64),
    /// Red, green, blue.
    Rgb(f64, f64, f64),
}

impl Color {
    /// Raw channels in declaration order.
    pub fn channels(self) -> [f64; 3] {
        match self {
            Self::Hsl(h, s, l) => [h, s, l],
            Self::Rgb(r, g, b) => [r, g, b],
        }
    }
}

/// Styling attributes carried by every control point.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointStyle {
    /// Corner strength: 0 is smooth, above [`CORNER_THRESHOLD`] is a hard corner.
    pub strength: f64,
    /// Color override; the packer's default style applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Alpha override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Thickness override (wins over group and frame thickness).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl PointStyle {
    /// `true` when the point builds a hard corner.
    pub fn is_corner(&self) -> bool {
        self.strength > CORNER_THRESHOLD
    }
}

/// An authored point of a curve, in its group's local space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ControlPoint {
    /// Position.
    pub pos: Point,
    /// Styling attributes.
    pub style: PointStyle,
}

impl ControlPoint {
    /// Smooth, unstyled point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            style: PointStyle::default(),
        }
    }

    /// Point at `pos` with the given style.
    pub fn styled(pos: Point, style: PointStyle) -> Self {
        Self { pos, style }
    }

    /// Same point with a different corner strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.style.strength = strength;
        self
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    /// Corner strength.
    pub fn strength(&self) -> f64 {
        self.style.strength
    }
}
