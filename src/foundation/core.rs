pub use kurbo::{Affine, BezPath, Line, Point, Vec2};

/// Affine-like transform stored as separate translate / non-uniform scale / rotation parts.
///
/// The parts are kept separate (instead of a matrix) so keyframes can interpolate them
/// field by field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Translation applied after scale and rotation.
    pub translate: Vec2,
    /// Per-axis scale, default (1,1).
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotate: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
        rotate: 0.0,
    };

    /// Pure translation.
    pub fn from_translate(v: Vec2) -> Self {
        Self {
            translate: v,
            ..Self::IDENTITY
        }
    }

    /// Pure per-axis scale.
    pub fn from_scale(v: Vec2) -> Self {
        Self {
            scale: v,
            ..Self::IDENTITY
        }
    }

    /// Pure rotation, in radians.
    pub fn from_rotate(rad: f64) -> Self {
        Self {
            rotate: rad,
            ..Self::IDENTITY
        }
    }

    /// Compose `child` inside `parent`'s post-scale, post-rotate frame.
    pub fn combine(parent: &Self, child: &Self) -> Self {
        let scaled = Vec2::new(
            child.translate.x * parent.scale.x,
            child.translate.y * parent.scale.y,
        );
        Self {
            translate: parent.translate + rotate_vec(scaled, parent.rotate),
            scale: Vec2::new(parent.scale.x * child.scale.x, parent.scale.y * child.scale.y),
            rotate: parent.rotate + child.rotate,
        }
    }

    /// `Transform::combine(self, child)` in method form.
    pub fn then(&self, child: &Self) -> Self {
        Self::combine(self, child)
    }

    /// Map a point: scale, then rotate, then translate.
    pub fn apply(&self, p: Point) -> Point {
        let scaled = Vec2::new(p.x * self.scale.x, p.y * self.scale.y);
        (self.translate + rotate_vec(scaled, self.rotate)).to_point()
    }

    /// Equivalent `kurbo::Affine` (`T * R * S`).
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotate)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Field-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.translate - other.translate).hypot() <= eps
            && (self.scale - other.scale).hypot() <= eps
            && (self.rotate - other.rotate).abs() <= eps
    }
}

/// Rotate `v` counter-clockwise by `rad`.
pub fn rotate_vec(v: Vec2, rad: f64) -> Vec2 {
    if rad == 0.0 {
        return v;
    }
    let (s, c) = rad.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Convert a turn fraction (1.0 = full circle) to radians.
pub fn turns_to_rad(turns: f64) -> f64 {
    turns * std::f64::consts::TAU
}

/// Viewport size in device pixels. Only used for sampling-density hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Resolution {
    /// Larger of the two sides.
    pub fn max_side(self) -> u32 {
        self.width.max(self.height)
    }
}

/// Resolve a possibly negative or out-of-range index by modular wrapping.
///
/// `-1` is the last element. Returns `None` only for empty collections.
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.rem_euclid(len as isize) as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
