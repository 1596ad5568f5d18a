//! Composable "current transform" state used while authoring.
//!
//! Coordinates handed to the builder are in author space; [`TransformStack::to_point`]
//! converts them to the group-local space stored in curves.

use crate::{
    authoring::point::{Color, ControlPoint, PointStyle},
    foundation::core::{Point, Transform, Vec2, rotate_vec, turns_to_rad},
};

/// Scale component of a [`TransformSpec`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Scale {
    /// Same factor on both axes.
    Uniform(f64),
    /// Per-axis factors.
    Xy(Vec2),
}

impl Scale {
    /// Per-axis factors.
    pub fn to_vec2(self) -> Vec2 {
        match self {
            Self::Uniform(s) => Vec2::new(s, s),
            Self::Xy(v) => v,
        }
    }
}

/// What to do with the current transform before composing a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResetPolicy {
    /// Compose on top of the current transform.
    #[default]
    Keep,
    /// Start from identity.
    Identity,
    /// Restore the most recently pushed transform (identity when nothing was pushed).
    Last,
}

/// Derive a transform that maps segment `from` onto segment `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Remap {
    /// Source segment.
    pub from: (Point, Point),
    /// Target segment.
    pub to: (Point, Point),
}

impl Remap {
    /// Uniform scale + rotation + translation taking `from.0 -> to.0` and `from.1 -> to.1`.
    ///
    /// A zero-length source segment degrades to a pure translation.
    pub fn to_transform(&self) -> Transform {
        let a = self.from.1 - self.from.0;
        let b = self.to.1 - self.to.0;
        let a_len = a.hypot();
        if a_len == 0.0 {
            return Transform::from_translate(self.to.0 - self.from.0);
        }
        let scale = b.hypot() / a_len;
        let rotate = b.atan2() - a.atan2();
        let moved = rotate_vec(self.from.0.to_vec2() * scale, rotate);
        Transform {
            translate: self.to.0.to_vec2() - moved,
            scale: Vec2::new(scale, scale),
            rotate,
        }
    }
}

/// Request passed to [`TransformStack::set_transform`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformSpec {
    /// Translation.
    #[serde(default)]
    pub translate: Option<Vec2>,
    /// Scale.
    #[serde(default)]
    pub scale: Option<Scale>,
    /// Rotation as a turn fraction (0.25 = quarter turn).
    #[serde(default)]
    pub rotate: Option<f64>,
    /// Reset applied before composing.
    #[serde(default)]
    pub reset: ResetPolicy,
    /// Save the (post-reset) transform before composing.
    #[serde(default)]
    pub push: bool,
    /// Segment-to-segment mapping composed after the other fields.
    #[serde(default)]
    pub remap: Option<Remap>,
}

impl TransformSpec {
    /// Spec with only a translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Some(Vec2::new(x, y)),
            ..Self::default()
        }
    }

    /// Spec with only a uniform scale.
    pub fn scale(s: f64) -> Self {
        Self {
            scale: Some(Scale::Uniform(s)),
            ..Self::default()
        }
    }

    /// Spec with only a per-axis scale.
    pub fn scale_xy(x: f64, y: f64) -> Self {
        Self {
            scale: Some(Scale::Xy(Vec2::new(x, y))),
            ..Self::default()
        }
    }

    /// Spec with only a rotation, in turns.
    pub fn rotate(turns: f64) -> Self {
        Self {
            rotate: Some(turns),
            ..Self::default()
        }
    }

    /// Spec with only a remap.
    pub fn remap(from: (Point, Point), to: (Point, Point)) -> Self {
        Self {
            remap: Some(Remap { from, to }),
            ..Self::default()
        }
    }

    /// Same spec, pushing before composing.
    pub fn pushed(mut self) -> Self {
        self.push = true;
        self
    }

    /// Same spec with a reset policy.
    pub fn with_reset(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;
        self
    }

    /// Transform described by the translate/scale/rotate/remap fields.
    pub fn derived(&self) -> Transform {
        let base = Transform {
            translate: self.translate.unwrap_or(Vec2::ZERO),
            scale: self.scale.map_or(Vec2::new(1.0, 1.0), Scale::to_vec2),
            rotate: self.rotate.map_or(0.0, turns_to_rad),
        };
        match &self.remap {
            Some(remap) => base.then(&remap.to_transform()),
            None => base,
        }
    }
}

/// How a coordinate's numbers are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CoordMode {
    /// Through the current transform.
    #[default]
    Relative,
    /// Bypass the current transform.
    Absolute,
    /// `x` is a turn fraction and `y` a radius; then relative.
    Polar,
}

/// Inline per-coordinate operation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CoordMeta {
    /// Ignore the current transform for this coordinate.
    Reset,
    /// Offset before the current transform.
    Translate(Vec2),
    /// Scale before the current transform.
    Scale(Vec2),
    /// Rotate (turns) before the current transform.
    Rotate(f64),
    /// Interpretation mode.
    Mode(CoordMode),
    /// Apply a spec to the stack persistently (with a push), then convert.
    Push(TransformSpec),
}

/// Author-space coordinate with optional styling and inline metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    /// X in author space.
    pub x: f64,
    /// Y in author space.
    pub y: f64,
    /// Style copied onto the resulting control point.
    #[serde(default)]
    pub style: PointStyle,
    /// Optional inline operation.
    #[serde(default)]
    pub meta: Option<CoordMeta>,
}

impl Coord {
    /// Plain smooth coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            style: PointStyle::default(),
            meta: None,
        }
    }

    /// Set corner strength.
    pub fn strength(mut self, strength: f64) -> Self {
        self.style.strength = strength;
        self
    }

    /// Hard corner (strength 1).
    pub fn corner(self) -> Self {
        self.strength(1.0)
    }

    /// Set color.
    pub fn color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    /// Set alpha.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.style.alpha = Some(alpha);
        self
    }

    /// Set thickness.
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.style.thickness = Some(thickness);
        self
    }

    /// Attach inline metadata.
    pub fn meta(mut self, meta: CoordMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Current transform plus the saved copies from `push`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    /// Identity with nothing saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transform.
    pub fn current(&self) -> Transform {
        self.current
    }

    /// Number of saved transforms.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Apply reset, optional push, then compose the derived transform as a child.
    pub fn set_transform(&mut self, spec: &TransformSpec) {
        match spec.reset {
            ResetPolicy::Keep => {}
            ResetPolicy::Identity => self.current = Transform::IDENTITY,
            ResetPolicy::Last => self.pop(),
        }
        if spec.push {
            self.push();
        }
        self.current = self.current.then(&spec.derived());
    }

    /// Save a copy of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved transform; identity when nothing is saved.
    pub fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or(Transform::IDENTITY);
    }

    /// Clear to identity and drop every saved copy.
    pub fn reset(&mut self) {
        self.current = Transform::IDENTITY;
        self.saved.clear();
    }

    /// Convert an author-space coordinate into a control point.
    pub fn to_point(&mut self, coord: &Coord) -> ControlPoint {
        let mut local = Point::new(coord.x, coord.y);
        if coord.meta == Some(CoordMeta::Mode(CoordMode::Polar)) {
            let (s, c) = turns_to_rad(coord.x).sin_cos();
            local = Point::new(coord.y * c, coord.y * s);
        }

        let mut through_current = true;
        match coord.meta {
            Some(CoordMeta::Reset) | Some(CoordMeta::Mode(CoordMode::Absolute)) => {
                through_current = false;
            }
            Some(CoordMeta::Translate(v)) => local += v,
            Some(CoordMeta::Scale(s)) => local = Point::new(local.x * s.x, local.y * s.y),
            Some(CoordMeta::Rotate(turns)) => {
                local = rotate_vec(local.to_vec2(), turns_to_rad(turns)).to_point();
            }
            Some(CoordMeta::Push(spec)) => self.set_transform(&spec.pushed()),
            Some(CoordMeta::Mode(_)) | None => {}
        }

        let pos = if through_current {
            self.current.apply(local)
        } else {
            local
        };
        ControlPoint::styled(pos, coord.style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/transform_stack.rs"]
mod tests;
