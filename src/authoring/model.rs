use crate::{
    animation::ease::Ease,
    authoring::point::ControlPoint,
    foundation::core::{Transform, Vec2, resolve_index},
    foundation::error::{StrokeError, StrokeResult},
    geometry::path::CurvePath,
};

/// Ordered control points of one stroke path.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    /// Control points, index-stable.
    pub points: Vec<ControlPoint>,
}

impl Curve {
    /// Wrap a point list.
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build this curve's path with `scale` applied.
    pub fn path(&self, scale: Vec2) -> StrokeResult<CurvePath> {
        CurvePath::build_scaled(&self.points, scale)
    }

    /// Resample to `count` evenly arc-length-spaced points when shorter than `count`.
    ///
    /// Endpoints keep their style. Interior points take the style of the nearest original
    /// point by index fraction, with strength reset to 0 (corners are rounded). Returns
    /// whether the curve changed; curves at or above `count` are left untouched.
    pub fn normalize_to(&mut self, count: usize) -> StrokeResult<bool> {
        if self.points.len() >= count {
            return Ok(false);
        }
        let path = CurvePath::build(&self.points)?;
        let src_last = (self.points.len() - 1) as f64;
        let dst_last = count - 1;
        let points = path
            .resample(count)
            .into_iter()
            .enumerate()
            .map(|(k, pos)| {
                let src = ((k as f64 / dst_last as f64) * src_last).round() as usize;
                let mut style = self.points[src].style;
                if k != 0 && k != dst_last {
                    style.strength = 0.0;
                }
                ControlPoint::styled(pos, style)
            })
            .collect();
        self.points = points;
        Ok(true)
    }
}

/// Creation-time settings of a group.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupSettings {
    /// Optional label.
    #[serde(default)]
    pub name: Option<String>,
    /// Transform relative to the frame.
    #[serde(default)]
    pub transform: Transform,
    /// Default thickness for the group's points.
    #[serde(default)]
    pub thickness: Option<f64>,
}

impl GroupSettings {
    /// Named group with default settings.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Curves sharing one transform; one logical stroke group.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    /// Optional label.
    pub name: Option<String>,
    /// Transform relative to the frame transform.
    pub transform: Transform,
    /// Default thickness for points without their own.
    pub thickness: Option<f64>,
    /// Member curves.
    pub curves: Vec<Curve>,
}

impl Group {
    /// Empty group from settings.
    pub fn new(settings: GroupSettings) -> Self {
        Self {
            name: settings.name,
            transform: settings.transform,
            thickness: settings.thickness,
            curves: Vec::new(),
        }
    }

    /// Curve by (possibly negative) index.
    pub fn curve(&self, index: isize) -> Option<&Curve> {
        resolve_index(index, self.curves.len()).map(|i| &self.curves[i])
    }

    /// Mutable curve by (possibly negative) index.
    pub fn curve_mut(&mut self, index: isize) -> Option<&mut Curve> {
        resolve_index(index, self.curves.len()).map(move |i| &mut self.curves[i])
    }
}

/// Per-frame settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSettings {
    /// Relative duration weight of this keyframe.
    pub duration: f64,
    /// Blend strength: above the corner threshold the keyframe is a hard corner in
    /// quadratic interpolation.
    pub strength: f64,
    /// Default thickness for the frame's points.
    #[serde(default)]
    pub thickness: Option<f64>,
    /// Easing toward the next keyframe in linear interpolation.
    #[serde(default)]
    pub ease: Ease,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            strength: 0.0,
            thickness: None,
            ease: Ease::Linear,
        }
    }
}

impl FrameSettings {
    /// Validate numeric ranges.
    pub fn validate(&self) -> StrokeResult<()> {
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(StrokeError::validation(
                "frame duration must be finite and >= 0",
            ));
        }
        if let Some(t) = self.thickness
            && !(t.is_finite() && t >= 0.0)
        {
            return Err(StrokeError::validation(
                "frame thickness must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Snapshot of every group at one authored time.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Frame-level transform (parent of every group transform).
    pub transform: Transform,
    /// Settings.
    pub settings: FrameSettings,
    /// Groups, index-aligned with every other frame of the builder.
    pub groups: Vec<Group>,
}

impl Frame {
    /// Empty frame.
    pub fn new(settings: FrameSettings) -> Self {
        Self {
            transform: Transform::IDENTITY,
            settings,
            groups: Vec::new(),
        }
    }

    /// Group by (possibly negative) index.
    pub fn group(&self, index: isize) -> Option<&Group> {
        resolve_index(index, self.groups.len()).map(|i| &self.groups[i])
    }

    /// Mutable group by (possibly negative) index.
    pub fn group_mut(&mut self, index: isize) -> Option<&mut Group> {
        resolve_index(index, self.groups.len()).map(move |i| &mut self.groups[i])
    }

    /// Total number of curves across groups.
    pub fn curve_count(&self) -> usize {
        self.groups.iter().map(|g| g.curves.len()).sum()
    }

    /// Longest curve length in points.
    pub fn max_curve_len(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.curves.iter())
            .map(Curve::len)
            .max()
            .unwrap_or(0)
    }
}
