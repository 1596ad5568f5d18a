use crate::{
    animation::ease::Ease,
    authoring::point::CORNER_THRESHOLD,
    foundation::core::{Transform, resolve_index},
    foundation::error::{StrokeError, StrokeResult},
    foundation::math::{Lerp, midpoint, quad_lerp},
};

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Piecewise linear between neighbouring keyframes.
    #[default]
    Linear,
    /// Averaged quadratic through the keyframes (smooth, corners where a frame's blend
    /// strength exceeds the corner threshold).
    Quadratic,
}

/// Options for [`KeyframeInterpolator`] queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterpOpts {
    /// Interpolation strategy.
    pub mode: InterpMode,
    /// Treat frame 0 as the successor of the last frame.
    #[serde(default)]
    pub looped: bool,
}

/// Transforms and blend settings of one keyframe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframePose {
    /// Frame-level transform.
    pub transform: Transform,
    /// Blend strength.
    pub strength: f64,
    /// Easing toward the next keyframe.
    pub ease: Ease,
    /// Group transforms, index-aligned across poses.
    pub groups: Vec<Transform>,
}

/// Read-only view answering "what transform at progress p" over a keyframe sequence.
#[derive(Clone, Copy, Debug)]
pub struct KeyframeInterpolator<'a> {
    poses: &'a [KeyframePose],
}

impl<'a> KeyframeInterpolator<'a> {
    /// Interpolator over `poses`.
    pub fn new(poses: &'a [KeyframePose]) -> Self {
        Self { poses }
    }

    /// Number of keyframes.
    pub fn frame_count(&self) -> usize {
        self.poses.len()
    }

    /// Group transform at `progress` in `[0, 1]` (clamped). Negative group indices wrap.
    pub fn transform_at(
        &self,
        group: isize,
        progress: f64,
        opts: InterpOpts,
    ) -> StrokeResult<Transform> {
        let g = self.resolve_group(group)?;
        let values = self
            .poses
            .iter()
            .map(|p| {
                p.groups.get(g).copied().ok_or_else(|| {
                    StrokeError::validation(format!("keyframe is missing group {g}"))
                })
            })
            .collect::<StrokeResult<Vec<_>>>()?;
        Ok(self.sample(&values, progress, opts))
    }

    /// Frame-level transform at `progress`.
    pub fn frame_transform_at(&self, progress: f64, opts: InterpOpts) -> StrokeResult<Transform> {
        if self.poses.is_empty() {
            return Err(StrokeError::validation("no keyframes to interpolate"));
        }
        let values: Vec<Transform> = self.poses.iter().map(|p| p.transform).collect();
        Ok(self.sample(&values, progress, opts))
    }

    /// Frame transform combined with the group transform at `progress`.
    pub fn world_transform_at(
        &self,
        group: isize,
        progress: f64,
        opts: InterpOpts,
    ) -> StrokeResult<Transform> {
        let frame = self.frame_transform_at(progress, opts)?;
        let group = self.transform_at(group, progress, opts)?;
        Ok(frame.then(&group))
    }

    fn resolve_group(&self, group: isize) -> StrokeResult<usize> {
        let first = self
            .poses
            .first()
            .ok_or_else(|| StrokeError::validation("no keyframes to interpolate"))?;
        resolve_index(group, first.groups.len())
            .ok_or_else(|| StrokeError::validation("keyframes have no groups"))
    }

    fn sample<T: Lerp + Clone>(&self, values: &[T], progress: f64, opts: InterpOpts) -> T {
        let n = values.len();
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if n == 1 {
            return values[0].clone();
        }
        if !opts.looped {
            if progress <= 0.0 {
                return values[0].clone();
            }
            if progress >= 1.0 {
                return values[n - 1].clone();
            }
        }

        match (opts.mode, opts.looped) {
            (InterpMode::Linear, false) => {
                let x = progress * (n - 1) as f64;
                let start = (x.floor() as usize).min(n - 2);
                let t = x - start as f64;
                self.linear(values, start, start + 1, t)
            }
            (InterpMode::Linear, true) => {
                let x = progress * n as f64;
                let t = x - x.floor();
                let start = (x.floor() as usize) % n;
                self.linear(values, start, (start + 1) % n, t)
            }
            (InterpMode::Quadratic, false) if n == 2 => self.linear(values, 0, 1, progress),
            (InterpMode::Quadratic, false) => {
                let segs = n - 2;
                let x = progress * segs as f64;
                let s = (x.floor() as usize).min(segs - 1);
                let t = x - s as f64;
                let start = if s == 0 {
                    values[0].clone()
                } else {
                    midpoint(&values[s], &values[s + 1])
                };
                let end = if s == segs - 1 {
                    values[n - 1].clone()
                } else {
                    midpoint(&values[s + 1], &values[s + 2])
                };
                self.quadratic(&start, values, s + 1, &end, t)
            }
            (InterpMode::Quadratic, true) => {
                let x = progress * n as f64;
                let t = x - x.floor();
                let s = (x.floor() as usize) % n;
                let ctrl = (s + 1) % n;
                let start = midpoint(&values[s], &values[ctrl]);
                let end = midpoint(&values[ctrl], &values[(s + 2) % n]);
                self.quadratic(&start, values, ctrl, &end, t)
            }
        }
    }

    fn linear<T: Lerp + Clone>(&self, values: &[T], a: usize, b: usize, t: f64) -> T {
        let t = self.poses[a].ease.apply(t);
        if t <= 0.0 {
            return values[a].clone();
        }
        if t >= 1.0 {
            return values[b].clone();
        }
        T::lerp(&values[a], &values[b], t)
    }

    fn quadratic<T: Lerp + Clone>(
        &self,
        start: &T,
        values: &[T],
        ctrl: usize,
        end: &T,
        t: f64,
    ) -> T {
        let c = &values[ctrl];
        if self.poses[ctrl].strength > CORNER_THRESHOLD {
            if t < 0.5 {
                T::lerp(start, c, t * 2.0)
            } else {
                T::lerp(c, end, t * 2.0 - 1.0)
            }
        } else {
            quad_lerp(start, c, end, t)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
