//! Authoring context: the keyframe arena, the transform stack and the cursor.
//!
//! Groups and curves are created once and exist in every keyframe (index-aligned).
//! Keyframes branch by structural copy of the previous frame; per-frame differences come
//! from transform edits and point edits on the copy.

use crate::{
    animation::interp::{InterpOpts, KeyframeInterpolator, KeyframePose},
    authoring::{
        model::{Curve, Frame, FrameSettings, Group, GroupSettings},
        point::ControlPoint,
        transform_stack::{Coord, TransformSpec, TransformStack},
    },
    foundation::core::{Line, Point, Transform, resolve_index},
    foundation::error::{StrokeError, StrokeResult},
    geometry::path::{CurvePath, LineHit},
};

/// One recorded authoring step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AuthoringOp {
    /// A keyframe was branched from the previous one.
    Keyframe {
        /// Index of the new frame.
        frame: usize,
    },
    /// A group was created (in every frame).
    Group {
        /// Index of the new group.
        group: usize,
        /// Group label.
        name: Option<String>,
    },
    /// A curve was created (in every frame).
    Curve {
        /// Owning group.
        group: usize,
        /// Index of the new curve in its group.
        curve: usize,
        /// Control points authored.
        points: usize,
    },
    /// The group cursor moved.
    SelectGroup {
        /// Newly selected group.
        group: usize,
    },
    /// The transform stack changed.
    SetTransform {
        /// Spec that was applied.
        spec: TransformSpec,
    },
    /// `push` on the stack.
    Push,
    /// `pop` on the stack.
    Pop,
    /// Stack reset to identity.
    ResetStack,
    /// Points of an existing curve were edited.
    EditPoints {
        /// Edited frame.
        frame: usize,
        /// Edited group.
        group: usize,
        /// Edited curve.
        curve: usize,
    },
    /// A transform of an existing frame or group was edited.
    EditTransform {
        /// Edited frame.
        frame: usize,
        /// Edited group; `None` for the frame transform.
        group: Option<usize>,
    },
    /// The builder was packed.
    Packed {
        /// Common point count after normalization.
        control_points: usize,
    },
}

/// Explicit authoring context replacing ambient "current builder" state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Builder {
    frames: Vec<Frame>,
    stack: TransformStack,
    frame_cursor: usize,
    group_cursor: Option<usize>,
    log: Vec<AuthoringOp>,
    initialized: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// One empty keyframe with default settings.
    pub fn new() -> Self {
        Self::with_frame_settings(FrameSettings::default())
    }

    /// One empty keyframe with `settings`.
    pub fn with_frame_settings(settings: FrameSettings) -> Self {
        Self {
            frames: vec![Frame::new(settings)],
            stack: TransformStack::new(),
            frame_cursor: 0,
            group_cursor: None,
            log: Vec::new(),
            initialized: false,
        }
    }

    /// Run an authoring procedure against a fresh builder.
    pub fn author<F>(f: F) -> StrokeResult<Self>
    where
        F: FnOnce(&mut Builder) -> StrokeResult<()>,
    {
        let mut builder = Self::new();
        f(&mut builder)?;
        Ok(builder)
    }

    /// All keyframes.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Keyframe by (possibly negative) index.
    pub fn frame(&self, index: isize) -> Option<&Frame> {
        resolve_index(index, self.frames.len()).map(|i| &self.frames[i])
    }

    /// Frame currently receiving edits.
    pub fn current_frame(&self) -> usize {
        self.frame_cursor
    }

    /// Group currently receiving curves.
    pub fn current_group(&self) -> Option<usize> {
        self.group_cursor
    }

    /// Number of groups (identical in every frame).
    pub fn group_count(&self) -> usize {
        self.frames[0].groups.len()
    }

    /// Group of the current frame by (possibly negative) index.
    pub fn group_at(&self, index: isize) -> Option<&Group> {
        self.frames[self.frame_cursor].group(index)
    }

    /// Transform stack.
    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    /// Recorded authoring steps.
    pub fn log(&self) -> &[AuthoringOp] {
        &self.log
    }

    /// `true` once packed; creation is rejected from then on.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self, control_points: usize) {
        self.initialized = true;
        self.log.push(AuthoringOp::Packed { control_points });
    }

    fn ensure_authoring(&self, what: &str) -> StrokeResult<()> {
        if self.initialized {
            return Err(StrokeError::authoring(format!(
                "cannot create {what} after the strokes were packed"
            )));
        }
        Ok(())
    }

    /// Compose a spec onto the transform stack.
    pub fn set_transform(&mut self, spec: TransformSpec) -> &mut Self {
        self.stack.set_transform(&spec);
        self.log.push(AuthoringOp::SetTransform { spec });
        self
    }

    /// Save the current transform.
    pub fn push(&mut self) -> &mut Self {
        self.stack.push();
        self.log.push(AuthoringOp::Push);
        self
    }

    /// Restore the last saved transform (identity when none).
    pub fn pop(&mut self) -> &mut Self {
        self.stack.pop();
        self.log.push(AuthoringOp::Pop);
        self
    }

    /// Clear the stack to identity.
    pub fn reset_transform(&mut self) -> &mut Self {
        self.stack.reset();
        self.log.push(AuthoringOp::ResetStack);
        self
    }

    /// Convert an author-space coordinate through the stack.
    pub fn to_point(&mut self, coord: impl Into<Coord>) -> ControlPoint {
        self.stack.to_point(&coord.into())
    }

    /// Branch a new keyframe from the last one and move the cursor to it.
    pub fn keyframe(&mut self, settings: FrameSettings) -> StrokeResult<usize> {
        self.ensure_authoring("a keyframe")?;
        settings.validate()?;
        let last = self
            .frames
            .last()
            .ok_or_else(|| StrokeError::validation("builder has no frames"))?;
        let mut frame = last.clone();
        frame.settings = settings;
        self.frames.push(frame);
        self.frame_cursor = self.frames.len() - 1;
        self.log.push(AuthoringOp::Keyframe {
            frame: self.frame_cursor,
        });
        tracing::debug!(frame = self.frame_cursor, "keyframe branched");
        Ok(self.frame_cursor)
    }

    /// Move the frame cursor; negative indices wrap.
    pub fn select_frame(&mut self, index: isize) -> StrokeResult<usize> {
        let i = resolve_index(index, self.frames.len())
            .ok_or_else(|| StrokeError::validation("builder has no frames"))?;
        self.frame_cursor = i;
        Ok(i)
    }

    /// Create a group in every frame and select it.
    pub fn group(&mut self, settings: GroupSettings) -> StrokeResult<usize> {
        self.ensure_authoring("a group")?;
        let name = settings.name.clone();
        for frame in &mut self.frames {
            frame.groups.push(Group::new(settings.clone()));
        }
        let index = self.group_count() - 1;
        self.group_cursor = Some(index);
        self.log.push(AuthoringOp::Group { group: index, name });
        Ok(index)
    }

    /// Select an existing group; negative indices wrap.
    pub fn select_group(&mut self, index: isize) -> StrokeResult<usize> {
        let i = resolve_index(index, self.group_count())
            .ok_or_else(|| StrokeError::validation("builder has no groups to select"))?;
        self.group_cursor = Some(i);
        self.log.push(AuthoringOp::SelectGroup { group: i });
        Ok(i)
    }

    /// Convert `coords` through the stack and append them as a curve of the current group.
    ///
    /// The curve is created in every frame. A default group is created when none is
    /// selected.
    pub fn curve<I, C>(&mut self, coords: I) -> StrokeResult<usize>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        self.ensure_authoring("a curve")?;
        let points: Vec<ControlPoint> = coords
            .into_iter()
            .map(|c| self.stack.to_point(&c.into()))
            .collect();
        self.curve_points(points)
    }

    /// Append already-converted points as a curve of the current group.
    pub fn curve_points(&mut self, points: Vec<ControlPoint>) -> StrokeResult<usize> {
        self.ensure_authoring("a curve")?;
        if points.len() < 2 {
            return Err(StrokeError::geometry(format!(
                "a curve needs at least 2 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.pos.is_finite()) {
            return Err(StrokeError::geometry("curve point is not finite"));
        }
        let group = match self.group_cursor {
            Some(g) => g,
            None => self.group(GroupSettings::default())?,
        };
        let count = points.len();
        let curve = Curve::new(points);
        for frame in &mut self.frames {
            frame.groups[group].curves.push(curve.clone());
        }
        let index = self.frames[0].groups[group].curves.len() - 1;
        self.log.push(AuthoringOp::Curve {
            group,
            curve: index,
            points: count,
        });
        Ok(index)
    }

    fn curve_slot(
        &mut self,
        frame: isize,
        group: isize,
        curve: isize,
    ) -> StrokeResult<(usize, usize, usize, &mut Curve)> {
        let f = resolve_index(frame, self.frames.len())
            .ok_or_else(|| StrokeError::validation("builder has no frames"))?;
        let g = resolve_index(group, self.frames[f].groups.len())
            .ok_or_else(|| StrokeError::validation(format!("frame {f} has no groups")))?;
        let grp = &mut self.frames[f].groups[g];
        let c = resolve_index(curve, grp.curves.len())
            .ok_or_else(|| StrokeError::validation(format!("group {g} has no curves")))?;
        Ok((f, g, c, &mut grp.curves[c]))
    }

    /// Replace the points of an existing curve in one frame.
    ///
    /// After packing the point count must stay the same.
    pub fn set_curve_points(
        &mut self,
        frame: isize,
        group: isize,
        curve: isize,
        points: Vec<ControlPoint>,
    ) -> StrokeResult<()> {
        if points.len() < 2 {
            return Err(StrokeError::geometry("a curve needs at least 2 points"));
        }
        if points.iter().any(|p| !p.pos.is_finite()) {
            return Err(StrokeError::geometry("curve point is not finite"));
        }
        let initialized = self.initialized;
        let (f, g, c, slot) = self.curve_slot(frame, group, curve)?;
        if initialized && slot.len() != points.len() {
            return Err(StrokeError::authoring(format!(
                "point count of a packed curve is fixed at {}, got {}",
                slot.len(),
                points.len()
            )));
        }
        slot.points = points;
        self.log.push(AuthoringOp::EditPoints {
            frame: f,
            group: g,
            curve: c,
        });
        Ok(())
    }

    /// Edit every point of an existing curve.
    ///
    /// The edit is discarded when it leaves a non-finite position.
    pub fn map_points<F>(
        &mut self,
        frame: isize,
        group: isize,
        curve: isize,
        f: F,
    ) -> StrokeResult<()>
    where
        F: FnMut(&mut ControlPoint),
    {
        let (fi, g, c, slot) = self.curve_slot(frame, group, curve)?;
        let mut points = slot.points.clone();
        points.iter_mut().for_each(f);
        if points.iter().any(|p| !p.pos.is_finite()) {
            return Err(StrokeError::geometry("edited curve point is not finite"));
        }
        slot.points = points;
        self.log.push(AuthoringOp::EditPoints {
            frame: fi,
            group: g,
            curve: c,
        });
        Ok(())
    }

    /// Set the frame-level transform of the current frame.
    pub fn set_frame_transform(&mut self, transform: Transform) -> &mut Self {
        self.frames[self.frame_cursor].transform = transform;
        self.log.push(AuthoringOp::EditTransform {
            frame: self.frame_cursor,
            group: None,
        });
        self
    }

    /// Set a group's transform in the current frame.
    pub fn set_group_transform(&mut self, group: isize, transform: Transform) -> StrokeResult<()> {
        let frame = self.frame_cursor;
        let g = resolve_index(group, self.frames[frame].groups.len())
            .ok_or_else(|| StrokeError::validation("builder has no groups"))?;
        self.frames[frame].groups[g].transform = transform;
        self.log.push(AuthoringOp::EditTransform {
            frame,
            group: Some(g),
        });
        Ok(())
    }

    /// Path of a curve in a frame (group scale applied).
    pub fn curve_path(&self, frame: isize, group: isize, curve: isize) -> StrokeResult<CurvePath> {
        let f = self
            .frame(frame)
            .ok_or_else(|| StrokeError::validation("builder has no frames"))?;
        let g = f
            .group(group)
            .ok_or_else(|| StrokeError::validation("frame has no groups"))?;
        let c = g
            .curve(curve)
            .ok_or_else(|| StrokeError::validation("group has no curves"))?;
        c.path(g.transform.scale)
    }

    /// Point at arc-length `fraction` along a curve.
    pub fn point_along(
        &self,
        frame: isize,
        group: isize,
        curve: isize,
        fraction: f64,
    ) -> StrokeResult<Point> {
        Ok(self.curve_path(frame, group, curve)?.point_at(fraction))
    }

    /// First intersection of a curve with `line`, falling back to the nearest endpoint.
    pub fn intersect(
        &self,
        frame: isize,
        group: isize,
        curve: isize,
        line: Line,
    ) -> StrokeResult<LineHit> {
        let hit = self.curve_path(frame, group, curve)?.intersect_line(line);
        if hit.fallback {
            tracing::debug!(?line, "no intersection, using nearest endpoint");
        }
        Ok(hit)
    }

    /// Per-frame transforms for interpolation.
    pub fn poses(&self) -> Vec<KeyframePose> {
        self.frames
            .iter()
            .map(|f| KeyframePose {
                transform: f.transform,
                strength: f.settings.strength,
                ease: f.settings.ease,
                groups: f.groups.iter().map(|g| g.transform).collect(),
            })
            .collect()
    }

    /// Interpolated group transform at `progress`.
    pub fn transform_at(
        &self,
        group: isize,
        progress: f64,
        opts: InterpOpts,
    ) -> StrokeResult<Transform> {
        let poses = self.poses();
        KeyframeInterpolator::new(&poses).transform_at(group, progress, opts)
    }

    /// Check that every frame has the same groups and curves and that curves are drawable.
    pub fn validate_alignment(&self) -> StrokeResult<()> {
        let first = &self.frames[0];
        for (fi, frame) in self.frames.iter().enumerate() {
            if frame.groups.len() != first.groups.len() {
                return Err(StrokeError::validation(format!(
                    "frame {fi} has {} groups, frame 0 has {}",
                    frame.groups.len(),
                    first.groups.len()
                )));
            }
            for (gi, (group, base)) in frame.groups.iter().zip(&first.groups).enumerate() {
                if group.curves.len() != base.curves.len() {
                    return Err(StrokeError::validation(format!(
                        "frame {fi} group {gi} has {} curves, frame 0 has {}",
                        group.curves.len(),
                        base.curves.len()
                    )));
                }
                if let Some(ci) = group.curves.iter().position(|c| c.len() < 2) {
                    return Err(StrokeError::geometry(format!(
                        "frame {fi} group {gi} curve {ci} has fewer than 2 points"
                    )));
                }
                if let Some(ci) = group
                    .curves
                    .iter()
                    .position(|c| c.points.iter().any(|p| !p.pos.is_finite()))
                {
                    return Err(StrokeError::geometry(format!(
                        "frame {fi} group {gi} curve {ci} has a non-finite point"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/builder.rs"]
mod tests;
