use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv, ParamCurveNearest, PathSeg, QuadBez};

use crate::{
    authoring::point::ControlPoint,
    foundation::core::{BezPath, Line, Point, Vec2},
    foundation::error::{StrokeError, StrokeResult},
};

const ACCURACY: f64 = 1e-9;

/// Continuous path built from a curve's control points, queryable by arc length.
///
/// Two points give one line. Longer curves give one segment group per interior point:
/// a quadratic whose control is the interior point and whose ends are the midpoints to its
/// neighbours (true endpoints at the curve ends), or, for corner points, two lines meeting
/// exactly at the point.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePath {
    segs: Vec<PathSeg>,
    // Cumulative arc length at the end of each segment.
    ends: Vec<f64>,
}

/// Result of [`CurvePath::intersect_line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
    /// Intersection point, or the nearest curve endpoint on a miss.
    pub point: Point,
    /// Arc length along the path at `point`.
    pub length: f64,
    /// `true` when no intersection existed and an endpoint was used instead.
    pub fallback: bool,
}

impl CurvePath {
    /// Build the path for a curve in its own coordinates.
    pub fn build(points: &[ControlPoint]) -> StrokeResult<Self> {
        Self::build_scaled(points, Vec2::new(1.0, 1.0))
    }

    /// Build the path with per-axis `scale` applied to every point first.
    pub fn build_scaled(points: &[ControlPoint], scale: Vec2) -> StrokeResult<Self> {
        if points.len() < 2 {
            return Err(StrokeError::geometry(format!(
                "curve needs at least 2 points to form a path, got {}",
                points.len()
            )));
        }
        let p: Vec<Point> = points
            .iter()
            .map(|cp| Point::new(cp.pos.x * scale.x, cp.pos.y * scale.y))
            .collect();
        if p.iter().any(|q| !q.is_finite()) {
            return Err(StrokeError::geometry("curve has a non-finite point"));
        }

        let mut segs = Vec::with_capacity(p.len());
        if p.len() == 2 {
            segs.push(PathSeg::Line(Line::new(p[0], p[1])));
        } else {
            let last = p.len() - 3;
            for i in 0..=last {
                let start = if i == 0 { p[0] } else { p[i].midpoint(p[i + 1]) };
                let end = if i == last {
                    p[i + 2]
                } else {
                    p[i + 1].midpoint(p[i + 2])
                };
                if points[i + 1].style.is_corner() {
                    segs.push(PathSeg::Line(Line::new(start, p[i + 1])));
                    segs.push(PathSeg::Line(Line::new(p[i + 1], end)));
                } else {
                    segs.push(PathSeg::Quad(QuadBez::new(start, p[i + 1], end)));
                }
            }
        }

        let mut total = 0.0;
        let ends = segs
            .iter()
            .map(|seg| {
                total += seg.arclen(ACCURACY);
                total
            })
            .collect();
        Ok(Self { segs, ends })
    }

    /// Segments in path order.
    pub fn segments(&self) -> &[PathSeg] {
        &self.segs
    }

    /// Cumulative arc length at the end of each segment.
    pub fn segment_ends(&self) -> &[f64] {
        &self.ends
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    fn locate(&self, s: f64) -> (usize, f64) {
        let s = s.clamp(0.0, self.length());
        let idx = self
            .ends
            .partition_point(|&e| e < s)
            .min(self.segs.len() - 1);
        let seg_start = if idx == 0 { 0.0 } else { self.ends[idx - 1] };
        let seg_len = self.ends[idx] - seg_start;
        if seg_len <= f64::EPSILON {
            return (idx, 0.0);
        }
        let local = (s - seg_start).clamp(0.0, seg_len);
        let t = self.segs[idx].inv_arclen(local, ACCURACY).clamp(0.0, 1.0);
        (idx, t)
    }

    /// Position at arc length `s` (clamped to the path).
    pub fn point_at_length(&self, s: f64) -> Point {
        let (idx, t) = self.locate(s);
        self.segs[idx].eval(t)
    }

    /// Position at `fraction` of the total arc length.
    pub fn point_at(&self, fraction: f64) -> Point {
        self.point_at_length(fraction.clamp(0.0, 1.0) * self.length())
    }

    /// Unnormalized direction at arc length `s`.
    pub fn tangent_at_length(&self, s: f64) -> Vec2 {
        let (idx, t) = self.locate(s);
        seg_tangent(&self.segs[idx], t)
    }

    /// `n` points at evenly spaced arc-length parameters, both ends included.
    pub fn resample(&self, n: usize) -> Vec<Point> {
        match n {
            0 => Vec::new(),
            1 => vec![self.point_at_length(0.0)],
            _ => {
                let total = self.length();
                let last = self.segs[self.segs.len() - 1].eval(1.0);
                (0..n)
                    .map(|k| {
                        if k == n - 1 {
                            last
                        } else {
                            self.point_at_length(total * k as f64 / (n - 1) as f64)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Export as a `kurbo::BezPath`.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(first) = self.segs.first() {
            path.move_to(first.eval(0.0));
        }
        for seg in &self.segs {
            match seg {
                PathSeg::Line(l) => path.line_to(l.p1),
                PathSeg::Quad(q) => path.quad_to(q.p1, q.p2),
                PathSeg::Cubic(c) => path.curve_to(c.p1, c.p2, c.p3),
            }
        }
        path
    }

    /// First crossing with `line` in path order.
    ///
    /// On a miss this falls back to whichever curve endpoint is closest to `line`.
    pub fn intersect_line(&self, line: Line) -> LineHit {
        for (idx, seg) in self.segs.iter().enumerate() {
            let best = seg
                .intersect_line(line)
                .into_iter()
                .map(|hit| hit.segment_t)
                .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.min(t))));
            if let Some(t) = best {
                let seg_start = if idx == 0 { 0.0 } else { self.ends[idx - 1] };
                let partial = seg.subsegment(0.0..t).arclen(ACCURACY);
                return LineHit {
                    point: seg.eval(t),
                    length: seg_start + partial,
                    fallback: false,
                };
            }
        }

        let start = self.point_at_length(0.0);
        let end = self.segs[self.segs.len() - 1].eval(1.0);
        let d_start = line.nearest(start, ACCURACY).distance_sq;
        let d_end = line.nearest(end, ACCURACY).distance_sq;
        if d_end < d_start {
            LineHit {
                point: end,
                length: self.length(),
                fallback: true,
            }
        } else {
            LineHit {
                point: start,
                length: 0.0,
                fallback: true,
            }
        }
    }
}

fn seg_tangent(seg: &PathSeg, t: f64) -> Vec2 {
    match seg {
        PathSeg::Line(l) => l.p1 - l.p0,
        PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
