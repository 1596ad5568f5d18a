//! Application of a parsed [`Script`] to a [`Builder`].

use crate::{
    authoring::{builder::Builder, point::ControlPoint, transform_stack::TransformSpec},
    dsl::ast::{Call, Op, Script, TransformKind, Value},
    dsl::error::DslError,
    dsl::parser::{DslOptions, Strictness, parse_line},
    foundation::core::{Point, Transform, Vec2},
    foundation::error::{StrokeError, StrokeResult},
    foundation::math::Rng64,
    geometry::path::CurvePath,
    glyph::text::{TextLayout, write_text},
};

/// Summary of an applied script.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DslOutcome {
    /// Groups created for the text.
    pub layout: TextLayout,
    /// Composite of the script's global transforms.
    pub transform: Transform,
}

/// Operand after fractions and random ranges were resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolved {
    Scalar(f64),
    Point(Vec2),
}

impl Resolved {
    fn to_vec2(self) -> Vec2 {
        match self {
            Self::Scalar(s) => Vec2::new(s, s),
            Self::Point(p) => p,
        }
    }

    fn to_scalar(self) -> f64 {
        match self {
            Self::Scalar(s) => s,
            Self::Point(p) => p.x,
        }
    }

    fn lerp(a: Self, b: Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(x + (y - x) * t),
            _ => Self::Point(a.to_vec2().lerp(b.to_vec2(), t)),
        }
    }
}

impl Script {
    /// Draw the text and apply the operations.
    ///
    /// Plain operators compose onto the stack (in source order) around the text; per-group
    /// lists are composed onto the created groups' transforms. The stack is restored
    /// afterwards.
    #[tracing::instrument(skip_all, fields(text = %self.text, ops = self.ops.len()))]
    pub fn apply(&self, builder: &mut Builder, opts: &DslOptions) -> StrokeResult<DslOutcome> {
        let mut rng = Rng64::new(opts.seed);
        let mut text_opts = opts.text;
        let mut specs: Vec<TransformSpec> = Vec::new();
        let mut per_group: Vec<(TransformKind, Vec<Resolved>)> = Vec::new();

        for op in &self.ops {
            match op {
                Op::Call {
                    call: Call::Seed(seed),
                    ..
                } => rng = Rng64::new(*seed),
                Op::Call {
                    call: Call::Thickness(v),
                    offset,
                } => {
                    let t = resolve(v, &mut rng)?.to_scalar();
                    if t.is_finite() && t >= 0.0 {
                        text_opts.thickness = Some(t);
                    } else if opts.strictness == Strictness::Strict {
                        return Err(DslError::new(*offset, "thickness must be >= 0").into());
                    } else {
                        tracing::warn!(thickness = t, "ignoring negative thickness");
                    }
                }
                Op::Transform { kind, value, .. } => {
                    specs.push(spec_for(*kind, resolve(value, &mut rng)?));
                }
                Op::PerGroup { kind, values, .. } => {
                    let resolved = values
                        .iter()
                        .map(|v| resolve(v, &mut rng))
                        .collect::<StrokeResult<Vec<_>>>()?;
                    per_group.push((*kind, resolved));
                }
            }
        }

        builder.push();
        let mut global = Transform::IDENTITY;
        for spec in specs {
            global = global.then(&spec.derived());
            builder.set_transform(spec);
        }
        let layout = write_text(builder, &self.text, &text_opts);
        builder.pop();
        let layout = layout?;

        let n = layout.groups.len();
        for (kind, values) in &per_group {
            for (k, &g) in layout.groups.iter().enumerate() {
                let u = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
                let local = spec_for(*kind, sample(values, u)).derived();
                let group = g as isize;
                let current = builder
                    .group_at(group)
                    .map(|grp| grp.transform)
                    .ok_or_else(|| StrokeError::validation(format!("text group {g} vanished")))?;
                builder.set_group_transform(group, current.then(&local))?;
            }
        }

        tracing::debug!(groups = n, skipped = layout.skipped.len(), "dsl applied");
        Ok(DslOutcome {
            layout,
            transform: global,
        })
    }
}

/// Parse `line` and apply it; strict-mode parse failures become [`StrokeError::Dsl`].
pub fn author_line(
    builder: &mut Builder,
    line: &str,
    opts: &DslOptions,
) -> StrokeResult<DslOutcome> {
    parse_line(line, opts)?.apply(builder, opts)
}

fn spec_for(kind: TransformKind, v: Resolved) -> TransformSpec {
    match kind {
        TransformKind::Translate => {
            let t = v.to_vec2();
            TransformSpec::translate(t.x, t.y)
        }
        TransformKind::Scale => match v {
            Resolved::Scalar(s) => TransformSpec::scale(s),
            Resolved::Point(p) => TransformSpec::scale_xy(p.x, p.y),
        },
        TransformKind::Rotate => TransformSpec::rotate(v.to_scalar()),
    }
}

fn resolve(value: &Value, rng: &mut Rng64) -> StrokeResult<Resolved> {
    Ok(match value {
        Value::Scalar(s) => Resolved::Scalar(*s),
        Value::Point(x, y) => Resolved::Point(Vec2::new(*x, *y)),
        Value::ScalarRange(ends) => {
            let lo = ends.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = ends.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Resolved::Scalar(rng.range(lo, hi))
        }
        Value::PointRange(ends) => {
            let r = rng.next_f64_01();
            let p = match ends.as_slice() {
                [a, b] => Point::from(*a).lerp(Point::from(*b), r),
                _ => {
                    let points: Vec<ControlPoint> =
                        ends.iter().map(|&(x, y)| ControlPoint::new(x, y)).collect();
                    CurvePath::build(&points)?.point_at(r)
                }
            };
            Resolved::Point(p.to_vec2())
        }
    })
}

/// Piecewise-linear lookup at `u` in `[0, 1]` over evenly spaced values.
fn sample(values: &[Resolved], u: f64) -> Resolved {
    match values {
        [] => Resolved::Scalar(0.0),
        [only] => *only,
        _ => {
            let x = u.clamp(0.0, 1.0) * (values.len() - 1) as f64;
            let i = (x.floor() as usize).min(values.len() - 2);
            Resolved::lerp(values[i], values[i + 1], x - i as f64)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/eval.rs"]
mod tests;
