//! Flattening of the Frame → Group → Curve → Point hierarchy into fixed-size buffers.

use crate::{
    animation::interp::{KeyframeInterpolator, KeyframePose},
    authoring::{builder::Builder, model::Frame, point::Color},
    foundation::core::Resolution,
    foundation::error::{StrokeError, StrokeResult},
    pack::buffer::Buffer3D,
    pack::fingerprint::{StrokeFingerprint, fingerprint_packed},
};

/// Target on-screen distance between samples, in pixels.
pub const SAMPLE_SPACING_PX: f64 = 2.0;
/// Lower bound for the packed per-curve point count.
pub const MIN_CONTROL_POINTS: usize = 3;

pub(crate) const POSITION_CHANNELS: usize = 4;
pub(crate) const COLOR_CHANNELS: usize = 4;
pub(crate) const THICKNESS_CHANNELS: usize = 1;
const DEFAULT_THICKNESS: f64 = 1.0;

/// Color used for points without their own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DefaultStyle {
    /// Hue, saturation, lightness.
    pub hsl: (f64, f64, f64),
    /// Alpha.
    pub alpha: f64,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            hsl: (0.0, 0.0, 1.0),
            alpha: 1.0,
        }
    }
}

/// Packing configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Fallback color and alpha.
    pub default_style: DefaultStyle,
    /// Viewport used for sampling-density hints.
    pub resolution: Resolution,
}

impl PackOptions {
    /// Parse options from JSON and validate them. Missing fields take their defaults.
    pub fn from_json(src: &str) -> StrokeResult<Self> {
        let opts: Self = serde_json::from_str(src)
            .map_err(|e| StrokeError::serde(format!("pack options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Validate option ranges.
    pub fn validate(&self) -> StrokeResult<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(StrokeError::validation("resolution must be non-zero"));
        }
        let (h, s, l) = self.default_style.hsl;
        if ![h, s, l, self.default_style.alpha]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(StrokeError::validation("default style must be finite"));
        }
        Ok(())
    }
}

/// Normalized timing of one keyframe.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTiming {
    /// Cumulative normalized start in `[0, 1]`.
    pub start: f64,
    /// Normalized duration; all durations sum to 1.
    pub duration: f64,
    /// Blend strength of the keyframe.
    pub blend_strength: f64,
}

/// Location of a packed curve in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurveRef {
    /// Group index.
    pub group: usize,
    /// Curve index within the group.
    pub curve: usize,
}

/// Packed output consumed by an external rasterizer.
///
/// Buffers have dims `(control_points, curve_count, frame_count)`. Positions are in
/// group-local space; group and frame transforms are exposed through `keyframes`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PackedStrokes {
    /// `(x, y, strength, 1)` per point.
    pub positions: Buffer3D,
    /// `(c0, c1, c2, alpha)` per point.
    pub colors: Buffer3D,
    /// Resolved thickness per point.
    pub thickness: Buffer3D,
    /// Points per curve after normalization.
    pub control_points: usize,
    /// Curves across all groups.
    pub curve_count: usize,
    /// Keyframes.
    pub frame_count: usize,
    /// Maximum arc length across frames, `[group][curve]`, group scale applied.
    pub curve_lengths: Vec<Vec<f64>>,
    /// Global curve index to `(group, curve)`.
    pub curve_groups: Vec<CurveRef>,
    /// Per-frame timing.
    pub frame_timing: Vec<FrameTiming>,
    /// Per-frame transforms.
    pub keyframes: Vec<KeyframePose>,
    /// Viewport the hints were computed for.
    pub resolution: Resolution,
}

impl PackedStrokes {
    /// Point-sampling density hint for a curve: about one sample every
    /// [`SAMPLE_SPACING_PX`] pixels at the packed resolution, at least 2.
    pub fn sample_count(&self, group: usize, curve: usize) -> Option<usize> {
        let len = *self.curve_lengths.get(group)?.get(curve)?;
        let px = len * f64::from(self.resolution.max_side());
        Some((px / SAMPLE_SPACING_PX).ceil().max(2.0) as usize)
    }

    /// Interpolator over the packed keyframe transforms.
    pub fn interpolator(&self) -> KeyframeInterpolator<'_> {
        KeyframeInterpolator::new(&self.keyframes)
    }

    /// Stable content hash of buffers and metadata.
    pub fn fingerprint(&self) -> StrokeFingerprint {
        fingerprint_packed(self)
    }
}

/// Pack every keyframe of `builder` into flat buffers and mark it initialized.
///
/// Short curves are resampled in place to the common point count, so packing again is a
/// no-op on the hierarchy and produces identical buffers.
#[tracing::instrument(skip_all, fields(frames = builder.frames().len()))]
pub fn pack(builder: &mut Builder, opts: &PackOptions) -> StrokeResult<PackedStrokes> {
    opts.validate()?;
    builder.validate_alignment()?;

    let curve_groups: Vec<CurveRef> = builder.frames()[0]
        .groups
        .iter()
        .enumerate()
        .flat_map(|(group, g)| (0..g.curves.len()).map(move |curve| CurveRef { group, curve }))
        .collect();
    if curve_groups.is_empty() {
        return Err(StrokeError::validation("nothing to pack: builder has no curves"));
    }

    let control_points = builder
        .frames()
        .iter()
        .map(Frame::max_curve_len)
        .max()
        .unwrap_or(0)
        .max(MIN_CONTROL_POINTS);

    // Normalize a copy so a failure leaves the builder untouched.
    let mut frames = builder.frames().to_vec();
    let mut resampled = 0usize;
    for frame in &mut frames {
        for group in &mut frame.groups {
            for curve in &mut group.curves {
                if curve.normalize_to(control_points)? {
                    resampled += 1;
                }
            }
        }
    }

    let curve_lengths = measure_lengths(&frames)?;
    let frame_count = frames.len();
    let curve_count = curve_groups.len();

    let mut positions = Buffer3D::new(control_points, curve_count, frame_count, POSITION_CHANNELS);
    let mut colors = Buffer3D::new(control_points, curve_count, frame_count, COLOR_CHANNELS);
    let mut thickness =
        Buffer3D::new(control_points, curve_count, frame_count, THICKNESS_CHANNELS);
    let (dh, ds, dl) = opts.default_style.hsl;

    for (z, frame) in frames.iter().enumerate() {
        for (y, r) in curve_groups.iter().enumerate() {
            let group = &frame.groups[r.group];
            let curve = &group.curves[r.curve];
            for (x, p) in curve.points.iter().enumerate() {
                positions.set(
                    x,
                    y,
                    z,
                    &[p.pos.x as f32, p.pos.y as f32, p.style.strength as f32, 1.0],
                );
                let [c0, c1, c2] = p.style.color.map(Color::channels).unwrap_or([dh, ds, dl]);
                let alpha = p.style.alpha.unwrap_or(opts.default_style.alpha);
                colors.set(x, y, z, &[c0 as f32, c1 as f32, c2 as f32, alpha as f32]);
                let t = p
                    .style
                    .thickness
                    .or(group.thickness)
                    .or(frame.settings.thickness)
                    .unwrap_or(DEFAULT_THICKNESS);
                thickness.set(x, y, z, &[t as f32]);
            }
        }
    }

    let frame_timing = frame_timing(&frames);
    let keyframes = builder.poses();
    for (slot, normalized) in builder.frames_mut().iter_mut().zip(frames) {
        *slot = normalized;
    }
    builder.mark_initialized(control_points);

    tracing::debug!(
        control_points,
        curve_count,
        frame_count,
        resampled,
        "packed strokes"
    );

    Ok(PackedStrokes {
        positions,
        colors,
        thickness,
        control_points,
        curve_count,
        frame_count,
        curve_lengths,
        curve_groups,
        frame_timing,
        keyframes,
        resolution: opts.resolution,
    })
}

fn measure_lengths(frames: &[Frame]) -> StrokeResult<Vec<Vec<f64>>> {
    let mut lengths: Vec<Vec<f64>> = frames[0]
        .groups
        .iter()
        .map(|g| vec![0.0; g.curves.len()])
        .collect();
    for frame in frames {
        for (gi, group) in frame.groups.iter().enumerate() {
            for (ci, curve) in group.curves.iter().enumerate() {
                let len = curve.path(group.transform.scale)?.length();
                let slot = &mut lengths[gi][ci];
                *slot = slot.max(len);
            }
        }
    }
    Ok(lengths)
}

fn frame_timing(frames: &[Frame]) -> Vec<FrameTiming> {
    let total: f64 = frames.iter().map(|f| f.settings.duration).sum();
    let n = frames.len() as f64;
    let mut start = 0.0;
    frames
        .iter()
        .map(|f| {
            // All-zero weights fall back to equal spacing.
            let duration = if total > 0.0 {
                f.settings.duration / total
            } else {
                1.0 / n
            };
            let timing = FrameTiming {
                start,
                duration,
                blend_strength: f.settings.strength,
            };
            start += duration;
            timing
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pack/packer.rs"]
mod tests;
