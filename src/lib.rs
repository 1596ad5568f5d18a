//! Strokeforge is a procedural stroke engine.
//!
//! Drawings are authored as a hierarchy of keyframes, groups and curves of control points,
//! then packed into dense 3D buffers that a renderer can consume directly.
//!
//! # Pipeline overview
//!
//! 1. **Author**: [`Builder`] converts author-space coordinates through a [`TransformStack`]
//!    into [`ControlPoint`]s, either by hand, through [`write_text`], or from a DSL line
//!    ([`author_line`]).
//! 2. **Animate**: every keyframe carries a frame transform and per-group transforms that a
//!    [`KeyframeInterpolator`] blends (linear or quadratic, optionally looped).
//! 3. **Pack**: [`pack`] normalizes curves to a common point count and fills
//!    [`PackedStrokes`] (positions, colors, thickness, lengths, timing).
//!
//! Curve geometry (arc length, sampling, intersections) lives in [`CurvePath`], built on
//! `kurbo` segments.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: packing and seeded DSL ranges give identical output for identical
//!   input; [`StrokeFingerprint`] makes that checkable.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod authoring;
mod dsl;
mod foundation;
mod geometry;
mod glyph;
mod pack;

pub use animation::ease::Ease;
pub use animation::interp::{InterpMode, InterpOpts, KeyframeInterpolator, KeyframePose};
pub use authoring::builder::{AuthoringOp, Builder};
pub use authoring::model::{Curve, Frame, FrameSettings, Group, GroupSettings};
pub use authoring::point::{CORNER_THRESHOLD, Color, ControlPoint, PointStyle};
pub use authoring::transform_stack::{
    Coord, CoordMeta, CoordMode, Remap, ResetPolicy, Scale, TransformSpec, TransformStack,
};
pub use dsl::ast::{Call, Dropped, Op, Script, TransformKind, Value};
pub use dsl::error::DslError;
pub use dsl::eval::{DslOutcome, author_line};
pub use dsl::parser::{DslOptions, Strictness, parse_line};
pub use foundation::core::{
    Affine, BezPath, Line, Point, Resolution, Transform, Vec2, resolve_index, rotate_vec,
    turns_to_rad,
};
pub use foundation::error::{StrokeError, StrokeResult};
pub use foundation::math::{Lerp, Rng64, midpoint, quad_lerp};
pub use geometry::path::{CurvePath, LineHit};
pub use glyph::library::{Glyph, glyph, supported_chars};
pub use glyph::text::{TextLayout, TextOptions, write_text};
pub use pack::buffer::Buffer3D;
pub use pack::fingerprint::{StrokeFingerprint, fingerprint_packed};
pub use pack::packer::{
    CurveRef, DefaultStyle, FrameTiming, MIN_CONTROL_POINTS, PackOptions, PackedStrokes,
    SAMPLE_SPACING_PX, pack,
};
pub use pack::session::StrokeSession;
