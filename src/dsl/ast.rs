/// A numeric operand. Fractions (`a/b`) are resolved while parsing; ranges are resolved
/// with the seeded generator when the script is applied.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// `s`.
    Scalar(f64),
    /// `x,y`.
    Point(f64, f64),
    /// `a~b[~c...]`: uniform in `[min, max)`.
    ScalarRange(Vec<f64>),
    /// `x0,y0~x1,y1[~...]`: random point along the line, or along the averaged-quadratic
    /// curve through three or more endpoints.
    PointRange(Vec<(f64, f64)>),
}

impl Value {
    /// `true` for operands that resolve to a single number.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::ScalarRange(_))
    }
}

/// Which transform an operator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// `+`
    Translate,
    /// `*`
    Scale,
    /// `@`, in turns.
    Rotate,
}

/// Recognized `\name args` calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// Reseed the random generator.
    Seed(u64),
    /// Thickness of the text groups.
    Thickness(Value),
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Compose onto the transform stack before the text is drawn.
    Transform {
        /// Operator.
        kind: TransformKind,
        /// Operand.
        value: Value,
        /// Byte offset of the operator.
        offset: usize,
    },
    /// One value per glyph group, interpolated along the group index.
    PerGroup {
        /// Operator.
        kind: TransformKind,
        /// Bracketed operands, in order.
        values: Vec<Value>,
        /// Byte offset of the operator.
        offset: usize,
    },
    /// `\name args`.
    Call {
        /// Parsed call.
        call: Call,
        /// Byte offset of the backslash.
        offset: usize,
    },
}

/// Token ignored in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dropped {
    /// Byte offset of the token.
    pub offset: usize,
    /// Token text.
    pub token: String,
    /// Why it was dropped.
    pub reason: String,
}

/// Parsed DSL line.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Leading glyph text, verbatim.
    pub text: String,
    /// Operations in source order.
    pub ops: Vec<Op>,
    /// Tokens dropped in lenient mode.
    pub dropped: Vec<Dropped>,
}
