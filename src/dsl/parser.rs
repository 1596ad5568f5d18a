use crate::{
    dsl::ast::{Call, Dropped, Op, Script, TransformKind, Value},
    dsl::error::DslError,
    dsl::lexer::{Token, lex, split_offsets, words},
    glyph::text::TextOptions,
};

/// What to do with tokens the parser does not understand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Drop them, record them in [`Script::dropped`] and log a warning.
    #[default]
    Lenient,
    /// Fail with a [`DslError`].
    Strict,
}

/// Parsing and evaluation settings for DSL lines.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DslOptions {
    /// Handling of malformed tokens.
    pub strictness: Strictness,
    /// Initial seed of the range generator.
    pub seed: u64,
    /// Layout of the leading text.
    pub text: TextOptions,
}

impl Default for DslOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            seed: 0x5EED,
            text: TextOptions::default(),
        }
    }
}

/// Parse one DSL line.
///
/// In lenient mode the result is always `Ok`; malformed tokens end up in
/// [`Script::dropped`].
#[tracing::instrument(skip(opts), fields(strictness = ?opts.strictness))]
pub fn parse_line(src: &str, opts: &DslOptions) -> Result<Script, DslError> {
    let tokens = lex(src);
    let text_len = tokens.iter().take_while(|t| !t.is_operator()).count();
    let text = if text_len == 0 {
        String::new()
    } else {
        src[tokens[0].span.start..tokens[text_len - 1].span.end].to_owned()
    };

    let mut p = Parser {
        tokens: &tokens,
        pos: text_len,
        strictness: opts.strictness,
        script: Script {
            text,
            ..Script::default()
        },
    };
    while p.pos < p.tokens.len() {
        p.statement()?;
    }
    Ok(p.script)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    strictness: Strictness,
    script: Script,
}

impl<'a> Parser<'_, 'a> {
    fn bump(&mut self) -> Token<'a> {
        let t = self.tokens[self.pos];
        self.pos += 1;
        t
    }

    fn drop_or_fail(&mut self, tok: &Token<'_>, err: DslError) -> Result<(), DslError> {
        match self.strictness {
            Strictness::Strict => Err(err),
            Strictness::Lenient => {
                tracing::warn!(
                    token = tok.text,
                    offset = err.offset,
                    reason = %err.message,
                    "dropping dsl token"
                );
                self.script.dropped.push(Dropped {
                    offset: tok.span.start,
                    token: tok.text.to_owned(),
                    reason: err.message,
                });
                Ok(())
            }
        }
    }

    fn statement(&mut self) -> Result<(), DslError> {
        let tok = self.bump();
        let mut args = Vec::new();
        let result = match tok.text.as_bytes().first() {
            Some(b'\\') => {
                while self.pos < self.tokens.len() && !self.tokens[self.pos].is_operator() {
                    args.push(self.bump());
                }
                call(tok, &args)
            }
            Some(b'+') => transform(TransformKind::Translate, tok),
            Some(b'*') => transform(TransformKind::Scale, tok),
            Some(b'@') => transform(TransformKind::Rotate, tok),
            _ => Err(DslError::new(
                tok.span.start,
                format!("unexpected token '{}'", tok.text),
            )),
        };
        match result {
            Ok(op) => {
                self.script.ops.push(op);
                Ok(())
            }
            Err(err) => {
                self.drop_or_fail(&tok, err)?;
                for arg in args {
                    self.drop_or_fail(
                        &arg,
                        DslError::new(
                            arg.span.start,
                            format!("argument of dropped call '{}'", tok.text),
                        ),
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn call(tok: Token<'_>, args: &[Token<'_>]) -> Result<Op, DslError> {
    let name = &tok.text[1..];
    let call = match name {
        "seed" => {
            let [arg] = args else {
                return Err(arity(tok, 1, args.len()));
            };
            let seed = number(arg.text, arg.span.start)?;
            if !(seed >= 0.0 && seed.fract() == 0.0 && seed <= u64::MAX as f64) {
                return Err(DslError::new(
                    arg.span.start,
                    "seed must be a non-negative integer",
                ));
            }
            Call::Seed(seed as u64)
        }
        "thickness" => {
            let [arg] = args else {
                return Err(arity(tok, 1, args.len()));
            };
            let value = value(arg.text, arg.span.start)?;
            if !value.is_scalar() {
                return Err(DslError::new(arg.span.start, "thickness takes a scalar"));
            }
            Call::Thickness(value)
        }
        "" => return Err(DslError::new(tok.span.start, "missing function name")),
        other => {
            return Err(DslError::new(
                tok.span.start,
                format!("unknown function '{other}'"),
            ));
        }
    };
    Ok(Op::Call {
        call,
        offset: tok.span.start,
    })
}

fn arity(tok: Token<'_>, expected: usize, got: usize) -> DslError {
    DslError::new(
        tok.span.start,
        format!("'{}' takes {expected} argument(s), got {got}", tok.text),
    )
}

fn transform(kind: TransformKind, tok: Token<'_>) -> Result<Op, DslError> {
    let body = &tok.text[1..];
    let at = tok.span.start + 1;
    if body.is_empty() {
        return Err(DslError::new(tok.span.start, "operator without a value"));
    }

    if let Some(inner) = body.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err(DslError::new(tok.span.start, "unclosed '['"));
        };
        let values = words(inner, at + 1)
            .into_iter()
            .map(|(off, w)| checked(kind, value(w, off)?, off))
            .collect::<Result<Vec<_>, _>>()?;
        if values.is_empty() {
            return Err(DslError::new(tok.span.start, "empty per-group list"));
        }
        return Ok(Op::PerGroup {
            kind,
            values,
            offset: tok.span.start,
        });
    }

    let value = checked(kind, value(body, at)?, at)?;
    Ok(Op::Transform {
        kind,
        value,
        offset: tok.span.start,
    })
}

fn checked(kind: TransformKind, value: Value, offset: usize) -> Result<Value, DslError> {
    if kind == TransformKind::Rotate && !value.is_scalar() {
        return Err(DslError::new(offset, "rotation takes a scalar turn fraction"));
    }
    Ok(value)
}

/// `atom` or `atom~atom[~atom...]`.
pub(crate) fn value(src: &str, offset: usize) -> Result<Value, DslError> {
    let parts = split_offsets(src, offset, '~');
    if parts.len() == 1 {
        return atom(src, offset);
    }
    let atoms = parts
        .into_iter()
        .map(|(off, s)| atom(s, off))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(scalars) = atoms
        .iter()
        .map(|a| match a {
            Value::Scalar(s) => Some(*s),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(Value::ScalarRange(scalars));
    }
    if let Some(points) = atoms
        .iter()
        .map(|a| match a {
            Value::Point(x, y) => Some((*x, *y)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(Value::PointRange(points));
    }
    Err(DslError::new(
        offset,
        "range endpoints must be all scalars or all coordinates",
    ))
}

/// `n` or `x,y`.
fn atom(src: &str, offset: usize) -> Result<Value, DslError> {
    match split_offsets(src, offset, ',').as_slice() {
        [(off, s)] => Ok(Value::Scalar(number(s, *off)?)),
        [(ox, x), (oy, y)] => Ok(Value::Point(number(x, *ox)?, number(y, *oy)?)),
        _ => Err(DslError::new(offset, format!("malformed coordinate '{src}'"))),
    }
}

/// Decimal number or `a/b` fraction.
fn number(src: &str, offset: usize) -> Result<f64, DslError> {
    let parse = |s: &str| -> Result<f64, DslError> {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DslError::new(offset, format!("invalid number '{src}'")))
    };
    match src.split_once('/') {
        Some((num, den)) => {
            let den = parse(den)?;
            if den == 0.0 {
                return Err(DslError::new(offset, "division by zero in fraction"));
            }
            Ok(parse(num)? / den)
        }
        None => parse(src),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/parser.rs"]
mod tests;
