use crate::{
    authoring::{
        builder::Builder,
        model::GroupSettings,
        transform_stack::{Coord, Scale, TransformSpec},
    },
    foundation::core::Vec2,
    foundation::error::{StrokeError, StrokeResult},
    glyph::library::glyph,
};

/// Layout settings for [`write_text`]. Spacings are in em units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Em size in author units.
    pub size: f64,
    /// Gap after every glyph.
    pub letter_spacing: f64,
    /// Advance of a whitespace character.
    pub word_spacing: f64,
    /// Thickness of the created groups.
    pub thickness: Option<f64>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 0.1,
            letter_spacing: 0.1,
            word_spacing: 0.4,
            thickness: None,
        }
    }
}

impl TextOptions {
    /// Reject non-positive sizes and non-finite spacing.
    pub fn validate(&self) -> StrokeResult<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(StrokeError::validation("text size must be finite and > 0"));
        }
        if !(self.letter_spacing.is_finite() && self.word_spacing.is_finite()) {
            return Err(StrokeError::validation("text spacing must be finite"));
        }
        Ok(())
    }
}

/// Result of laying out a string.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayout {
    /// Created group indices, one per drawn glyph.
    pub groups: Vec<usize>,
    /// Characters without a glyph.
    pub skipped: Vec<char>,
    /// Horizontal advance in author units.
    pub advance: f64,
}

/// Draw `text` at the current transform, one group per glyph.
///
/// Each glyph is written between a push and a pop, so the stack is unchanged afterwards.
pub fn write_text(
    builder: &mut Builder,
    text: &str,
    opts: &TextOptions,
) -> StrokeResult<TextLayout> {
    opts.validate()?;
    let mut layout = TextLayout::default();
    let mut cursor = 0.0;

    for ch in text.chars() {
        if ch.is_whitespace() {
            cursor += opts.word_spacing;
            continue;
        }
        let Some(g) = glyph(ch) else {
            tracing::debug!(?ch, "no glyph, skipping");
            layout.skipped.push(ch);
            continue;
        };

        builder.push();
        builder.set_transform(TransformSpec {
            translate: Some(Vec2::new(cursor * opts.size, 0.0)),
            scale: Some(Scale::Uniform(opts.size)),
            ..TransformSpec::default()
        });
        let drawn = draw_glyph(builder, ch, g.strokes, opts);
        builder.pop();
        layout.groups.push(drawn?);

        cursor += g.width() + opts.letter_spacing;
    }

    layout.advance = cursor * opts.size;
    Ok(layout)
}

fn draw_glyph(
    builder: &mut Builder,
    ch: char,
    strokes: &[&[(f64, f64, f64)]],
    opts: &TextOptions,
) -> StrokeResult<usize> {
    let group = builder.group(GroupSettings {
        name: Some(ch.to_string()),
        thickness: opts.thickness,
        ..GroupSettings::default()
    })?;
    for stroke in strokes {
        builder.curve(stroke.iter().map(|&(x, y, s)| Coord::new(x, y).strength(s)))?;
    }
    Ok(group)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/text.rs"]
mod tests;
