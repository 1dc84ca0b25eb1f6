use std::{borrow::Cow, path::Path};

use crate::{
    foundation::error::{KinetypeError, KinetypeResult},
    script::model::{FontVariant, VisualTags},
    text::measure::TextMeasure,
};

/// Real font metrics via Parley shaping.
///
/// Fonts are registered from raw bytes; variants without their own face fall back to the
/// body face.
pub struct ParleyMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<[u8; 4]>,
    body_family: String,
    emphasis_family: Option<String>,
    playful_family: Option<String>,
    size_px: f32,
    grow_scale: f32,
}

impl std::fmt::Debug for ParleyMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasure")
            .field("body_family", &self.body_family)
            .field("emphasis_family", &self.emphasis_family)
            .field("playful_family", &self.playful_family)
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl ParleyMeasure {
    /// Build a measurer around the body font.
    pub fn new(body_font: &[u8], size_px: f32) -> KinetypeResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(KinetypeError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        let mut font_ctx = parley::FontContext::default();
        let body_family = register_family(&mut font_ctx, body_font)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            body_family,
            emphasis_family: None,
            playful_family: None,
            size_px,
            grow_scale: 1.25,
        })
    }

    /// Load the body font from a file.
    pub fn from_font_file(path: &Path, size_px: f32) -> KinetypeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            KinetypeError::measure(format!("read font '{}': {e}", path.display()))
        })?;
        Self::new(&bytes, size_px)
    }

    pub fn with_variant(mut self, variant: FontVariant, font: &[u8]) -> KinetypeResult<Self> {
        let family = register_family(&mut self.font_ctx, font)?;
        match variant {
            FontVariant::Body => self.body_family = family,
            FontVariant::Emphasis => self.emphasis_family = Some(family),
            FontVariant::Playful => self.playful_family = Some(family),
        }
        Ok(self)
    }

    /// Register an extra face (a bold or italic cut, say) under whatever family it names.
    /// Weight and style matching picks it up for `emphasis` and `italic` tokens.
    pub fn with_face(mut self, font: &[u8]) -> KinetypeResult<Self> {
        register_family(&mut self.font_ctx, font)?;
        Ok(self)
    }

    pub fn with_grow_scale(mut self, scale: f32) -> Self {
        self.grow_scale = scale;
        self
    }

    fn family_for(&self, variant: FontVariant) -> String {
        let specific = match variant {
            FontVariant::Body => None,
            FontVariant::Emphasis => self.emphasis_family.as_ref(),
            FontVariant::Playful => self.playful_family.as_ref(),
        };
        specific.unwrap_or(&self.body_family).clone()
    }
}

fn register_family(font_ctx: &mut parley::FontContext, font: &[u8]) -> KinetypeResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(font.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| KinetypeError::measure("no font families registered from font bytes"))?;
    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| KinetypeError::measure("registered font family has no name"))?
        .to_string())
}

impl TextMeasure for ParleyMeasure {
    fn measure(&mut self, text: &str, tags: &VisualTags) -> KinetypeResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let family = self.family_for(tags.font);
        let size = if tags.grow {
            self.size_px * self.grow_scale
        } else {
            self.size_px
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        if tags.emphasis {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if tags.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<[u8; 4]> = builder.build(text);
        layout.break_all_lines(None);

        let width = layout
            .lines()
            .map(|line| f64::from(line.metrics().advance))
            .fold(0.0, f64::max);
        Ok(width)
    }
}
