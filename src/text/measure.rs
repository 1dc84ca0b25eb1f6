use crate::{
    engine::typing::glyph_slots, foundation::error::KinetypeResult, script::model::VisualTags,
};

/// Font metrics capability used to size words before layout.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels, with all character slots occupied.
    fn measure(&mut self, text: &str, tags: &VisualTags) -> KinetypeResult<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Monospace approximation: every glyph slot advances by the same amount.
pub struct FixedAdvance {
    pub advance_px: f64,
    /// Multiplier for tokens tagged `grow`.
    pub grow_scale: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance_px: 10.0,
            grow_scale: 1.25,
        }
    }
}

impl FixedAdvance {
    pub fn new(advance_px: f64) -> Self {
        Self {
            advance_px,
            ..Self::default()
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, tags: &VisualTags) -> KinetypeResult<f64> {
        let scale = if tags.grow { self.grow_scale } else { 1.0 };
        Ok(glyph_slots(text).len() as f64 * self.advance_px * scale)
    }
}
