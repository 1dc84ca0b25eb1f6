use std::collections::BTreeMap;

use crate::{
    engine::typing::glyph_slots,
    foundation::error::{KinetypeError, KinetypeResult},
    render::surface::{ElementHandle, RenderSurface},
    script::model::{Token, VisualTags},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Last known state of one element.
pub struct RecordedElement {
    pub handle: ElementHandle,
    pub text: String,
    pub tags: VisualTags,
    pub revealed: Vec<bool>,
    pub x: Option<f64>,
    pub blur_px: f64,
    pub opacity: f64,
}

impl RecordedElement {
    /// Text made of revealed slots; hidden slots render as nothing.
    pub fn visible_text(&self) -> String {
        glyph_slots(&self.text)
            .into_iter()
            .zip(&self.revealed)
            .filter(|(_, shown)| **shown)
            .map(|(g, _)| g)
            .collect()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
/// Structural commands, in the order the surface received them.
pub enum SurfaceCommand {
    Create { handle: ElementHandle, text: String },
    Reveal { handle: ElementHandle, slot: usize },
    Destroy { handle: ElementHandle },
    FadeOut,
    ShowGuides,
}

/// In-memory surface that remembers everything it is told.
///
/// Used for headless simulation and as the observable host in tests. Per-frame style
/// updates only overwrite element state; structural commands are also appended to a log.
#[derive(Debug)]
pub struct RecordingSurface {
    stage_width: Option<f64>,
    next_handle: u64,
    elements: BTreeMap<ElementHandle, RecordedElement>,
    destroyed: Vec<RecordedElement>,
    log: Vec<SurfaceCommand>,
    faded_out: bool,
    guides_visible: bool,
    refuse_elements: bool,
}

impl RecordingSurface {
    pub fn new(stage_width: f64) -> Self {
        Self {
            stage_width: Some(stage_width),
            next_handle: 0,
            elements: BTreeMap::new(),
            destroyed: Vec::new(),
            log: Vec::new(),
            faded_out: false,
            guides_visible: false,
            refuse_elements: false,
        }
    }

    /// Simulate a resize.
    pub fn set_stage_width(&mut self, width: f64) {
        self.stage_width = Some(width);
    }

    /// Simulate the stage disappearing from the host.
    pub fn remove_stage(&mut self) {
        self.stage_width = None;
    }

    /// Make every subsequent `create_element` fail.
    pub fn refuse_elements(&mut self, refuse: bool) {
        self.refuse_elements = refuse;
    }

    /// Live elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &RecordedElement> {
        self.elements.values()
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&RecordedElement> {
        self.elements.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.elements.len()
    }

    /// Final state of destroyed elements, in destruction order.
    pub fn destroyed(&self) -> &[RecordedElement] {
        &self.destroyed
    }

    pub fn log(&self) -> &[SurfaceCommand] {
        &self.log
    }

    pub fn is_faded_out(&self) -> bool {
        self.faded_out
    }

    pub fn guides_visible(&self) -> bool {
        self.guides_visible
    }

    fn element_mut(&mut self, handle: ElementHandle) -> KinetypeResult<&mut RecordedElement> {
        self.elements
            .get_mut(&handle)
            .ok_or_else(|| KinetypeError::surface(format!("unknown element {}", handle.0)))
    }
}

impl RenderSurface for RecordingSurface {
    fn stage_width(&self) -> KinetypeResult<f64> {
        self.stage_width
            .ok_or_else(|| KinetypeError::surface("stage is not attached"))
    }

    fn create_element(&mut self, token: &Token) -> KinetypeResult<ElementHandle> {
        if self.refuse_elements {
            return Err(KinetypeError::surface("element creation refused"));
        }
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        let slots = glyph_slots(&token.text).len();
        self.elements.insert(
            handle,
            RecordedElement {
                handle,
                text: token.text.clone(),
                tags: token.tags,
                revealed: vec![false; slots],
                x: None,
                blur_px: 0.0,
                opacity: 1.0,
            },
        );
        self.log.push(SurfaceCommand::Create {
            handle,
            text: token.text.clone(),
        });
        Ok(handle)
    }

    fn reveal_char(&mut self, handle: ElementHandle, slot: usize) -> KinetypeResult<()> {
        let el = self.element_mut(handle)?;
        let Some(flag) = el.revealed.get_mut(slot) else {
            return Err(KinetypeError::surface(format!(
                "element {} has no slot {slot}",
                handle.0
            )));
        };
        *flag = true;
        self.log.push(SurfaceCommand::Reveal { handle, slot });
        Ok(())
    }

    fn set_position(&mut self, handle: ElementHandle, x: f64) -> KinetypeResult<()> {
        self.element_mut(handle)?.x = Some(x);
        Ok(())
    }

    fn set_filter(&mut self, handle: ElementHandle, blur_px: f64) -> KinetypeResult<()> {
        self.element_mut(handle)?.blur_px = blur_px;
        Ok(())
    }

    fn set_opacity(&mut self, handle: ElementHandle, opacity: f64) -> KinetypeResult<()> {
        self.element_mut(handle)?.opacity = opacity;
        Ok(())
    }

    fn destroy(&mut self, handle: ElementHandle) -> KinetypeResult<()> {
        let el = self
            .elements
            .remove(&handle)
            .ok_or_else(|| KinetypeError::surface(format!("unknown element {}", handle.0)))?;
        self.destroyed.push(el);
        self.log.push(SurfaceCommand::Destroy { handle });
        Ok(())
    }

    fn fade_out(&mut self) -> KinetypeResult<()> {
        self.faded_out = true;
        self.log.push(SurfaceCommand::FadeOut);
        Ok(())
    }

    fn show_guides(&mut self) -> KinetypeResult<()> {
        self.guides_visible = true;
        self.log.push(SurfaceCommand::ShowGuides);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
