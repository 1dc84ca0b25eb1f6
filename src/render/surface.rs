use crate::{foundation::error::KinetypeResult, script::model::Token};

/// Opaque handle to a host-side visual element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementHandle(pub u64);

/// Host viewport the stream positions its words in.
///
/// Every call may fail. The stream treats failures as degraded visuals, never as a reason
/// to stop advancing.
pub trait RenderSurface {
    /// Current stage width in pixels. Queried every frame and on every activation.
    fn stage_width(&self) -> KinetypeResult<f64>;

    /// Create the element for `token`, with all character slots present but hidden.
    fn create_element(&mut self, token: &Token) -> KinetypeResult<ElementHandle>;

    /// Make character slot `slot` visible.
    fn reveal_char(&mut self, handle: ElementHandle, slot: usize) -> KinetypeResult<()>;

    fn set_position(&mut self, handle: ElementHandle, x: f64) -> KinetypeResult<()>;

    fn set_filter(&mut self, handle: ElementHandle, blur_px: f64) -> KinetypeResult<()>;

    fn set_opacity(&mut self, handle: ElementHandle, opacity: f64) -> KinetypeResult<()>;

    fn destroy(&mut self, handle: ElementHandle) -> KinetypeResult<()>;

    /// Fade out the whole presentation once the stream completes.
    fn fade_out(&mut self) -> KinetypeResult<()>;

    /// Reveal the decorative guide lines. Hosts without guides can ignore it.
    fn show_guides(&mut self) -> KinetypeResult<()> {
        Ok(())
    }
}
