use crate::{
    animation::ease::{Ease, Tween},
    foundation::core::Millis,
    theme::backdrop::Backdrop,
    theme::palette::{Gradient, PaletteTable},
};

/// Receiver of phase changes. Fire-and-forget: the stream never waits on it.
pub trait ThemeSink {
    fn apply_phase(&mut self, phase: &str);

    /// Called once per stream frame so sinks can animate their transitions.
    fn advance(&mut self, _dt_secs: f64) {}
}

/// Sink that ignores every phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTheme;

impl ThemeSink for NoTheme {
    fn apply_phase(&mut self, _phase: &str) {}
}

/// Sink that records phases in arrival order.
#[derive(Clone, Debug, Default)]
pub struct PhaseLog {
    pub phases: Vec<String>,
}

impl ThemeSink for PhaseLog {
    fn apply_phase(&mut self, phase: &str) {
        self.phases.push(phase.to_string());
    }
}

/// Tracks the current phase and forwards changes to a sink.
#[derive(Debug)]
pub struct PhaseNotifier<T> {
    sink: T,
    current: Option<String>,
}

impl<T: ThemeSink> PhaseNotifier<T> {
    pub fn new(sink: T) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    pub fn notify(&mut self, phase: &str) {
        tracing::debug!(phase, previous = ?self.current, "phase change");
        self.current = Some(phase.to_string());
        self.sink.apply_phase(phase);
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut T {
        &mut self.sink
    }

    pub fn into_sink(self) -> T {
        self.sink
    }
}

/// Background transition length used when a host does not pick one.
pub const DEFAULT_TRANSITION: Millis = Millis(1200);

/// Palette-driven background: eases the gradient between phases and recolors the backdrop.
#[derive(Debug)]
pub struct PaletteTheme {
    table: PaletteTable,
    from: Gradient,
    to: Gradient,
    tween: Tween,
    transition: Millis,
    ease: Ease,
    backdrop: Option<Backdrop>,
}

impl PaletteTheme {
    /// Start on `initial` (falls back to the first palette in the table).
    pub fn new(table: PaletteTable, initial: &str, transition: Millis) -> Option<Self> {
        let palette = table
            .get(initial)
            .or_else(|| table.names().next().and_then(|n| table.get(n)))?;
        let gradient = palette.gradient;
        Some(Self {
            table,
            from: gradient,
            to: gradient,
            tween: Tween::new(Millis::ZERO, Ease::default()),
            transition,
            ease: Ease::default(),
            backdrop: None,
        })
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Background gradient at this instant, mid-transition included.
    pub fn gradient(&self) -> Gradient {
        self.from.lerp(self.to, self.tween.progress())
    }

    pub fn is_transitioning(&self) -> bool {
        !self.tween.is_finished()
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }
}

impl ThemeSink for PaletteTheme {
    fn apply_phase(&mut self, phase: &str) {
        let Some(palette) = self.table.get(phase) else {
            tracing::warn!(phase, "no palette for phase; keeping current background");
            return;
        };
        self.from = self.gradient();
        self.to = palette.gradient;
        self.tween = Tween::new(self.transition, self.ease);
        if let Some(bd) = self.backdrop.as_mut() {
            bd.recolor(palette);
        }
    }

    fn advance(&mut self, dt_secs: f64) {
        self.tween.advance(dt_secs);
        if let Some(bd) = self.backdrop.as_mut() {
            bd.drift(dt_secs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/notifier.rs"]
mod tests;
