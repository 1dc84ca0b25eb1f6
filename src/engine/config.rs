use crate::{
    foundation::core::Millis,
    foundation::error::{KinetypeError, KinetypeResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning constants of the word stream.
///
/// Every field has a default matching the reference choreography, so a script's
/// `engine` block only needs the values it changes.
pub struct EngineConfig {
    /// Delay between `start` and the first token.
    pub intro_delay_ms: Millis,
    /// Delay between `start` and the guide lines appearing.
    pub line_fade_in_ms: Millis,
    /// Hold after the last token before the stream completes.
    pub final_hold_ms: Millis,
    /// Horizontal gap between neighbouring words, in pixels.
    pub gap_px: f64,
    /// Upper bound on the per-character reveal delay.
    pub max_char_ms: Millis,
    /// Fraction of a token's hold spent typing; the rest is a post-typing hold.
    pub reveal_fraction: f64,
    /// Half-width of the symmetric per-character jitter.
    pub jitter_ms: f64,
    /// Exponential settle rate toward target positions, per second.
    pub decay_per_sec: f64,
    /// Distance below which a word snaps onto its target.
    pub snap_epsilon_px: f64,
    /// Blur applied at full recession, in pixels.
    pub blur_max_px: f64,
    /// Fraction of stage width over which a receding word fades out.
    pub fade_zone: f64,
    /// Opacity falls `opacity_gain` times faster than blur rises.
    pub opacity_gain: f64,
    /// Normalized recession at which the oldest word is evicted.
    pub evict_norm: f64,
    /// Frame delta clamp.
    pub max_frame_dt_ms: Millis,
    /// Seed for the jitter generator.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            intro_delay_ms: Millis(2000),
            line_fade_in_ms: Millis(500),
            final_hold_ms: Millis(4000),
            gap_px: 12.0,
            max_char_ms: Millis(65),
            reveal_fraction: 0.8,
            jitter_ms: 5.0,
            decay_per_sec: 6.0,
            snap_epsilon_px: 0.3,
            blur_max_px: 10.0,
            fade_zone: 0.44,
            opacity_gain: 1.4,
            evict_norm: 0.99,
            max_frame_dt_ms: Millis(50),
            seed: 0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> KinetypeResult<()> {
        for (name, value) in [
            ("gap_px", self.gap_px),
            ("jitter_ms", self.jitter_ms),
            ("snap_epsilon_px", self.snap_epsilon_px),
            ("blur_max_px", self.blur_max_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(KinetypeError::validation(format!(
                    "engine {name} must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("decay_per_sec", self.decay_per_sec),
            ("fade_zone", self.fade_zone),
            ("opacity_gain", self.opacity_gain),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(KinetypeError::validation(format!(
                    "engine {name} must be finite and > 0"
                )));
            }
        }
        if !self.reveal_fraction.is_finite()
            || self.reveal_fraction <= 0.0
            || self.reveal_fraction > 1.0
        {
            return Err(KinetypeError::validation(
                "engine reveal_fraction must be in (0, 1]",
            ));
        }
        if !self.evict_norm.is_finite() || self.evict_norm <= 0.0 || self.evict_norm > 1.0 {
            return Err(KinetypeError::validation(
                "engine evict_norm must be in (0, 1]",
            ));
        }
        if self.max_char_ms.0 == 0 {
            return Err(KinetypeError::validation("engine max_char_ms must be > 0"));
        }
        if self.max_frame_dt_ms.0 == 0 {
            return Err(KinetypeError::validation(
                "engine max_frame_dt_ms must be > 0",
            ));
        }
        Ok(())
    }

    /// Jitter-free configuration, for reproducible reveal timing.
    pub fn without_jitter(mut self) -> Self {
        self.jitter_ms = 0.0;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
