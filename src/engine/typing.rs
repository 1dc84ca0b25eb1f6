use unicode_segmentation::UnicodeSegmentation;

use crate::{
    engine::config::EngineConfig,
    foundation::core::Millis,
    foundation::rng::Rng64,
    script::model::{Script, Token},
};

/// Visible character slots of `text`, one per grapheme cluster. Spaces count as slots.
pub fn glyph_slots(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// `min(max_char, floor(hold * reveal_fraction / max(n, 1)))`.
pub fn per_char_delay(slots: usize, hold: Millis, cfg: &EngineConfig) -> Millis {
    let budget = (hold.0 as f64) * cfg.reveal_fraction;
    let per = (budget / (slots.max(1) as f64)).floor().max(0.0) as u64;
    Millis(per.min(cfg.max_char_ms.0))
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// When each character of a token becomes visible, relative to activation.
pub struct TypingPlan {
    pub per_char: Millis,
    /// Reveal offset per slot, jitter included and clamped at zero.
    pub reveal_offsets: Vec<Millis>,
}

impl TypingPlan {
    pub fn slots(&self) -> usize {
        self.reveal_offsets.len()
    }

    /// `n * per_char`; jitter never changes it.
    pub fn duration(&self) -> Millis {
        Millis(self.per_char.0.saturating_mul(self.slots() as u64))
    }
}

pub fn plan_typing(text: &str, hold: Millis, cfg: &EngineConfig, rng: &mut Rng64) -> TypingPlan {
    let slots = glyph_slots(text).len();
    let per_char = per_char_delay(slots, hold, cfg);
    let reveal_offsets = (0..slots)
        .map(|i| {
            let nominal = (i as f64) * (per_char.0 as f64);
            let jitter = if cfg.jitter_ms > 0.0 {
                rng.symmetric(cfg.jitter_ms)
            } else {
                0.0
            };
            Millis((nominal + jitter).max(0.0).round() as u64)
        })
        .collect();
    TypingPlan {
        per_char,
        reveal_offsets,
    }
}

/// Delay between a token's activation and the next activation:
/// `typing + max(hold - typing, 0) + pause_after`.
pub fn advance_delay(token: &Token, typing: Millis) -> Millis {
    typing + token.hold.saturating_sub(typing) + token.pause_after
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Deterministic timing of one token, relative to `start`.
pub struct ScheduledToken {
    pub index: usize,
    pub text: String,
    pub activate_at: Millis,
    pub per_char: Millis,
    pub typing: Millis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// The whole run's activation timeline.
pub struct Schedule {
    pub tokens: Vec<ScheduledToken>,
    /// Moment the last token's advance delay elapses.
    pub exhausted_at: Millis,
    /// Moment the stream completes (after the final hold).
    pub complete_at: Millis,
}

/// Compute the activation timeline without running the engine.
pub fn plan_schedule(script: &Script, cfg: &EngineConfig) -> Schedule {
    let mut at = cfg.intro_delay_ms;
    let mut tokens = Vec::with_capacity(script.len());
    for (index, token) in script.tokens().iter().enumerate() {
        let slots = glyph_slots(&token.text).len();
        let per_char = per_char_delay(slots, token.hold, cfg);
        let typing = Millis(per_char.0.saturating_mul(slots as u64));
        tokens.push(ScheduledToken {
            index,
            text: token.text.clone(),
            activate_at: at,
            per_char,
            typing,
            phase: token.phase.clone(),
        });
        at = at + advance_delay(token, typing);
    }
    Schedule {
        tokens,
        exhausted_at: at,
        complete_at: at + cfg.final_hold_ms,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/typing.rs"]
mod tests;
