use crate::engine::config::EngineConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Constants of the recession fade.
pub struct FadeParams {
    pub blur_max_px: f64,
    pub fade_zone: f64,
    pub opacity_gain: f64,
}

impl From<&EngineConfig> for FadeParams {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            blur_max_px: cfg.blur_max_px,
            fade_zone: cfg.fade_zone,
            opacity_gain: cfg.opacity_gain,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// How visible a word is at its current position.
pub struct Visibility {
    /// Normalized leftward recession in `[0, 1]`.
    pub norm: f64,
    pub blur_px: f64,
    pub opacity: f64,
}

impl Visibility {
    pub const FULL: Self = Self {
        norm: 0.0,
        blur_px: 0.0,
        opacity: 1.0,
    };
}

/// Visibility of a word whose left edge is at `x`.
///
/// Only leftward recession from the stage center fades; words at or right of center are
/// fully visible. Opacity reaches zero at `norm = 1 / opacity_gain`, before blur saturates.
pub fn visibility(x: f64, width: f64, stage_width: f64, params: FadeParams) -> Visibility {
    let center = x + width * 0.5;
    let distance = (stage_width * 0.5 - center).max(0.0);
    let max_dist = stage_width * params.fade_zone;
    let norm = if max_dist > 0.0 {
        (distance / max_dist).min(1.0)
    } else if distance > 0.0 {
        1.0
    } else {
        0.0
    };
    Visibility {
        norm,
        blur_px: norm * params.blur_max_px,
        opacity: (1.0 - norm * params.opacity_gain).max(0.0),
    }
}

/// One exponential smoothing step of `current` toward `target`.
///
/// Frame-rate independent for a fixed `decay_per_sec`; never overshoots for `dt_secs >= 0`.
/// Within `epsilon` the value snaps exactly onto the target.
pub fn settle(current: f64, target: f64, dt_secs: f64, decay_per_sec: f64, epsilon: f64) -> f64 {
    let diff = target - current;
    if diff.abs() <= epsilon {
        return target;
    }
    let alpha = 1.0 - (-decay_per_sec * dt_secs.max(0.0)).exp();
    current + diff * alpha
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fade.rs"]
mod tests;
