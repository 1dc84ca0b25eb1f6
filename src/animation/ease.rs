use crate::foundation::core::Millis;

/// Easing curve applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    #[default]
    InOutQuad,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// A fixed-duration eased progression advanced by frame deltas.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    duration_secs: f64,
    elapsed_secs: f64,
    ease: Ease,
}

impl Tween {
    pub fn new(duration: Millis, ease: Ease) -> Self {
        Self {
            duration_secs: duration.as_secs_f64(),
            elapsed_secs: 0.0,
            ease,
        }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs = (self.elapsed_secs + dt_secs.max(0.0)).min(self.duration_secs);
    }

    /// Eased progress in `[0, 1]`. A zero-length tween is always finished.
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        self.ease.apply(self.elapsed_secs / self.duration_secs)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
