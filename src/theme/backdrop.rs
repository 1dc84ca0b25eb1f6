use crate::{
    foundation::core::{Rgb8, Vec2},
    foundation::rng::Rng64,
    theme::palette::Palette,
};

const MAX_SPEED: f64 = 0.4;
const DAMPING: f64 = 0.998;
const WANDER: f64 = 0.02;
const BOUND_LO: f64 = -15.0;
const BOUND_HI: f64 = 115.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A soft gradient blob. Position is in percent of the viewport.
pub struct Blob {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size_px: f64,
    pub opacity: f64,
    pub color: Rgb8,
}

/// Slowly wandering blobs behind the words.
#[derive(Clone, Debug)]
pub struct Backdrop {
    blobs: Vec<Blob>,
    rng: Rng64,
}

impl Backdrop {
    /// Scatter six to eight blobs colored from `palette`.
    pub fn new(seed: u64, palette: &Palette) -> Self {
        let mut rng = Rng64::new(seed);
        let count = rng.range_inclusive(6, 8) as usize;
        let blobs = (0..count)
            .map(|i| Blob {
                pos: Vec2::new(rng.range_f64(0.0, 100.0), rng.range_f64(0.0, 100.0)),
                vel: Vec2::new(rng.symmetric(0.15), rng.symmetric(0.15)),
                size_px: rng.range_f64(250.0, 600.0),
                opacity: rng.range_f64(0.2, 0.4),
                color: palette.blob_color(i).unwrap_or(palette.gradient.mid),
            })
            .collect();
        Self { blobs, rng }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// One drift step: random wander, damping, speed clamp, soft bounce at the bounds.
    pub fn drift(&mut self, dt_secs: f64) {
        for b in &mut self.blobs {
            let wander = Vec2::new(
                self.rng.symmetric(WANDER * 0.5),
                self.rng.symmetric(WANDER * 0.5),
            );
            b.vel = (b.vel + wander) * DAMPING;
            b.vel.x = b.vel.x.clamp(-MAX_SPEED, MAX_SPEED);
            b.vel.y = b.vel.y.clamp(-MAX_SPEED, MAX_SPEED);
            b.pos += b.vel * dt_secs;

            if b.pos.x < BOUND_LO {
                b.pos.x = BOUND_LO;
                b.vel.x = b.vel.x.abs() * 0.5;
            }
            if b.pos.x > BOUND_HI {
                b.pos.x = BOUND_HI;
                b.vel.x = -b.vel.x.abs() * 0.5;
            }
            if b.pos.y < BOUND_LO {
                b.pos.y = BOUND_LO;
                b.vel.y = b.vel.y.abs() * 0.5;
            }
            if b.pos.y > BOUND_HI {
                b.pos.y = BOUND_HI;
                b.vel.y = -b.vel.y.abs() * 0.5;
            }
        }
    }

    pub fn recolor(&mut self, palette: &Palette) {
        for (i, b) in self.blobs.iter_mut().enumerate() {
            if let Some(c) = palette.blob_color(i) {
                b.color = c;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/backdrop.rs"]
mod tests;
