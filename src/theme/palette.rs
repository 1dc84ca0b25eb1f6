use std::collections::BTreeMap;

use crate::{
    foundation::core::Rgb8,
    foundation::error::{KinetypeError, KinetypeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Three-stop radial background.
pub struct Gradient {
    pub center: Rgb8,
    pub mid: Rgb8,
    pub edge: Rgb8,
}

impl Gradient {
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            center: self.center.lerp(other.center, t),
            mid: self.mid.lerp(other.mid, t),
            edge: self.edge.lerp(other.edge, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Colors of one phase.
pub struct Palette {
    #[serde(flatten)]
    pub gradient: Gradient,
    /// Backdrop blob colors, cycled when there are more blobs than colors.
    pub blobs: Vec<Rgb8>,
}

impl Palette {
    pub fn blob_color(&self, idx: usize) -> Option<Rgb8> {
        if self.blobs.is_empty() {
            return None;
        }
        self.blobs.get(idx % self.blobs.len()).copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Palettes keyed by phase name.
pub struct PaletteTable {
    palettes: BTreeMap<String, Palette>,
}

const fn hex(v: u32) -> Rgb8 {
    Rgb8::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn palette(center: u32, mid: u32, edge: u32, blobs: [u32; 5]) -> Palette {
    Palette {
        gradient: Gradient {
            center: hex(center),
            mid: hex(mid),
            edge: hex(edge),
        },
        blobs: blobs.into_iter().map(hex).collect(),
    }
}

impl PaletteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven phases of the greeting, soft pastels drifting between them.
    pub fn builtin() -> Self {
        let mut t = Self::new();
        t.insert(
            "opening",
            palette(
                0xf2dae5,
                0xe4c8d6,
                0xd6b8c8,
                [0xf0d4e1, 0xe8ccd8, 0xddc4d0, 0xf2dce8, 0xe0d0d8],
            ),
        );
        t.insert(
            "selfaware",
            palette(
                0xe8dced,
                0xdac8de,
                0xccb8cf,
                [0xd4c4f0, 0xdcd0ea, 0xc8bce0, 0xe0d8ee, 0xd0c8e4],
            ),
        );
        t.insert(
            "admission",
            palette(
                0xf0d5dc,
                0xe2c2cc,
                0xd5b2be,
                [0xf0c4d4, 0xe8bcc8, 0xe0b4c0, 0xf0d0da, 0xe4c0cc],
            ),
        );
        t.insert(
            "apology",
            palette(
                0xe8d2e4,
                0xdac0d6,
                0xccb0c8,
                [0xe0d4f0, 0xd8c8e4, 0xd0c0dc, 0xe4d0e8, 0xdcc8e0],
            ),
        );
        t.insert(
            "philosophy",
            palette(
                0xf0ddd2,
                0xe2ccc0,
                0xd5bdb2,
                [0xf0e4c4, 0xe8dcc0, 0xe0d4b8, 0xf0e0cc, 0xe4d8c0],
            ),
        );
        t.insert(
            "realization",
            palette(
                0xdce8e2,
                0xc8dad4,
                0xb8ccc6,
                [0xd4f0e0, 0xc8e4d8, 0xc0dcd0, 0xd0e8dc, 0xc4e0d4],
            ),
        );
        t.insert(
            "finale",
            palette(
                0xefd0da,
                0xe0beca,
                0xd2aebc,
                [0xf0c8d8, 0xe8c0cc, 0xe0b8c4, 0xecc8d4, 0xe4bcc8],
            ),
        );
        t
    }

    pub fn insert(&mut self, name: impl Into<String>, palette: Palette) {
        self.palettes.insert(name.into(), palette);
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    pub fn validate(&self) -> KinetypeResult<()> {
        for (name, p) in &self.palettes {
            if name.trim().is_empty() {
                return Err(KinetypeError::validation("palette name must be non-empty"));
            }
            if p.blobs.is_empty() {
                return Err(KinetypeError::validation(format!(
                    "palette '{name}' needs at least one blob color"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;
