use std::collections::BTreeSet;

use crate::{
    engine::config::EngineConfig,
    foundation::core::Millis,
    foundation::error::{KinetypeError, KinetypeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Named focus durations used by hand-written scripts.
pub enum SpeedPreset {
    /// Climactic moments.
    VerySlow,
    /// Emphatic phrases.
    Slow,
    /// Comfortable reading pace.
    Medium,
    /// Brisk flowing passages.
    MedFast,
    /// Rushing stream.
    Fast,
}

impl SpeedPreset {
    /// How long a token using this preset stays in focus.
    pub fn millis(self) -> Millis {
        Millis(match self {
            Self::VerySlow => 1400,
            Self::Slow => 900,
            Self::Medium => 650,
            Self::MedFast => 450,
            Self::Fast => 300,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Token speed as written in a script: raw milliseconds or a preset name.
pub enum SpeedDef {
    /// Explicit milliseconds. Signed so negative input is reported, not mis-parsed.
    Ms(i64),
    /// Named preset.
    Preset(SpeedPreset),
}

impl SpeedDef {
    fn resolve(self, what: &str) -> KinetypeResult<Millis> {
        match self {
            Self::Preset(p) => Ok(p.millis()),
            Self::Ms(ms) if ms > 0 => Ok(Millis(ms as u64)),
            Self::Ms(ms) => Err(KinetypeError::validation(format!(
                "{what} speed must be > 0 ms (got {ms})"
            ))),
        }
    }
}

impl From<SpeedPreset> for SpeedDef {
    fn from(value: SpeedPreset) -> Self {
        Self::Preset(value)
    }
}

impl From<i64> for SpeedDef {
    fn from(value: i64) -> Self {
        Self::Ms(value)
    }
}

impl From<i32> for SpeedDef {
    fn from(value: i32) -> Self {
        Self::Ms(i64::from(value))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Typeface family requested for a token.
pub enum FontVariant {
    /// The body face.
    #[default]
    Body,
    /// Display face used for the strongest beats.
    Emphasis,
    /// Light-hearted handwritten face.
    Playful,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Cosmetic flags. They never affect timing or layout math.
pub struct VisualTags {
    /// Heavier weight.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub emphasis: bool,
    /// Enlarged glyphs.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub grow: bool,
    /// Italic style.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    /// Alternate font.
    #[serde(default)]
    pub font: FontVariant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One scripted unit of text, immutable once the script is built.
pub struct Token {
    /// Text to type; may be empty, in which case the token only occupies time.
    pub text: String,
    /// How long the token stays focal before the next one appears.
    pub hold: Millis,
    /// Extra delay appended after `hold`.
    pub pause_after: Millis,
    /// Phase that begins with this token.
    pub phase: Option<String>,
    /// Cosmetic flags.
    pub tags: VisualTags,
}

impl Token {
    pub fn new(text: impl Into<String>, hold: Millis) -> Self {
        Self {
            text: text.into(),
            hold,
            pause_after: Millis::ZERO,
            phase: None,
            tags: VisualTags::default(),
        }
    }
}

#[derive(Clone, Debug)]
/// A validated, flattened token sequence ready for playback.
pub struct Script {
    tokens: Vec<Token>,
}

impl Script {
    /// Validate and wrap a token list.
    pub fn new(tokens: Vec<Token>) -> KinetypeResult<Self> {
        if tokens.is_empty() {
            return Err(KinetypeError::validation(
                "script must contain at least one token",
            ));
        }
        let mut phases = BTreeSet::new();
        for (idx, token) in tokens.iter().enumerate() {
            if token.hold.0 == 0 {
                return Err(KinetypeError::validation(format!(
                    "token {idx} ('{}') must have a hold > 0 ms",
                    token.text
                )));
            }
            if let Some(phase) = &token.phase {
                if phase.trim().is_empty() {
                    return Err(KinetypeError::validation(format!(
                        "token {idx} has an empty phase tag"
                    )));
                }
                if !phases.insert(phase.as_str()) {
                    return Err(KinetypeError::validation(format!(
                        "phase '{phase}' is attached to more than one token"
                    )));
                }
            }
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    /// Phase names in the order they are entered.
    pub fn phases(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|t| t.phase.as_deref())
            .collect()
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Serialized script: sections of words, plus optional engine overrides.
pub struct ScriptDef {
    /// Ordered sections.
    pub sections: Vec<SectionDef>,
    /// Engine tuning shipped with the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A run of words sharing a phase and a default speed.
pub struct SectionDef {
    /// Phase entered with the first word of the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Section-level defaults.
    #[serde(default)]
    pub defaults: SectionDefaults,
    /// Words in order.
    pub words: Vec<WordDef>,
}

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Defaults inherited by words of a section.
pub struct SectionDefaults {
    /// Speed for words that do not set their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<SpeedDef>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// A word entry: bare text, or a full token object.
pub enum WordDef {
    /// Shorthand using section defaults.
    Text(String),
    /// Explicit token.
    Token(TokenDef),
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Serialized token.
pub struct TokenDef {
    /// Text to type.
    pub text: String,
    /// Focus duration; falls back to the section default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<SpeedDef>,
    /// Extra delay after the hold, in milliseconds.
    #[serde(default, alias = "pauseAfter")]
    pub pause_after: i64,
    /// Explicit phase tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Cosmetic flags.
    #[serde(flatten)]
    pub tags: VisualTags,
}

impl TokenDef {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn speed(mut self, speed: impl Into<SpeedDef>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    pub fn pause_after(mut self, ms: i64) -> Self {
        self.pause_after = ms;
        self
    }

    pub fn emphasis(mut self) -> Self {
        self.tags.emphasis = true;
        self
    }

    pub fn grow(mut self) -> Self {
        self.tags.grow = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.tags.italic = true;
        self
    }

    pub fn font(mut self, font: FontVariant) -> Self {
        self.tags.font = font;
        self
    }
}

impl ScriptDef {
    /// Parse a JSON script document.
    pub fn from_json_str(s: &str) -> KinetypeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Flatten sections into a validated [`Script`].
    ///
    /// Bare-text words inherit the section speed (or [`SpeedPreset::Medium`]) and no pause.
    /// A section phase is attached to the section's first word.
    pub fn normalize(&self) -> KinetypeResult<Script> {
        let mut tokens = Vec::new();
        for (sec_idx, section) in self.sections.iter().enumerate() {
            let section_speed = match section.defaults.speed {
                Some(s) => s.resolve(&format!("section {sec_idx} default"))?,
                None => SpeedPreset::Medium.millis(),
            };
            for (word_idx, word) in section.words.iter().enumerate() {
                let mut token = match word {
                    WordDef::Text(text) => Token::new(text.clone(), section_speed),
                    WordDef::Token(def) => {
                        let what = format!("section {sec_idx} word {word_idx}");
                        let hold = match def.speed {
                            Some(s) => s.resolve(&what)?,
                            None => section_speed,
                        };
                        if def.pause_after < 0 {
                            return Err(KinetypeError::validation(format!(
                                "{what} pause_after must be >= 0 ms (got {})",
                                def.pause_after
                            )));
                        }
                        Token {
                            text: def.text.clone(),
                            hold,
                            pause_after: Millis(def.pause_after as u64),
                            phase: def.phase.clone(),
                            tags: def.tags,
                        }
                    }
                };
                if word_idx == 0
                    && let Some(phase) = &section.phase
                {
                    token.phase = Some(phase.clone());
                }
                tokens.push(token);
            }
        }
        Script::new(tokens)
    }

    /// Engine configuration shipped with the script, or defaults.
    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
