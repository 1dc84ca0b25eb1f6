use crate::{
    engine::config::EngineConfig,
    foundation::error::KinetypeResult,
    script::model::{Script, ScriptDef, SectionDef, SectionDefaults, SpeedDef, TokenDef, WordDef},
};

/// Programmatic counterpart of a JSON script.
pub struct ScriptBuilder {
    sections: Vec<SectionDef>,
    engine: Option<EngineConfig>,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            engine: None,
        }
    }

    pub fn section(mut self, section: SectionBuilder) -> Self {
        self.sections.push(section.into_def());
        self
    }

    pub fn engine(mut self, config: EngineConfig) -> Self {
        self.engine = Some(config);
        self
    }

    /// The serializable form, e.g. for writing fixtures.
    pub fn into_def(self) -> ScriptDef {
        ScriptDef {
            sections: self.sections,
            engine: self.engine,
        }
    }

    pub fn build(self) -> KinetypeResult<Script> {
        self.into_def().normalize()
    }
}

pub struct SectionBuilder {
    phase: Option<String>,
    speed: Option<SpeedDef>,
    words: Vec<WordDef>,
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self {
            phase: None,
            speed: None,
            words: Vec::new(),
        }
    }

    pub fn phase(mut self, name: impl Into<String>) -> Self {
        self.phase = Some(name.into());
        self
    }

    pub fn default_speed(mut self, speed: impl Into<SpeedDef>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    pub fn word(mut self, text: impl Into<String>) -> Self {
        self.words.push(WordDef::Text(text.into()));
        self
    }

    pub fn words<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .extend(texts.into_iter().map(|t| WordDef::Text(t.into())));
        self
    }

    pub fn token(mut self, token: TokenDef) -> Self {
        self.words.push(WordDef::Token(token));
        self
    }

    fn into_def(self) -> SectionDef {
        SectionDef {
            phase: self.phase,
            defaults: SectionDefaults { speed: self.speed },
            words: self.words,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/dsl.rs"]
mod tests;
