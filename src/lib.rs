//! Kinetype is a kinetic-typography word stream engine.
//!
//! A [`Script`] of tokens is played back one word at a time: each word types itself out
//! character by character, settles at the center of the stage, and pushes older words to
//! the left where they blur, fade and are finally evicted.
//!
//! - Load a [`ScriptDef`] from JSON (or build one with [`ScriptBuilder`]) and normalize it
//! - Create a [`WordStream`] over a [`RenderSurface`], a [`TextMeasure`] and a [`ThemeSink`]
//! - Call [`WordStream::tick`] once per frame, or hand the stream to a runner
//!
//! Time is injected, never read from the wall clock, so every run is reproducible on a
//! [`VirtualClock`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod answers;
pub mod effects;
pub mod engine;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod script;
pub mod text;
pub mod theme;

pub use crate::foundation::core::{Millis, Rgb8, Vec2};
pub use crate::foundation::error::{KinetypeError, KinetypeResult};

pub use crate::answers::store::{
    AnswerLog, AnswerRecord, AnswerSink, JsonFileAnswerStore, parse_submission,
};
pub use crate::engine::clock::{Clock, SystemClock, VirtualClock};
pub use crate::engine::config::EngineConfig;
pub use crate::engine::runner::{
    FrameSnapshot, RunOptions, RunSummary, WordSnapshot, run_realtime, run_virtual,
    run_with_clock,
};
pub use crate::engine::stream::{StreamState, TickReport, WordStream};
pub use crate::engine::typing::{Schedule, ScheduledToken, plan_schedule};
pub use crate::engine::word::{ActiveWord, WordId};
pub use crate::render::recording::{RecordedElement, RecordingSurface, SurfaceCommand};
pub use crate::render::surface::{ElementHandle, RenderSurface};
pub use crate::script::dsl::{ScriptBuilder, SectionBuilder};
pub use crate::script::model::{
    FontVariant, Script, ScriptDef, SpeedDef, SpeedPreset, Token, TokenDef, VisualTags,
};
pub use crate::text::measure::{FixedAdvance, TextMeasure};
pub use crate::text::shaped::ParleyMeasure;
pub use crate::theme::backdrop::Backdrop;
pub use crate::theme::notifier::{NoTheme, PaletteTheme, PhaseLog, PhaseNotifier, ThemeSink};
pub use crate::theme::palette::{Gradient, Palette, PaletteTable};
