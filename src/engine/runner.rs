use std::time::Duration;

use crate::{
    engine::clock::{Clock, SystemClock, VirtualClock},
    engine::stream::WordStream,
    foundation::core::Millis,
    foundation::error::{KinetypeError, KinetypeResult},
    render::surface::RenderSurface,
    text::measure::TextMeasure,
    theme::notifier::ThemeSink,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Spacing between frame callbacks.
    pub frame_interval: Millis,
    /// Give up after this much stream time even if the stream has not completed.
    pub max_duration: Millis,
    /// Record a [`FrameSnapshot`] after every frame.
    pub capture: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frame_interval: Millis(16),
            max_duration: Millis(10 * 60 * 1000),
            capture: false,
        }
    }
}

impl RunOptions {
    pub fn at_fps(fps: f64) -> KinetypeResult<Self> {
        if !fps.is_finite() || fps <= 0.0 || fps > 1000.0 {
            return Err(KinetypeError::validation("fps must be in (0, 1000]"));
        }
        Ok(Self {
            frame_interval: Millis((1000.0 / fps).round().max(1.0) as u64),
            ..Self::default()
        })
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn max_duration(mut self, max: Millis) -> Self {
        self.max_duration = max;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// State of one active word after a frame.
pub struct WordSnapshot {
    pub index: usize,
    pub text: String,
    pub x: f64,
    pub target_x: f64,
    pub width: f64,
    pub blur_px: f64,
    pub opacity: f64,
    pub revealed: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    pub t: Millis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub words: Vec<WordSnapshot>,
}

impl FrameSnapshot {
    pub fn capture<S, M, T>(t: Millis, stream: &WordStream<S, M, T>) -> Self
    where
        S: RenderSurface,
        M: TextMeasure,
        T: ThemeSink,
    {
        Self {
            t,
            phase: stream.current_phase().map(str::to_string),
            words: stream
                .words()
                .map(|w| WordSnapshot {
                    index: w.token_index,
                    text: w.text.clone(),
                    x: w.current_x,
                    target_x: w.target_x,
                    width: w.width,
                    blur_px: w.visibility.blur_px,
                    opacity: w.visibility.opacity,
                    revealed: w.revealed(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub activated: usize,
    pub evicted: usize,
    pub completed: bool,
    /// Stream time when the run stopped.
    pub ended_at: Millis,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<FrameSnapshot>,
}

/// Drive `stream` from `clock`, calling `wait` between frames, until it completes or
/// `max_duration` elapses.
pub fn run_with_clock<C, S, M, T>(
    stream: &mut WordStream<S, M, T>,
    clock: &mut C,
    opts: RunOptions,
    mut wait: impl FnMut(&mut C, Millis),
) -> KinetypeResult<RunSummary>
where
    C: Clock,
    S: RenderSurface,
    M: TextMeasure,
    T: ThemeSink,
{
    if opts.frame_interval.0 == 0 {
        return Err(KinetypeError::validation("frame interval must be > 0 ms"));
    }

    let origin = clock.now();
    stream.start(origin)?;
    let mut summary = RunSummary::default();

    loop {
        let now = clock.now();
        let report = stream.tick(now)?;
        summary.frames += 1;
        summary.activated += report.activated.len();
        summary.evicted += report.evicted;
        summary.ended_at = now.saturating_sub(origin);
        if opts.capture {
            summary
                .snapshots
                .push(FrameSnapshot::capture(summary.ended_at, stream));
        }
        if stream.is_complete() {
            summary.completed = true;
            break;
        }
        if summary.ended_at >= opts.max_duration {
            tracing::warn!(
                ended_at = summary.ended_at.0,
                "run stopped before the stream completed"
            );
            break;
        }
        wait(clock, opts.frame_interval);
    }

    tracing::info!(
        frames = summary.frames,
        activated = summary.activated,
        completed = summary.completed,
        "run finished"
    );
    Ok(summary)
}

/// Headless run on a virtual clock: as fast as the CPU allows, fully deterministic.
#[tracing::instrument(skip(stream))]
pub fn run_virtual<S, M, T>(
    stream: &mut WordStream<S, M, T>,
    opts: RunOptions,
) -> KinetypeResult<RunSummary>
where
    S: RenderSurface,
    M: TextMeasure,
    T: ThemeSink,
{
    let mut clock = VirtualClock::default();
    run_with_clock(stream, &mut clock, opts, |c, step| {
        c.advance(step);
    })
}

/// Wall-clock run that sleeps between frames.
#[tracing::instrument(skip(stream))]
pub fn run_realtime<S, M, T>(
    stream: &mut WordStream<S, M, T>,
    opts: RunOptions,
) -> KinetypeResult<RunSummary>
where
    S: RenderSurface,
    M: TextMeasure,
    T: ThemeSink,
{
    let mut clock = SystemClock::new();
    run_with_clock(stream, &mut clock, opts, |_, step| {
        std::thread::sleep(Duration::from_millis(step.0));
    })
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runner.rs"]
mod tests;
