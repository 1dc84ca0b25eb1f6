use std::collections::VecDeque;

use crate::{
    effects::fade::{FadeParams, settle, visibility},
    engine::config::EngineConfig,
    engine::timers::{TimerEvent, TimerQueue},
    engine::typing::{advance_delay, plan_typing},
    engine::word::{ActiveWord, WordId},
    foundation::core::Millis,
    foundation::error::{KinetypeError, KinetypeResult},
    foundation::rng::Rng64,
    layout::solver::focal_row_targets,
    render::surface::RenderSurface,
    script::model::Script,
    text::measure::TextMeasure,
    theme::notifier::{PhaseNotifier, ThemeSink},
};

/// Lifecycle of a run. Moves forward only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    Idle,
    Running,
    Complete,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// What happened during one `tick`.
pub struct TickReport {
    /// Token indices activated, in order.
    pub activated: Vec<usize>,
    pub revealed: usize,
    pub evicted: usize,
    pub completed: bool,
}

type CompletionFn = Box<dyn FnMut()>;

/// The kinetic word stream: schedules tokens, types them out, and keeps the row laid out.
///
/// Single-threaded and driven from outside: the host calls [`WordStream::tick`] with the
/// current time once per display frame. Coarse timers (activations, character reveals,
/// completion) fire first, then the frame step integrates positions, maps visibility and
/// evicts faded words. Both mutation sites of the active row live behind `&mut self`.
///
/// Collaborator failures are logged and skipped; once started, the schedule always runs
/// to completion.
pub struct WordStream<S, M, T> {
    script: Script,
    config: EngineConfig,
    fade: FadeParams,
    surface: S,
    measure: M,
    notifier: PhaseNotifier<T>,
    timers: TimerQueue,
    rng: Rng64,
    words: VecDeque<ActiveWord>,
    next_index: usize,
    next_word_id: u64,
    state: StreamState,
    last_frame: Option<Millis>,
    last_stage_width: Option<f64>,
    completed_at: Option<Millis>,
    on_complete: Option<CompletionFn>,
}

impl<S, M, T> WordStream<S, M, T>
where
    S: RenderSurface,
    M: TextMeasure,
    T: ThemeSink,
{
    pub fn new(
        script: Script,
        config: EngineConfig,
        surface: S,
        measure: M,
        theme: T,
    ) -> KinetypeResult<Self> {
        config.validate()?;
        Ok(Self {
            fade: FadeParams::from(&config),
            rng: Rng64::new(config.seed),
            script,
            config,
            surface,
            measure,
            notifier: PhaseNotifier::new(theme),
            timers: TimerQueue::new(),
            words: VecDeque::new(),
            next_index: 0,
            next_word_id: 0,
            state: StreamState::Idle,
            last_frame: None,
            last_stage_width: None,
            completed_at: None,
            on_complete: None,
        })
    }

    /// Callback invoked exactly once, when the final hold has elapsed.
    pub fn with_completion(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Begin the run at `now`. The first token appears after the intro delay.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now: Millis) -> KinetypeResult<()> {
        if self.state != StreamState::Idle {
            return Err(KinetypeError::validation("word stream was already started"));
        }
        self.state = StreamState::Running;
        self.timers
            .schedule(now + self.config.line_fade_in_ms, TimerEvent::ShowGuides);
        self.timers.schedule(
            now + self.config.intro_delay_ms,
            TimerEvent::Activate { index: 0 },
        );
        tracing::info!("word stream started");
        Ok(())
    }

    /// Fire every timer due at `now`, then run one frame step.
    pub fn tick(&mut self, now: Millis) -> KinetypeResult<TickReport> {
        let mut report = TickReport::default();
        match self.state {
            StreamState::Idle => {
                return Err(KinetypeError::validation("word stream was not started"));
            }
            StreamState::Complete => return Ok(report),
            StreamState::Running => {}
        }

        while let Some((due, event)) = self.timers.pop_due(now) {
            self.fire(due, event, &mut report);
            if self.state == StreamState::Complete {
                return Ok(report);
            }
        }

        self.frame(now, &mut report);
        Ok(report)
    }

    fn fire(&mut self, due: Millis, event: TimerEvent, report: &mut TickReport) {
        match event {
            TimerEvent::ShowGuides => {
                if let Err(err) = self.surface.show_guides() {
                    tracing::warn!(%err, "could not show guide lines");
                }
            }
            TimerEvent::Activate { index } => {
                if index != self.next_index {
                    tracing::debug!(index, next = self.next_index, "stale activation ignored");
                    return;
                }
                self.activate(index, due, report);
                report.activated.push(index);
            }
            TimerEvent::RevealChar { word, slot } => {
                // Only the newest word types; older words were finished at handoff.
                let Some(w) = self.words.back_mut().filter(|w| w.id == word) else {
                    return;
                };
                if !w.mark_revealed(slot) {
                    return;
                }
                if let Some(handle) = w.handle
                    && let Err(err) = self.surface.reveal_char(handle, slot)
                {
                    tracing::warn!(%err, slot, "could not reveal character");
                }
                report.revealed += 1;
            }
            TimerEvent::Complete => {
                self.complete(due);
                report.completed = true;
            }
        }
    }

    fn activate(&mut self, index: usize, at: Millis, report: &mut TickReport) {
        let Some(token) = self.script.get(index).cloned() else {
            return;
        };

        report.revealed += self.finish_typing();

        if let Some(phase) = token.phase.as_deref() {
            self.notifier.notify(phase);
        }

        let handle = match self.surface.create_element(&token) {
            Ok(h) => Some(h),
            Err(err) => {
                tracing::warn!(%err, index, "could not create word element");
                None
            }
        };

        let width = match self.measure.measure(&token.text, &token.tags) {
            Ok(w) if w.is_finite() && w >= 0.0 => w,
            Ok(w) => {
                tracing::warn!(width = w, index, "measured width is not usable; using 0");
                0.0
            }
            Err(err) => {
                tracing::warn!(%err, index, "could not measure word; using 0");
                0.0
            }
        };

        let plan = plan_typing(&token.text, token.hold, &self.config, &mut self.rng);
        let id = WordId(self.next_word_id);
        self.next_word_id += 1;

        let stage_w = self.read_stage_width();
        let start_x = stage_w.map_or(0.0, |w| w * 0.5 - width * 0.5);
        self.words.push_back(ActiveWord::new(
            id,
            index,
            token.text.as_str(),
            handle,
            width,
            plan.slots(),
            start_x,
        ));
        if let Some(stage_w) = stage_w {
            self.retarget(stage_w);
        }

        if index == 0 {
            for w in &mut self.words {
                w.current_x = w.target_x;
                if let Some(handle) = w.handle
                    && let Err(err) = self.surface.set_position(handle, w.current_x)
                {
                    tracing::warn!(%err, "could not place word");
                }
            }
        }

        for (slot, offset) in plan.reveal_offsets.iter().enumerate() {
            self.timers
                .schedule(at + *offset, TimerEvent::RevealChar { word: id, slot });
        }

        let next_at = at + advance_delay(&token, plan.duration());
        self.next_index = index + 1;
        if self.next_index < self.script.len() {
            self.timers.schedule(
                next_at,
                TimerEvent::Activate {
                    index: self.next_index,
                },
            );
        } else {
            self.timers
                .schedule(next_at + self.config.final_hold_ms, TimerEvent::Complete);
        }

        tracing::debug!(
            index,
            text = %token.text,
            width,
            per_char = plan.per_char.0,
            next_at = next_at.0,
            "token activated"
        );
    }

    /// Show whatever the outgoing word has not revealed yet, so one word types at a time.
    fn finish_typing(&mut self) -> usize {
        let Some(prev) = self.words.back_mut() else {
            return 0;
        };
        let pending = prev.reveal_rest();
        if let Some(handle) = prev.handle {
            for &slot in &pending {
                if let Err(err) = self.surface.reveal_char(handle, slot) {
                    tracing::warn!(%err, slot, "could not reveal character");
                }
            }
        }
        if !pending.is_empty() {
            tracing::debug!(word = prev.id.0, count = pending.len(), "typing cut short");
        }
        pending.len()
    }

    /// Recompute every target from the newest word backwards.
    fn retarget(&mut self, stage_w: f64) {
        let widths: Vec<f64> = self.words.iter().map(|w| w.width).collect();
        let targets = focal_row_targets(stage_w, &widths, self.config.gap_px);
        for (w, t) in self.words.iter_mut().zip(targets) {
            w.target_x = t;
        }
    }

    fn frame(&mut self, now: Millis, report: &mut TickReport) {
        let dt = match self.last_frame {
            Some(prev) => now.saturating_sub(prev).min(self.config.max_frame_dt_ms),
            None => Millis::ZERO,
        };
        self.last_frame = Some(now);
        let dt_secs = dt.as_secs_f64();

        self.notifier.sink_mut().advance(dt_secs);

        let Some(stage_w) = self.read_stage_width() else {
            return;
        };

        for w in &mut self.words {
            w.current_x = settle(
                w.current_x,
                w.target_x,
                dt_secs,
                self.config.decay_per_sec,
                self.config.snap_epsilon_px,
            );
            w.visibility = visibility(w.current_x, w.width, stage_w, self.fade);

            let Some(handle) = w.handle else {
                continue;
            };
            let styled = self
                .surface
                .set_position(handle, w.current_x)
                .and_then(|()| self.surface.set_filter(handle, w.visibility.blur_px))
                .and_then(|()| self.surface.set_opacity(handle, w.visibility.opacity));
            if let Err(err) = styled {
                tracing::warn!(%err, word = w.id.0, "could not style word");
            }
        }

        while self.words.len() > 1
            && self
                .words
                .front()
                .is_some_and(|w| w.visibility.norm >= self.config.evict_norm)
        {
            let Some(old) = self.words.pop_front() else {
                break;
            };
            if let Some(handle) = old.handle
                && let Err(err) = self.surface.destroy(handle)
            {
                tracing::warn!(%err, word = old.id.0, "could not destroy word element");
            }
            tracing::debug!(index = old.token_index, text = %old.text, "word evicted");
            report.evicted += 1;
        }
    }

    fn complete(&mut self, at: Millis) {
        self.state = StreamState::Complete;
        self.completed_at = Some(at);
        self.timers = TimerQueue::new();
        if let Err(err) = self.surface.fade_out() {
            tracing::warn!(%err, "could not fade out presentation");
        }
        tracing::info!(at = at.0, remaining = self.words.len(), "word stream complete");
        if let Some(mut f) = self.on_complete.take() {
            f();
        }
    }

    /// Fresh stage width, or the last one seen when the host cannot answer.
    fn read_stage_width(&mut self) -> Option<f64> {
        match self.surface.stage_width() {
            Ok(w) if w.is_finite() && w >= 0.0 => {
                self.last_stage_width = Some(w);
                Some(w)
            }
            Ok(w) => {
                tracing::warn!(width = w, "stage width is not usable");
                self.last_stage_width
            }
            Err(err) => {
                tracing::warn!(%err, "stage width unavailable");
                self.last_stage_width
            }
        }
    }

    /// Active words, oldest first.
    pub fn words(&self) -> impl ExactSizeIterator<Item = &ActiveWord> {
        self.words.iter()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == StreamState::Complete
    }

    pub fn completed_at(&self) -> Option<Millis> {
        self.completed_at
    }

    /// Number of tokens activated so far.
    pub fn activated(&self) -> usize {
        self.next_index
    }

    pub fn current_phase(&self) -> Option<&str> {
        self.notifier.current()
    }

    /// Earliest pending timer, for hosts that sleep between frames.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn theme(&self) -> &T {
        self.notifier.sink()
    }

    pub fn into_parts(self) -> (S, M, T) {
        (self.surface, self.measure, self.notifier.into_sink())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/stream.rs"]
mod tests;
