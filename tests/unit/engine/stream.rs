use std::{cell::Cell, rc::Rc};

use super::*;
use crate::{
    render::recording::{RecordingSurface, SurfaceCommand},
    script::model::Token,
    text::measure::FixedAdvance,
    theme::notifier::PhaseLog,
};

type TestStream = WordStream<RecordingSurface, FixedAdvance, PhaseLog>;

fn script(words: &[(&str, u64)]) -> Script {
    Script::new(
        words
            .iter()
            .map(|(text, hold)| Token::new(*text, Millis(*hold)))
            .collect(),
    )
    .unwrap()
}

fn stream(s: Script) -> TestStream {
    WordStream::new(
        s,
        EngineConfig::default().without_jitter(),
        RecordingSurface::new(100.0),
        FixedAdvance::new(10.0),
        PhaseLog::default(),
    )
    .unwrap()
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = EngineConfig {
        decay_per_sec: 0.0,
        ..EngineConfig::default()
    };
    let res = WordStream::new(
        script(&[("a", 100)]),
        cfg,
        RecordingSurface::new(100.0),
        FixedAdvance::default(),
        PhaseLog::default(),
    );
    assert!(res.is_err());
}

#[test]
fn start_is_fire_once() {
    let mut s = stream(script(&[("a", 100)]));
    assert!(s.tick(Millis(0)).is_err());
    s.start(Millis(0)).unwrap();
    assert_eq!(s.state(), StreamState::Running);
    assert!(s.start(Millis(1)).is_err());
}

#[test]
fn guides_appear_after_line_fade_in() {
    let mut s = stream(script(&[("a", 100)]));
    s.start(Millis(0)).unwrap();
    s.tick(Millis(499)).unwrap();
    assert!(!s.surface().guides_visible());
    s.tick(Millis(500)).unwrap();
    assert!(s.surface().guides_visible());
}

#[test]
fn first_token_snaps_to_center_and_types_out() {
    let mut s = stream(script(&[("Hi.", 650)]));
    s.start(Millis(0)).unwrap();

    let report = s.tick(Millis(1999)).unwrap();
    assert!(report.activated.is_empty());
    assert_eq!(s.words().len(), 0);

    let report = s.tick(Millis(2000)).unwrap();
    assert_eq!(report.activated, vec![0]);
    // Slot 0 reveals at offset 0.
    assert_eq!(report.revealed, 1);

    let w = s.words().next().unwrap();
    assert_eq!(w.width, 30.0);
    assert_eq!(w.target_x, 35.0);
    assert_eq!(w.current_x, 35.0);
    let el = s.surface().element(w.handle.unwrap()).unwrap();
    assert_eq!(el.x, Some(35.0));
    assert_eq!(el.visible_text(), "H");

    // per_char = min(65, floor(650 * 0.8 / 3)) = 65.
    s.tick(Millis(2129)).unwrap();
    assert_eq!(s.words().next().unwrap().revealed(), 2);
    s.tick(Millis(2130)).unwrap();
    let w = s.words().next().unwrap();
    assert!(w.is_fully_revealed());
    assert_eq!(
        s.surface().element(w.handle.unwrap()).unwrap().visible_text(),
        "Hi."
    );
}

#[test]
fn empty_token_occupies_time_without_glyphs() {
    let mut s = stream(script(&[("", 300)]));
    s.start(Millis(0)).unwrap();
    let report = s.tick(Millis(2000)).unwrap();
    assert_eq!(report.activated, vec![0]);
    assert_eq!(report.revealed, 0);
    assert_eq!(s.words().next().unwrap().width, 0.0);

    // 2000 + (0 typing + 300 hold) + 4000 final hold.
    assert!(!s.tick(Millis(6299)).unwrap().completed);
    assert!(s.tick(Millis(6300)).unwrap().completed);
    assert_eq!(s.completed_at(), Some(Millis(6300)));
}

#[test]
fn completion_fires_once_and_stops_the_loop() {
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let mut s = stream(script(&[("a", 100), ("b", 100)])).with_completion(move || {
        seen.set(seen.get() + 1);
    });
    s.start(Millis(0)).unwrap();

    let mut t = 0;
    while !s.is_complete() && t < 20_000 {
        t += 16;
        s.tick(Millis(t)).unwrap();
    }
    assert!(s.is_complete());
    assert_eq!(calls.get(), 1);
    assert!(s.surface().is_faded_out());

    let report = s.tick(Millis(t + 1000)).unwrap();
    assert_eq!(report, TickReport::default());
    assert_eq!(calls.get(), 1);
    assert_eq!(s.next_due(), None);
}

#[test]
fn frame_delta_is_clamped_after_a_stall() {
    let mut s = stream(script(&[("ab", 100), ("cd", 100)]));
    s.start(Millis(0)).unwrap();
    s.tick(Millis(0)).unwrap();
    s.tick(Millis(2000)).unwrap();
    assert_eq!(s.words().next().unwrap().current_x, 40.0);

    // per_char = 40, typing 80, hold 100 -> next token at 2100.
    s.tick(Millis(2100)).unwrap();
    let oldest = s.words().next().unwrap();
    assert_eq!(oldest.target_x, 8.0);
    // The 100 ms gap since the last frame integrates as 50 ms.
    let expected = 40.0 + (8.0 - 40.0) * (1.0 - (-6.0f64 * 0.05).exp());
    assert!((oldest.current_x - expected).abs() < 1e-9);
}

#[test]
fn sole_word_is_never_evicted() {
    let mut s = stream(script(&[("ab", 5000)]));
    s.start(Millis(0)).unwrap();
    s.tick(Millis(2000)).unwrap();

    s.surface_mut().set_stage_width(1000.0);
    let report = s.tick(Millis(2016)).unwrap();
    assert_eq!(report.evicted, 0);
    let w = s.words().next().unwrap();
    assert_eq!(w.visibility.norm, 1.0);
    assert_eq!(w.visibility.opacity, 0.0);
    assert_eq!(s.words().len(), 1);
}

#[test]
fn missing_stage_reuses_last_known_width() {
    let mut s = stream(script(&[("ab", 100), ("cd", 100)]));
    s.start(Millis(0)).unwrap();
    s.tick(Millis(2000)).unwrap();
    s.surface_mut().remove_stage();
    s.tick(Millis(2100)).unwrap();
    let targets: Vec<f64> = s.words().map(|w| w.target_x).collect();
    assert_eq!(targets, vec![8.0, 40.0]);
}

#[test]
fn refused_elements_do_not_stall_the_schedule() {
    let mut s = stream(script(&[("ab", 100), ("cd", 100)]));
    s.surface_mut().refuse_elements(true);
    s.start(Millis(0)).unwrap();

    let mut t = 0;
    while !s.is_complete() && t < 20_000 {
        t += 16;
        s.tick(Millis(t)).unwrap();
    }
    assert!(s.is_complete());
    assert_eq!(s.activated(), 2);
    assert!(s.words().all(|w| w.handle.is_none()));
    assert!(
        !s.surface()
            .log()
            .iter()
            .any(|c| matches!(c, SurfaceCommand::Create { .. }))
    );
}

#[test]
fn only_the_newest_word_types_when_holds_are_tiny() {
    // 2 ms holds round per_char to 0, so jitter alone decides reveal times.
    let mut s = WordStream::new(
        script(&[("abcdef", 2), ("ghijkl", 2), ("z", 2)]),
        EngineConfig::default(),
        RecordingSurface::new(100.0),
        FixedAdvance::new(10.0),
        PhaseLog::default(),
    )
    .unwrap();
    s.start(Millis(0)).unwrap();

    let mut revealed = 0;
    let mut t = 0;
    while !s.is_complete() && t < 20_000 {
        revealed += s.tick(Millis(t)).unwrap().revealed;
        let typing = s.words().filter(|w| !w.is_fully_revealed()).count();
        assert!(typing <= 1, "{typing} words typing at t={t}");
        if let Some(newest) = s.words().last() {
            assert!(s.words().take(s.words().len() - 1).all(|w| w.is_fully_revealed()));
            assert!(newest.revealed() <= newest.slots);
        }
        t += 1;
    }
    assert!(s.is_complete());
    // Every slot shows exactly once, including ones finished at handoff.
    assert_eq!(revealed, 13);
    let reveals = s
        .surface()
        .log()
        .iter()
        .filter(|c| matches!(c, SurfaceCommand::Reveal { .. }))
        .count();
    assert_eq!(reveals, 13);
}
