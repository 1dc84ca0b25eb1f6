use super::*;
use crate::{
    engine::config::EngineConfig,
    render::recording::RecordingSurface,
    script::dsl::{ScriptBuilder, SectionBuilder},
    text::measure::FixedAdvance,
    theme::notifier::PhaseLog,
};

fn greeting() -> WordStream<RecordingSurface, FixedAdvance, PhaseLog> {
    let script = ScriptBuilder::new()
        .section(
            SectionBuilder::new()
                .phase("opening")
                .default_speed(300)
                .words(["Hi.", "there"]),
        )
        .section(
            SectionBuilder::new()
                .phase("finale")
                .default_speed(300)
                .word("friend"),
        )
        .build()
        .unwrap();
    WordStream::new(
        script,
        EngineConfig::default().without_jitter(),
        RecordingSurface::new(100.0),
        FixedAdvance::new(10.0),
        PhaseLog::default(),
    )
    .unwrap()
}

#[test]
fn fps_maps_to_frame_interval() {
    assert_eq!(RunOptions::at_fps(60.0).unwrap().frame_interval, Millis(17));
    assert_eq!(RunOptions::at_fps(25.0).unwrap().frame_interval, Millis(40));
    assert!(RunOptions::at_fps(0.0).is_err());
    assert!(RunOptions::at_fps(f64::NAN).is_err());
}

#[test]
fn virtual_run_completes_and_captures_frames() {
    let mut stream = greeting();
    let summary = run_virtual(&mut stream, RunOptions::default().capture(true)).unwrap();

    assert!(summary.completed);
    assert_eq!(summary.activated, 3);
    assert_eq!(summary.snapshots.len() as u64, summary.frames);
    // 2000 intro + 3 * 300 + 4000 hold, rounded up to the next 16 ms frame.
    assert_eq!(summary.ended_at, Millis(6912));

    let last = summary.snapshots.last().unwrap();
    assert_eq!(last.phase.as_deref(), Some("finale"));
    assert_eq!(stream.theme().phases, vec!["opening", "finale"]);
}

#[test]
fn max_duration_cuts_the_run_short() {
    let mut stream = greeting();
    let summary = run_virtual(
        &mut stream,
        RunOptions::default().max_duration(Millis(1000)),
    )
    .unwrap();
    assert!(!summary.completed);
    assert_eq!(summary.activated, 0);
    assert!(summary.ended_at >= Millis(1000));
}

#[test]
fn snapshots_serialize_without_empty_fields() {
    let mut stream = greeting();
    stream.start(Millis(0)).unwrap();
    stream.tick(Millis(0)).unwrap();
    let snap = FrameSnapshot::capture(Millis(0), &stream);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["t"], 0);
    assert!(json.get("phase").is_none());
    assert_eq!(json["words"].as_array().unwrap().len(), 0);
}
