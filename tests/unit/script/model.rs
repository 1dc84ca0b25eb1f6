use super::*;

fn script_json() -> &'static str {
    r#"{
        "sections": [
            {
                "phase": "opening",
                "defaults": { "speed": "slow" },
                "words": [
                    "Hello.",
                    { "text": "there", "speed": 400, "pauseAfter": 250, "emphasis": true },
                    { "text": "friend", "speed": "very_slow", "font": "playful" }
                ]
            },
            {
                "phase": "finale",
                "words": ["bye"]
            }
        ]
    }"#
}

#[test]
fn sections_flatten_with_defaults_and_phases() {
    let def = ScriptDef::from_json_str(script_json()).unwrap();
    let script = def.normalize().unwrap();
    assert_eq!(script.len(), 4);

    let t = script.tokens();
    assert_eq!(t[0].text, "Hello.");
    assert_eq!(t[0].hold, Millis(900));
    assert_eq!(t[0].pause_after, Millis::ZERO);
    assert_eq!(t[0].phase.as_deref(), Some("opening"));

    assert_eq!(t[1].hold, Millis(400));
    assert_eq!(t[1].pause_after, Millis(250));
    assert!(t[1].tags.emphasis);
    assert_eq!(t[1].phase, None);

    assert_eq!(t[2].hold, Millis(1400));
    assert_eq!(t[2].tags.font, FontVariant::Playful);

    assert_eq!(t[3].hold, SpeedPreset::Medium.millis());
    assert_eq!(t[3].phase.as_deref(), Some("finale"));

    assert_eq!(script.phases(), vec!["opening", "finale"]);
}

#[test]
fn empty_script_is_rejected() {
    let def = ScriptDef::default();
    let err = def.normalize().unwrap_err();
    assert!(err.to_string().contains("at least one token"));
}

#[test]
fn negative_durations_are_rejected_at_load() {
    let def = ScriptDef::from_json_str(
        r#"{ "sections": [ { "words": [ { "text": "x", "speed": -10 } ] } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        def.normalize(),
        Err(KinetypeError::Validation(_))
    ));

    let def = ScriptDef::from_json_str(
        r#"{ "sections": [ { "words": [ { "text": "x", "pause_after": -1 } ] } ] }"#,
    )
    .unwrap();
    let err = def.normalize().unwrap_err();
    assert!(err.to_string().contains("pause_after"));

    let def = ScriptDef::from_json_str(
        r#"{ "sections": [ { "defaults": { "speed": 0 }, "words": ["x"] } ] }"#,
    )
    .unwrap();
    assert!(def.normalize().is_err());
}

#[test]
fn duplicate_phase_tags_are_rejected() {
    let mut a = Token::new("a", Millis(100));
    a.phase = Some("opening".to_string());
    let mut b = Token::new("b", Millis(100));
    b.phase = Some("opening".to_string());
    assert!(Script::new(vec![a, b]).is_err());
}

#[test]
fn empty_text_tokens_are_allowed() {
    let script = Script::new(vec![Token::new("", Millis(100))]).unwrap();
    assert_eq!(script.len(), 1);
}

#[test]
fn engine_block_overrides_defaults() {
    let def = ScriptDef::from_json_str(
        r#"{ "sections": [ { "words": ["x"] } ], "engine": { "gap_px": 20.0 } }"#,
    )
    .unwrap();
    let cfg = def.engine_config();
    assert_eq!(cfg.gap_px, 20.0);
    assert_eq!(cfg.decay_per_sec, EngineConfig::default().decay_per_sec);
}
