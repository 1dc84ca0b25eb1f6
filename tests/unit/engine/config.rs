use super::*;

#[test]
fn defaults_validate() {
    EngineConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg: EngineConfig =
        serde_json::from_str(r#"{ "fade_zone": 0.5, "final_hold_ms": 100 }"#).unwrap();
    assert_eq!(cfg.fade_zone, 0.5);
    assert_eq!(cfg.final_hold_ms, Millis(100));
    assert_eq!(cfg.gap_px, 12.0);
    cfg.validate().unwrap();
}

#[test]
fn invalid_constants_are_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.fade_zone = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.reveal_fraction = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.gap_px = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.max_frame_dt_ms = Millis::ZERO;
    assert!(cfg.validate().is_err());
}

#[test]
fn negative_millis_fail_to_parse() {
    assert!(serde_json::from_str::<EngineConfig>(r#"{ "intro_delay_ms": -5 }"#).is_err());
}

#[test]
fn without_jitter_zeroes_only_jitter() {
    let cfg = EngineConfig::default().without_jitter();
    assert_eq!(cfg.jitter_ms, 0.0);
    assert_eq!(cfg.max_char_ms, Millis(65));
}
