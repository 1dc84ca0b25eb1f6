use super::*;
use crate::foundation::core::Millis;
use crate::script::model::SpeedPreset;

#[test]
fn builder_matches_json_normalization() {
    let script = ScriptBuilder::new()
        .section(
            SectionBuilder::new()
                .phase("opening")
                .default_speed(SpeedPreset::Fast)
                .words(["a", "b"])
                .token(TokenDef::new("c").speed(500).pause_after(100).grow()),
        )
        .build()
        .unwrap();

    let t = script.tokens();
    assert_eq!(t.len(), 3);
    assert_eq!(t[0].phase.as_deref(), Some("opening"));
    assert_eq!(t[1].hold, Millis(300));
    assert_eq!(t[2].hold, Millis(500));
    assert_eq!(t[2].pause_after, Millis(100));
    assert!(t[2].tags.grow);
}

#[test]
fn builder_def_round_trips_through_json() {
    let def = ScriptBuilder::new()
        .section(SectionBuilder::new().phase("finale").word("bye"))
        .into_def();
    let json = serde_json::to_string(&def).unwrap();
    let back = ScriptDef::from_json_str(&json).unwrap();
    let script = back.normalize().unwrap();
    assert_eq!(script.tokens()[0].text, "bye");
    assert_eq!(script.phases(), vec!["finale"]);
}

#[test]
fn builder_rejects_empty_script() {
    assert!(ScriptBuilder::new().build().is_err());
}
