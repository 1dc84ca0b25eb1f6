use super::*;

use chrono::TimeZone;

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "kinetype_answers_{name}_{}_{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn parse_submission_keeps_strings_and_drops_nulls() {
    let f = parse_submission(r#"{"q1":"yes","q2":null,"q3":"coffee"}"#).unwrap();
    assert_eq!(f, fields(&[("q1", "yes"), ("q3", "coffee")]));
}

#[test]
fn parse_submission_rejects_non_strings() {
    assert!(parse_submission(r#"{"q1":3}"#).is_err());
    assert!(parse_submission(r#"{"q1":{"nested":"x"}}"#).is_err());
    assert!(parse_submission(r#"["q1"]"#).is_err());
    assert!(parse_submission("not json").is_err());
    assert!(parse_submission(r#"{"timestamp":"x"}"#).is_err());
}

#[test]
fn missing_file_is_an_empty_log() {
    let dir = temp_dir("missing");
    let store = JsonFileAnswerStore::new(dir.join("answers.json"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn submissions_append_in_order_with_timestamps() {
    let dir = temp_dir("append");
    let path = dir.join("nested").join("answers.json");
    let mut store = JsonFileAnswerStore::new(&path);

    let t0 = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2026, 2, 14, 9, 31, 0).unwrap();
    store.submit_at(fields(&[("q1", "yes")]), t0).unwrap();
    store
        .submit_at(fields(&[("q1", "no"), ("q3", "tea")]), t1)
        .unwrap();

    let all = store.list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].timestamp, t0);
    assert_eq!(all[0].get("q1"), Some("yes"));
    assert_eq!(all[1].get("q3"), Some("tea"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["answers"][1]["q1"], "no");
    assert!(raw["answers"][0]["timestamp"].as_str().unwrap().starts_with("2026-02-14T09:30:00"));
}

#[test]
fn legacy_null_answers_still_load() {
    let dir = temp_dir("legacy");
    let path = dir.join("answers.json");
    std::fs::write(
        &path,
        r#"{"answers":[{"timestamp":"2025-02-14T10:00:00.000Z","q1":"yes","q2":null}]}"#,
    )
    .unwrap();

    let mut store = JsonFileAnswerStore::new(&path);
    let all = store.list().unwrap();
    assert_eq!(all[0].get("q1"), Some("yes"));
    assert_eq!(all[0].get("q2"), None);

    store.submit(fields(&[("q2", "later")])).unwrap();
    assert_eq!(store.list().unwrap().len(), 2);
}

#[test]
fn corrupt_file_is_a_store_error() {
    let dir = temp_dir("corrupt");
    let path = dir.join("answers.json");
    std::fs::write(&path, "{ nope").unwrap();
    let mut store = JsonFileAnswerStore::new(&path);
    let err = store.submit(fields(&[("q1", "x")])).unwrap_err();
    assert!(err.to_string().starts_with("store error:"));
}

#[test]
fn reserved_timestamp_field_is_rejected() {
    let dir = temp_dir("reserved");
    let mut store = JsonFileAnswerStore::new(dir.join("answers.json"));
    assert!(store.submit(fields(&[("timestamp", "x")])).is_err());
    assert!(store.list().unwrap().is_empty());
}
