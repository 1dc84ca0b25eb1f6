use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};

use crate::foundation::error::{KinetypeError, KinetypeResult};

/// Key reserved for the server-generated timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Accepts flat answer records and persists them somewhere.
pub trait AnswerSink {
    /// Append `fields` with a freshly generated timestamp.
    fn submit(&mut self, fields: BTreeMap<String, String>) -> KinetypeResult<AnswerRecord>;
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One stored submission.
pub struct AnswerRecord {
    pub timestamp: DateTime<Utc>,
    /// Submitted answers. Older files may hold `null` for unanswered questions.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

impl AnswerRecord {
    pub fn new(timestamp: DateTime<Utc>, fields: BTreeMap<String, String>) -> Self {
        Self {
            timestamp,
            fields: fields.into_iter().map(|(k, v)| (k, Some(v))).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// On-disk document: `{ "answers": [ ... ] }`.
pub struct AnswerLog {
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

/// Parse a submission body: a flat JSON object of strings.
///
/// `null` values are dropped. Any other non-string value, or the reserved `timestamp` key,
/// is rejected.
pub fn parse_submission(body: &str) -> KinetypeResult<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let serde_json::Value::Object(map) = value else {
        return Err(KinetypeError::validation(
            "submission must be a JSON object",
        ));
    };

    let mut fields = BTreeMap::new();
    for (key, value) in map {
        if key == TIMESTAMP_KEY {
            return Err(KinetypeError::validation(
                "submission must not set 'timestamp'",
            ));
        }
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::String(s) => {
                fields.insert(key, s);
            }
            other => {
                return Err(KinetypeError::validation(format!(
                    "field '{key}' must be a string, got {other}"
                )));
            }
        }
    }
    Ok(fields)
}

/// Answer log persisted as pretty-printed JSON.
///
/// Every submission rereads the file, appends, and rewrites it whole.
#[derive(Clone, Debug)]
pub struct JsonFileAnswerStore {
    path: PathBuf,
}

impl JsonFileAnswerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current log; a missing file is an empty log.
    pub fn load(&self) -> KinetypeResult<AnswerLog> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AnswerLog::default());
            }
            Err(err) => {
                return Err(KinetypeError::store(format!(
                    "read '{}': {err}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&text).map_err(|err| {
            KinetypeError::store(format!("parse '{}': {err}", self.path.display()))
        })
    }

    pub fn list(&self) -> KinetypeResult<Vec<AnswerRecord>> {
        Ok(self.load()?.answers)
    }

    /// Append with an explicit timestamp.
    #[tracing::instrument(skip(self, fields), fields(path = %self.path.display()))]
    pub fn submit_at(
        &mut self,
        fields: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> KinetypeResult<AnswerRecord> {
        if fields.contains_key(TIMESTAMP_KEY) {
            return Err(KinetypeError::validation(
                "answer fields must not set 'timestamp'",
            ));
        }
        let mut log = self.load()?;
        let record = AnswerRecord::new(timestamp, fields);
        log.answers.push(record.clone());
        self.write(&log)?;
        tracing::info!(count = log.answers.len(), "answer stored");
        Ok(record)
    }

    fn write(&self, log: &AnswerLog) -> KinetypeResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|err| {
                KinetypeError::store(format!("create '{}': {err}", dir.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(log)?;
        std::fs::write(&self.path, json).map_err(|err| {
            KinetypeError::store(format!("write '{}': {err}", self.path.display()))
        })
    }
}

impl AnswerSink for JsonFileAnswerStore {
    fn submit(&mut self, fields: BTreeMap<String, String>) -> KinetypeResult<AnswerRecord> {
        self.submit_at(fields, Utc::now())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/answers/store.rs"]
mod tests;
