//! JSON codec for the persisted project sequence.
//!
//! # Responsibility
//! - Map `Project` values to the camelCase record shape stored in the slot.
//! - Rehydrate `createdAt` from RFC 3339 text or epoch milliseconds.
//!
//! # Invariants
//! - Encoding preserves sequence order and full timestamp precision.
//! - Only a payload that is not a JSON array fails the whole decode. Each
//!   element is decoded on its own; invalid ones are dropped and counted.

use crate::model::project::{CheckStates, Project, ProjectId};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode projects: {err}"),
            Self::Decode(err) => write!(f, "failed to decode projects: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Result of decoding a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedProjects {
    /// Valid projects in persisted order.
    pub projects: Vec<Project>,
    /// Elements skipped for a wrong shape, blank id/name or an unreadable
    /// timestamp.
    pub dropped: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord<'a> {
    id: &'a str,
    name: &'a str,
    created_at: String,
    check_states: &'a CheckStates,
    progress: u8,
}

/// Read-side record. `progress` and check-state values stay untyped here and
/// are filtered in `record_into_project`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: String,
    name: String,
    #[serde(default)]
    created_at: Option<CreatedAtRepr>,
    #[serde(default)]
    check_states: BTreeMap<String, Value>,
    #[serde(default)]
    progress: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedAtRepr {
    Text(String),
    EpochMillis(i64),
}

impl CreatedAtRepr {
    fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Text(value) => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            Self::EpochMillis(millis) => Utc.timestamp_millis_opt(*millis).single(),
        }
    }
}

/// Serializes the full project sequence.
pub fn encode_projects(projects: &[Project]) -> Result<String, CodecError> {
    let records: Vec<ProjectRecord> = projects
        .iter()
        .map(|project| ProjectRecord {
            id: project.id.as_str(),
            name: &project.name,
            created_at: project.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            check_states: &project.check_states,
            progress: project.progress,
        })
        .collect();
    serde_json::to_string(&records).map_err(CodecError::Encode)
}

/// Deserializes a persisted project sequence.
///
/// The cached `progress` is clamped to `0..=100` and otherwise taken as
/// stored; callers holding the catalog recompute it. Check-state values that
/// are not booleans are discarded, leaving the item unchecked.
///
/// # Errors
/// - Returns [`CodecError::Decode`] when `raw` is not a JSON array.
pub fn decode_projects(raw: &str) -> Result<DecodedProjects, CodecError> {
    let elements: Vec<Value> = serde_json::from_str(raw).map_err(CodecError::Decode)?;
    let mut decoded = DecodedProjects::default();

    for element in elements {
        let project = serde_json::from_value::<StoredRecord>(element)
            .ok()
            .and_then(record_into_project);
        match project {
            Some(project) => decoded.projects.push(project),
            None => decoded.dropped += 1,
        }
    }

    Ok(decoded)
}

fn record_into_project(record: StoredRecord) -> Option<Project> {
    if record.id.trim().is_empty() || record.name.trim().is_empty() {
        return None;
    }
    let created_at = record.created_at?.to_datetime()?;
    let check_states = record
        .check_states
        .into_iter()
        .filter_map(|(item_id, state)| state.as_bool().map(|checked| (item_id, checked)))
        .collect();

    Some(Project {
        id: ProjectId::from(record.id),
        name: record.name,
        created_at,
        check_states,
        progress: stored_progress(&record.progress),
    })
}

fn stored_progress(value: &Value) -> u8 {
    match value.as_f64() {
        Some(progress) if progress.is_finite() => progress.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_projects, encode_projects, CodecError};
    use crate::model::project::Project;
    use chrono::{TimeZone, Utc};

    #[test]
    fn encoded_records_use_camel_case_fields() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let project = Project::with_id("p-1".into(), "Site A", created_at);

        let raw = encode_projects(&[project]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value[0]["id"], "p-1");
        assert_eq!(value[0]["createdAt"], "2025-03-01T09:30:00Z");
        assert_eq!(value[0]["checkStates"], serde_json::json!({}));
        assert_eq!(value[0]["progress"], 0);
    }

    #[test]
    fn decode_accepts_iso_text_and_epoch_millis() {
        let raw = r#"[
            {"id":"1712345678901","name":"legacy","createdAt":"2024-04-05T19:34:38.901Z","checkStates":{"pla-1":true},"progress":2},
            {"id":"2","name":"numeric","createdAt":1712345678901,"checkStates":{}}
        ]"#;

        let decoded = decode_projects(raw).unwrap();
        assert_eq!(decoded.dropped, 0);
        assert_eq!(decoded.projects.len(), 2);
        assert_eq!(decoded.projects[0].created_at, decoded.projects[1].created_at);
        assert!(decoded.projects[0].is_checked("pla-1"));
        assert_eq!(decoded.projects[1].progress, 0);
    }

    #[test]
    fn decode_drops_records_with_blank_identity_or_bad_timestamp() {
        let raw = r#"[
            {"id":"","name":"no id","createdAt":"2024-01-01T00:00:00Z"},
            {"id":"a","name":"  ","createdAt":"2024-01-01T00:00:00Z"},
            {"id":"b","name":"bad date","createdAt":"yesterday"},
            {"id":"c","name":"ok","createdAt":"2024-01-01T00:00:00Z"}
        ]"#;

        let decoded = decode_projects(raw).unwrap();
        assert_eq!(decoded.dropped, 3);
        assert_eq!(decoded.projects.len(), 1);
        assert_eq!(decoded.projects[0].id.as_str(), "c");
    }

    #[test]
    fn decode_keeps_valid_neighbours_of_malformed_records() {
        let raw = r#"[
            {"id":"1","name":"good","createdAt":"2024-01-01T00:00:00Z","checkStates":{"pla-1":true},"progress":2},
            {"id":"2","name":"null date","createdAt":null,"checkStates":{},"progress":0},
            {"id":"3","name":"no date","checkStates":{}},
            {"id":4,"name":"numeric id","createdAt":"2024-01-01T00:00:00Z"},
            "not a record",
            {"id":"5","name":"odd states","createdAt":"2024-01-01T00:00:00Z","checkStates":{"pla-1":"yes","pla-2":true},"progress":300},
            {"id":"6","name":"negative","createdAt":"2024-01-01T00:00:00Z","progress":-1}
        ]"#;

        let decoded = decode_projects(raw).unwrap();
        let ids: Vec<_> = decoded.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "5", "6"]);
        assert_eq!(decoded.dropped, 4);

        let odd = &decoded.projects[1];
        assert!(!odd.check_states.contains_key("pla-1"));
        assert!(odd.is_checked("pla-2"));
        assert_eq!(odd.progress, 100);
        assert_eq!(decoded.projects[2].progress, 0);
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        for raw in ["", "not json", "{}", "null"] {
            let err = decode_projects(raw).expect_err("payload must be rejected");
            assert!(matches!(err, CodecError::Decode(_)), "raw={raw}");
        }
    }
}
