//! Decoding of every `status.json` shape this service has ever written.
//!
//! Records carrying `schema_version` are decoded by version. Records without
//! it predate the tag and come in two shapes:
//!
//! - flat: `{"version": 3, "audio_url": "https://.../daily_audio-<uuid>.mp3"}`
//! - history: `{"history": [{"version", "filename", "url", "created_at"}, ...]}`,
//!   possibly alongside a newer flat `version` / `audio_url` pointer
//!
//! Each shape has its own pure migration into the current [`StatusRecord`].

use super::error::StatusDecodeError;
use super::model::{filename_from_url, HistoryEntry, StatusRecord, STATUS_SCHEMA_VERSION};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Untagged records, tried in declaration order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyStatus {
    History {
        history: Vec<LegacyHistoryEntry>,
        #[serde(default)]
        version: u64,
        #[serde(default)]
        audio_url: Option<String>,
    },
    Flat {
        version: u64,
        #[serde(default)]
        audio_url: String,
    },
}

#[derive(Debug, Deserialize)]
struct LegacyHistoryEntry {
    version: u64,
    #[serde(default)]
    filename: Option<String>,
    url: String,
    #[serde(default)]
    created_at: Option<Value>,
}

/// Decode raw `status.json` bytes into the current schema.
pub fn decode_status(bytes: &[u8]) -> Result<StatusRecord, StatusDecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;

    match value.get("schema_version") {
        Some(raw) => {
            let schema = raw
                .as_u64()
                .ok_or(StatusDecodeError::InvalidSchemaVersion)?;
            if schema != u64::from(STATUS_SCHEMA_VERSION) {
                return Err(StatusDecodeError::UnsupportedSchema(schema));
            }
            let record: StatusRecord = serde_json::from_value(value)?;
            Ok(record.normalized())
        }
        None => {
            let legacy: LegacyStatus = serde_json::from_value(value)?;
            Ok(migrate_legacy(legacy))
        }
    }
}

fn migrate_legacy(legacy: LegacyStatus) -> StatusRecord {
    match legacy {
        LegacyStatus::Flat {
            version,
            audio_url,
        } => migrate_flat(version, audio_url),
        LegacyStatus::History {
            history,
            version,
            audio_url,
        } => migrate_history(history, version, audio_url),
    }
}

/// A flat record becomes a one-entry history. An empty pointer keeps only the
/// version counter so numbering continues where it left off.
fn migrate_flat(version: u64, audio_url: String) -> StatusRecord {
    if audio_url.is_empty() {
        return StatusRecord::with_version(version);
    }

    StatusRecord::from_parts(version, Some(audio_url), Vec::new())
}

/// Writers that bumped the flat pointer in place left `history` behind, so a
/// pointer newer than the last entry is kept as an entry of its own.
fn migrate_history(
    history: Vec<LegacyHistoryEntry>,
    version: u64,
    audio_url: Option<String>,
) -> StatusRecord {
    let entries = history
        .into_iter()
        .map(|entry| HistoryEntry {
            version: entry.version,
            filename: entry
                .filename
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| filename_from_url(&entry.url)),
            created_at: entry.created_at.as_ref().and_then(parse_timestamp),
            url: entry.url,
        })
        .collect();

    StatusRecord::from_parts(version, audio_url, entries)
}

/// Accepts RFC 3339, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` (taken as UTC) and
/// epoch seconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}
