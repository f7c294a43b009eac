//! The note record and loose-input normalization.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single note, as stored on disk and served over the API.
///
/// Timestamps are epoch milliseconds. Field names are camelCase on the
/// wire and on disk (`createdAt`/`updatedAt`), matching the records older
/// clients have already written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Note {
    /// The sort key for newest-first listings.
    pub fn sort_key(&self) -> u64 {
        if self.updated_at > 0 {
            self.updated_at
        } else {
            self.created_at
        }
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Coerce a loosely-typed timestamp: a JSON number, or a string holding one.
fn to_millis(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)
}

fn string_field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| raw.get(*key).and_then(Value::as_str))
}

/// Normalize a raw record into a well-formed [`Note`].
///
/// Accepts the field spellings that show up in old records and loose
/// clients: `name` for `title`, `body` for `content`, timestamps as
/// numbers or numeric strings. Missing timestamps fall back to each other
/// and finally to now. The second return value reports whether
/// normalization changed anything; the store uses it to write the healed
/// record back on read.
pub fn normalize(raw: &Value, fallback_id: &str) -> (Note, bool) {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_id)
        .to_string();
    let title = string_field(raw, &["title", "name"])
        .unwrap_or("Untitled Note")
        .to_string();
    let content = string_field(raw, &["content", "body"]).unwrap_or("").to_string();

    let raw_created = raw.get("createdAt").and_then(to_millis);
    let raw_updated = raw.get("updatedAt").and_then(to_millis);
    let created_at = raw_created.or(raw_updated).unwrap_or_else(now_millis);
    let updated_at = raw_updated.unwrap_or(created_at);

    let changed = raw.get("id").and_then(Value::as_str) != Some(id.as_str())
        || raw.get("title").and_then(Value::as_str) != Some(title.as_str())
        || raw.get("content").and_then(Value::as_str) != Some(content.as_str())
        || raw_created != Some(created_at)
        || raw_updated != Some(updated_at);

    (
        Note {
            id,
            title,
            content,
            created_at,
            updated_at,
        },
        changed,
    )
}
