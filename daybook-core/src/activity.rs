//! Activity records as the backend stores them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Events grouped by calendar date (`YYYY-MM-DD`).
pub type EventsByDate = BTreeMap<String, Vec<ActivityRecord>>;

/// Kind of activity. The backend decides which kinds exist; ones this crate
/// does not name are carried as `Other` with their wire string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Meeting,
    Event,
    Sport,
    Note,
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Meeting => "meeting",
            ActivityKind::Event => "event",
            ActivityKind::Sport => "sport",
            ActivityKind::Note => "note",
            ActivityKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "meeting" => ActivityKind::Meeting,
            "event" => ActivityKind::Event,
            "sport" => ActivityKind::Sport,
            "note" => ActivityKind::Note,
            _ => ActivityKind::Other(kind),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// `null` and a missing field both read as an empty description.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored activity, as returned by `GET /activities/{YYYY-MM}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Server-assigned identifier, used for deletion
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Fields this layer does not interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields for a new activity. The date is supplied separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, title: impl Into<String>) -> Self {
        NewActivity {
            kind,
            title: title.into(),
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
