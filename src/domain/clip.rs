use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(Uuid);

impl ClipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog entry for one published clip. Written once after the clip object
/// has been uploaded; never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub clip_id: ClipId,
    pub stream_id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    /// Seconds, measured from the produced file rather than the requested range.
    pub duration: f64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
