use std::fmt;

use super::clip::ClipId;

/// Name of an object inside a storage bucket.
///
/// Source recordings and published clips both follow a deterministic naming
/// scheme, so an object name can always be derived without a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName(String);

impl ObjectName {
    /// Source recording for a stream: `<stream_id>.mp4`.
    pub fn for_source(stream_id: &str) -> Self {
        Self(format!("{stream_id}.mp4"))
    }

    /// Published clip audio: `<clip_id>.mp3`.
    pub fn for_clip(clip_id: &ClipId) -> Self {
        Self(format!("{clip_id}.mp3"))
    }

    pub fn from_raw(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
