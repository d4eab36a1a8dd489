use std::path::Path;

use async_trait::async_trait;

use crate::domain::TimeRange;

/// Capability boundary around the external media tooling.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Cut `range` out of `input` into an audio-only file at `output`,
    /// overwriting anything already at that path.
    async fn cut(
        &self,
        input: &Path,
        output: &Path,
        range: &TimeRange,
    ) -> Result<(), TranscoderError>;

    /// Duration in seconds of a produced media file.
    async fn probe_duration(&self, path: &Path) -> Result<f64, TranscoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscoderError {
    #[error("transcode failed: {0}")]
    TranscodeFailed(String),
    #[error("duration probe failed: {0}")]
    DurationProbeFailed(String),
}
