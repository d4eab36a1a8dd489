use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::application::ports::{
    ClipRepository, MediaStore, RepositoryError, Transcoder, TranscoderError,
};
use crate::domain::{ClipId, ClipRecord, ObjectName, TimeRange};

use super::scratch::ScratchFile;

/// One clip creation request as received from a client. Missing fields
/// deserialize to empty strings so validation owns the rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipRequest {
    #[serde(default)]
    pub stream_id: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct CreatedClip {
    pub clip_id: ClipId,
    pub url: String,
    pub duration: f64,
}

/// Sequences one clip request: validate, fetch the source, cut and probe,
/// publish, record the catalog entry, respond. Single pass, no retries.
pub struct ClipService {
    source_store: Arc<dyn MediaStore>,
    clips_store: Arc<dyn MediaStore>,
    transcoder: Arc<dyn Transcoder>,
    repository: Arc<dyn ClipRepository>,
    scratch_dir: PathBuf,
}

impl ClipService {
    pub fn new(
        source_store: Arc<dyn MediaStore>,
        clips_store: Arc<dyn MediaStore>,
        transcoder: Arc<dyn Transcoder>,
        repository: Arc<dyn ClipRepository>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            source_store,
            clips_store,
            transcoder,
            repository,
            scratch_dir,
        }
    }

    #[tracing::instrument(skip(self, request), fields(stream_id = %request.stream_id))]
    pub async fn create_clip(&self, request: ClipRequest) -> Result<CreatedClip, ClipServiceError> {
        if request.stream_id.is_empty()
            || request.start_time.is_empty()
            || request.end_time.is_empty()
        {
            return Err(ClipServiceError::Validation(
                "Missing required fields: stream_id, start_time, end_time".to_string(),
            ));
        }

        let clip_id = ClipId::new();
        let range = TimeRange::new(&request.start_time, &request.end_time);

        // Scratch names are keyed by the fresh clip id so concurrent requests
        // against the same stream never share a path.
        let source = ScratchFile::new(&self.scratch_dir, &format!("{clip_id}.mp4"));
        let source_object = ObjectName::for_source(&request.stream_id);

        tracing::debug!(clip_id = %clip_id, object = %source_object, "Downloading source recording");
        self.source_store
            .download(&source_object, source.path())
            .await
            .map_err(|e| ClipServiceError::SourceUnavailable(e.to_string()))?;

        let clip = ScratchFile::new(&self.scratch_dir, &format!("{clip_id}.mp3"));

        tracing::debug!(clip_id = %clip_id, start = range.start(), end = range.end(), "Extracting clip");
        self.transcoder
            .cut(source.path(), clip.path(), &range)
            .await?;
        let duration = self.transcoder.probe_duration(clip.path()).await?;

        let clip_object = ObjectName::for_clip(&clip_id);

        tracing::debug!(clip_id = %clip_id, object = %clip_object, "Publishing clip");
        self.clips_store
            .upload(&clip_object, clip.path())
            .await
            .map_err(|e| ClipServiceError::UploadFailed(e.to_string()))?;
        let url = self.clips_store.public_url(&clip_object);

        let record = ClipRecord {
            clip_id,
            stream_id: request.stream_id,
            title: request.title,
            start_time: request.start_time,
            end_time: request.end_time,
            duration,
            url: url.clone(),
            created_at: Utc::now(),
        };

        // The clip object is already published and usable without a catalog
        // entry; a failed metadata write must not fail the request.
        if let Err(e) = self.repository.record(&record).await {
            tracing::warn!(
                clip_id = %clip_id,
                error = %e,
                "Clip metadata write failed; clip remains published"
            );
        }

        tracing::info!(clip_id = %clip_id, duration = duration, url = %url, "Clip created");

        Ok(CreatedClip {
            clip_id,
            url,
            duration,
        })
    }

    pub async fn list_clips(&self) -> Result<Vec<ClipRecord>, ClipServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_clip(&self, id: ClipId) -> Result<ClipRecord, ClipServiceError> {
        Ok(self.repository.get(id).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClipServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("failed to fetch source recording: {0}")]
    SourceUnavailable(String),
    #[error("failed to extract clip: {0}")]
    TranscodeFailed(String),
    #[error("failed to probe clip duration: {0}")]
    DurationProbeFailed(String),
    #[error("failed to upload clip: {0}")]
    UploadFailed(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<TranscoderError> for ClipServiceError {
    fn from(e: TranscoderError) -> Self {
        match e {
            TranscoderError::TranscodeFailed(msg) => Self::TranscodeFailed(msg),
            TranscoderError::DurationProbeFailed(msg) => Self::DurationProbeFailed(msg),
        }
    }
}
