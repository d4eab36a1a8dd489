use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use klippa::application::ports::{
    ClipRepository, MediaStore, MediaStoreError, RepositoryError, Transcoder, TranscoderError,
};
use klippa::application::services::ClipService;
use klippa::domain::{ClipId, ClipRecord, ObjectName, TimeRange};
use klippa::presentation::{AppState, create_router};

pub const FAKE_CLIP_BYTES: &[u8] = b"ID3 fake mp3 payload";

pub struct MockMediaStore {
    bucket: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    pub downloads: AtomicUsize,
    pub uploads: AtomicUsize,
    fail_uploads: bool,
}

impl MockMediaStore {
    fn build(bucket: &str, entries: &[(&str, &[u8])], fail_uploads: bool) -> Arc<Self> {
        let objects = entries
            .iter()
            .map(|(name, bytes)| (name.to_string(), bytes.to_vec()))
            .collect();
        Arc::new(Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(objects),
            downloads: AtomicUsize::new(0),
            uploads: AtomicUsize::new(0),
            fail_uploads,
        })
    }

    pub fn empty(bucket: &str) -> Arc<Self> {
        Self::build(bucket, &[], false)
    }

    pub fn with_objects(bucket: &str, entries: &[(&str, &[u8])]) -> Arc<Self> {
        Self::build(bucket, entries, false)
    }

    pub fn failing_uploads(bucket: &str) -> Arc<Self> {
        Self::build(bucket, &[], true)
    }

    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn download(&self, name: &ObjectName, dest: &Path) -> Result<u64, MediaStoreError> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        let bytes = self
            .objects
            .lock()
            .unwrap()
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| MediaStoreError::NotFound(name.to_string()))?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(MediaStoreError::Io)?;
        Ok(bytes.len() as u64)
    }

    async fn upload(&self, name: &ObjectName, src: &Path) -> Result<u64, MediaStoreError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads {
            return Err(MediaStoreError::UploadFailed(
                "simulated upload outage".to_string(),
            ));
        }
        let bytes = tokio::fs::read(src).await.map_err(MediaStoreError::Io)?;
        let len = bytes.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(name.as_str().to_string(), bytes);
        Ok(len)
    }

    fn public_url(&self, name: &ObjectName) -> String {
        format!("https://cdn.test/{}/{}", self.bucket, name)
    }
}

pub struct MockTranscoder {
    duration: f64,
    fail_cut: bool,
    pub cuts: AtomicUsize,
    pub probes: AtomicUsize,
}

impl MockTranscoder {
    pub fn returning(duration: f64) -> Arc<Self> {
        Arc::new(Self {
            duration,
            fail_cut: false,
            cuts: AtomicUsize::new(0),
            probes: AtomicUsize::new(0),
        })
    }

    pub fn failing_cut() -> Arc<Self> {
        Arc::new(Self {
            duration: 0.0,
            fail_cut: true,
            cuts: AtomicUsize::new(0),
            probes: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn cut(
        &self,
        input: &Path,
        output: &Path,
        _range: &TimeRange,
    ) -> Result<(), TranscoderError> {
        self.cuts.fetch_add(1, Ordering::SeqCst);
        if self.fail_cut {
            return Err(TranscoderError::TranscodeFailed(
                "ffmpeg exited with exit status: 1: Invalid argument".to_string(),
            ));
        }
        tokio::fs::read(input)
            .await
            .map_err(|e| TranscoderError::TranscodeFailed(e.to_string()))?;
        tokio::fs::write(output, FAKE_CLIP_BYTES)
            .await
            .map_err(|e| TranscoderError::TranscodeFailed(e.to_string()))?;
        Ok(())
    }

    async fn probe_duration(&self, _path: &Path) -> Result<f64, TranscoderError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.duration)
    }
}

pub struct MockClipRepository {
    clips: Mutex<Vec<ClipRecord>>,
    fail_record: bool,
    pub records: AtomicUsize,
}

impl MockClipRepository {
    fn build(clips: Vec<ClipRecord>, fail_record: bool) -> Arc<Self> {
        Arc::new(Self {
            clips: Mutex::new(clips),
            fail_record,
            records: AtomicUsize::new(0),
        })
    }

    pub fn new() -> Arc<Self> {
        Self::build(Vec::new(), false)
    }

    pub fn seeded(clips: Vec<ClipRecord>) -> Arc<Self> {
        Self::build(clips, false)
    }

    pub fn failing_record() -> Arc<Self> {
        Self::build(Vec::new(), true)
    }

    pub fn stored(&self) -> Vec<ClipRecord> {
        self.clips.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipRepository for MockClipRepository {
    async fn record(&self, clip: &ClipRecord) -> Result<(), RepositoryError> {
        self.records.fetch_add(1, Ordering::SeqCst);
        if self.fail_record {
            return Err(RepositoryError::QueryFailed(
                "simulated catalog outage".to_string(),
            ));
        }
        self.clips.lock().unwrap().push(clip.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ClipRecord>, RepositoryError> {
        let mut clips = self.clips.lock().unwrap().clone();
        clips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clips)
    }

    async fn get(&self, id: ClipId) -> Result<ClipRecord, RepositoryError> {
        self.clips
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.clip_id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

pub struct TestHarness {
    pub app: axum::Router,
    pub source_store: Arc<MockMediaStore>,
    pub clips_store: Arc<MockMediaStore>,
    pub transcoder: Arc<MockTranscoder>,
    pub repository: Arc<MockClipRepository>,
    pub scratch: tempfile::TempDir,
}

impl TestHarness {
    pub fn new(
        source_store: Arc<MockMediaStore>,
        clips_store: Arc<MockMediaStore>,
        transcoder: Arc<MockTranscoder>,
        repository: Arc<MockClipRepository>,
    ) -> Self {
        let scratch = tempfile::TempDir::new().unwrap();
        let clip_service = Arc::new(ClipService::new(
            source_store.clone(),
            clips_store.clone(),
            transcoder.clone(),
            repository.clone(),
            scratch.path().to_path_buf(),
        ));
        let app = create_router(AppState { clip_service });
        Self {
            app,
            source_store,
            clips_store,
            transcoder,
            repository,
            scratch,
        }
    }

    /// A harness with one known source recording (`abc123.mp4`) and a
    /// transcoder that reports 14.85 seconds for whatever it cuts.
    pub fn happy_path() -> Self {
        Self::new(
            MockMediaStore::with_objects("stream-recordings", &[("abc123.mp4", b"fake mp4 bytes")]),
            MockMediaStore::empty("published-clips"),
            MockTranscoder::returning(14.85),
            MockClipRepository::new(),
        )
    }

    pub fn scratch_file_count(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}

pub fn sample_record(stream_id: &str, minutes_ago: i64) -> ClipRecord {
    let clip_id = ClipId::new();
    ClipRecord {
        clip_id,
        stream_id: stream_id.to_string(),
        title: String::new(),
        start_time: "00:00:10".to_string(),
        end_time: "00:00:25".to_string(),
        duration: 15.0,
        url: format!("https://cdn.test/published-clips/{clip_id}.mp3"),
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}

pub async fn read_json(response: axum::http::Response<axum::body::Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
