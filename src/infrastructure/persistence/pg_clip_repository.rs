use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{ClipRepository, RepositoryError};
use crate::domain::{ClipId, ClipRecord};

/// Clip catalog backed by PostgreSQL. Each clip is one JSONB document keyed
/// by clip id, with `created_at` lifted into a column for listing order.
pub struct PgClipRepository {
    pool: PgPool,
}

impl PgClipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the clips table and its listing index if they do not exist.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clips (
                clip_id    UUID PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL,
                doc        JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS clips_created_at_idx ON clips (created_at DESC)")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ClipRepository for PgClipRepository {
    #[instrument(skip(self, clip), fields(clip_id = %clip.clip_id))]
    async fn record(&self, clip: &ClipRecord) -> Result<(), RepositoryError> {
        let doc =
            serde_json::to_value(clip).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query("INSERT INTO clips (clip_id, created_at, doc) VALUES ($1, $2, $3)")
            .bind(clip.clip_id.as_uuid())
            .bind(clip.created_at)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ClipRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT doc FROM clips ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let mut clips = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: serde_json::Value = row
                .try_get("doc")
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
            match serde_json::from_value::<ClipRecord>(doc) {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable clip document");
                }
            }
        }

        Ok(clips)
    }

    #[instrument(skip(self), fields(clip_id = %id))]
    async fn get(&self, id: ClipId) -> Result<ClipRecord, RepositoryError> {
        let row = sqlx::query("SELECT doc FROM clips WHERE clip_id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let doc: serde_json::Value = row
            .try_get("doc")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        serde_json::from_value(doc).map_err(|e| RepositoryError::DeserializationFailed(e.to_string()))
    }
}
