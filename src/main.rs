use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use klippa::application::services::ClipService;
use klippa::infrastructure::observability::{TracingConfig, init_tracing};
use klippa::infrastructure::persistence::{PgClipRepository, create_pool};
use klippa::infrastructure::storage::MediaStoreFactory;
use klippa::infrastructure::transcoder::FfmpegTranscoder;
use klippa::presentation::config::Settings;
use klippa::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("failed to load configuration")?;
    let port = settings.server.port;

    init_tracing(
        TracingConfig {
            environment: settings.environment,
            ..Default::default()
        },
        port,
    );

    let source_store =
        MediaStoreFactory::create(&settings.storage, &settings.storage.source_bucket)
            .context("failed to initialize source store")?;
    let clips_store = MediaStoreFactory::create(&settings.storage, &settings.storage.clips_bucket)
        .context("failed to initialize clips store")?;

    let pool = create_pool(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to clip catalog")?;
    let repository = PgClipRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .context("failed to prepare clip catalog schema")?;

    let transcoder = Arc::new(FfmpegTranscoder::new(
        settings.transcoder.ffmpeg_path.clone(),
        settings.transcoder.ffprobe_path.clone(),
    ));

    let clip_service = Arc::new(ClipService::new(
        source_store,
        clips_store,
        transcoder,
        Arc::new(repository),
        settings.transcoder.scratch_dir.clone(),
    ));

    let state = AppState { clip_service };
    let router = create_router(state);

    tracing::info!(
        source_bucket = %settings.storage.source_bucket,
        clips_bucket = %settings.storage.clips_bucket,
        "Starting clip service"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
