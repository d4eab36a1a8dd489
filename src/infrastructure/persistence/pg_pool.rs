use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;

const CONNECT_RETRIES: u32 = 5;

/// Open the shared connection pool, retrying with backoff so the service
/// survives a database that comes up slightly after it.
#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    let mut retries = CONNECT_RETRIES;
    let mut delay = Duration::from_millis(500);

    loop {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
        {
            Ok(pool) => {
                info!(max_connections, "Clip catalog connection pool established");
                return Ok(pool);
            }
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis(),
                    "Clip catalog connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                return Err(RepositoryError::ConnectionFailed(e.to_string()));
            }
        }
    }
}
