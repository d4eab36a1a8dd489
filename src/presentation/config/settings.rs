use std::env;
use std::path::PathBuf;

use super::Environment;

/// Runtime configuration. All of it is environment-supplied; there is no
/// config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub transcoder: TranscoderSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    /// Private bucket holding source recordings.
    pub source_bucket: String,
    /// Public-read bucket published clips land in.
    pub clips_bucket: String,
    pub public_base_url: String,
    pub local_path: String,
    pub gcp_service_account: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Gcs,
    Local,
}

impl TryFrom<String> for StorageProvider {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "gcs" => Ok(Self::Gcs),
            "local" => Ok(Self::Local),
            other => Err(format!(
                "Invalid storage provider: {}. Expected: gcs or local",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct TranscoderSettings {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub scratch_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {message}")]
    InvalidVar {
        name: &'static str,
        message: String,
    },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment = match env::var("APP_ENV") {
            Ok(v) => Environment::try_from(v).map_err(|message| SettingsError::InvalidVar {
                name: "APP_ENV",
                message,
            })?,
            Err(_) => Environment::Local,
        };

        let port = match env::var("SERVER_PORT") {
            Ok(v) => v.parse().map_err(|_| SettingsError::InvalidVar {
                name: "SERVER_PORT",
                message: format!("not a port number: {v}"),
            })?,
            Err(_) => 8080,
        };

        let provider = match env::var("STORAGE_PROVIDER") {
            Ok(v) => StorageProvider::try_from(v).map_err(|message| SettingsError::InvalidVar {
                name: "STORAGE_PROVIDER",
                message,
            })?,
            Err(_) => StorageProvider::Gcs,
        };

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v.parse().map_err(|_| SettingsError::InvalidVar {
                name: "DATABASE_MAX_CONNECTIONS",
                message: format!("not a number: {v}"),
            })?,
            Err(_) => 5,
        };

        Ok(Self {
            environment,
            server: ServerSettings { port },
            storage: StorageSettings {
                provider,
                source_bucket: require("SOURCE_BUCKET")?,
                clips_bucket: require("CLIPS_BUCKET")?,
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "https://storage.googleapis.com".to_string()),
                local_path: env::var("STORAGE_LOCAL_PATH")
                    .unwrap_or_else(|_| "./data".to_string()),
                gcp_service_account: env::var("GCP_SERVICE_ACCOUNT").ok(),
            },
            database: DatabaseSettings {
                url: require("DATABASE_URL")?,
                max_connections,
            },
            transcoder: TranscoderSettings {
                ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
                ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
                scratch_dir: env::var("SCRATCH_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir()),
            },
        })
    }
}

fn require(name: &'static str) -> Result<String, SettingsError> {
    env::var(name).map_err(|_| SettingsError::MissingVar(name))
}
