use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub constants: RawConstants,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    pub rate_limiting: RateLimitingSettings,
}

/// Request limits applied to the public auth routes.
#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitingSettings {
    pub req_per_second: u64,
    pub burst_size: u32,
}

/// Where uploaded machine logos and gallery media are stored.
#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub media_folder: PathBuf,
    /// Uploads larger than this are rejected before touching disk.
    pub max_upload_bytes: usize,
    /// Which extensions are categorized as photos
    pub photo_extensions: Vec<String>,
    /// Which extensions are categorized as videos
    pub video_extensions: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    /// A session is a fixed-lifetime capability; there is no renewal.
    pub session_expiry_hours: i64,
}
