//! Configuration module
//!
//! Environment-driven configuration for the registration service: server,
//! database pool, upload storage locations, and password-hashing cost.

use std::env;
use std::path::{Path, PathBuf};

const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: u64 = 10;
const BCRYPT_COST: u32 = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    upload_dir: PathBuf,
    upload_tmp_dir: PathBuf,
    upload_public_prefix: String,
    max_upload_size_bytes: u64,
    bcrypt_cost: u32,
    cors_origins: Vec<String>,
    environment: String,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upload_dir: PathBuf = env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "public/uploads".to_string())
            .into();
        let upload_tmp_dir: PathBuf = env::var("UPLOAD_TMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("samiti-uploads"));

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(SERVER_PORT),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            upload_dir,
            upload_tmp_dir,
            upload_public_prefix: env::var("UPLOAD_PUBLIC_PREFIX")
                .unwrap_or_else(|_| "/uploads".to_string()),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(BCRYPT_COST),
            cors_origins,
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    /// Directory uploaded files are relocated into (publicly served).
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Directory in-flight uploads are buffered into before relocation.
    pub fn upload_tmp_dir(&self) -> &Path {
        &self.upload_tmp_dir
    }

    /// Public path prefix stored file references are built from.
    pub fn upload_public_prefix(&self) -> &str {
        &self.upload_public_prefix
    }

    /// Per-file upload ceiling in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Build a config directly; used by tests to avoid touching process env.
    pub fn for_testing(
        database_url: String,
        upload_dir: PathBuf,
        upload_tmp_dir: PathBuf,
    ) -> Self {
        Config {
            server_port: 0,
            database_url,
            db_max_connections: 5,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            upload_dir,
            upload_tmp_dir,
            upload_public_prefix: "/uploads".to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            bcrypt_cost: 4,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        }
    }
}
