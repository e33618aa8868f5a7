//! Configuration module for the invitation backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared passphrase for the admin view (client-side gate, not a security boundary)
    pub admin_passphrase: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Root directory for stored photos
    pub media_path: PathBuf,
    /// Public base URL under which stored photos are reachable
    pub public_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_passphrase = env::var("PARTY_ADMIN_PASSPHRASE").ok();

        let db_path = env::var("PARTY_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let media_path = env::var("PARTY_MEDIA_PATH")
            .unwrap_or_else(|_| "./data/media".to_string())
            .into();

        let public_url =
            env::var("PARTY_PUBLIC_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        let bind_addr = env::var("PARTY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid PARTY_BIND_ADDR format");

        let log_level = env::var("PARTY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_passphrase,
            db_path,
            media_path,
            public_url,
            bind_addr,
            log_level,
        }
    }
}
