//! Configuration module for the A Wee Adventure backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared password that unlocks an edit session (gate disabled when unset)
    pub edit_password: Option<String>,
    /// How long an unlocked edit session lasts, in hours
    pub session_ttl_hours: i64,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploaded photos are stored
    pub photo_dir: PathBuf,
    /// Public base URL used to build absolute photo URLs (relative when unset)
    pub public_base_url: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let edit_password = env::var("WEE_EDIT_PASSWORD").ok();

        let session_ttl_hours = env::var("WEE_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        let db_path = env::var("WEE_DB_PATH")
            .unwrap_or_else(|_| "./data/adventure.sqlite".to_string())
            .into();

        let photo_dir = env::var("WEE_PHOTO_DIR")
            .unwrap_or_else(|_| "./data/photos".to_string())
            .into();

        let public_base_url = env::var("WEE_PUBLIC_BASE_URL")
            .ok()
            .map(|u| u.trim_end_matches('/').to_string());

        let bind_addr = env::var("WEE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid WEE_BIND_ADDR format");

        let log_level = env::var("WEE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            edit_password,
            session_ttl_hours,
            db_path,
            photo_dir,
            public_base_url,
            bind_addr,
            log_level,
        }
    }

    /// Build the public URL for a stored photo.
    pub fn photo_url(&self, id: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/api/photos/{}", base, id),
            None => format!("/api/photos/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("WEE_EDIT_PASSWORD");
        env::remove_var("WEE_SESSION_TTL_HOURS");
        env::remove_var("WEE_DB_PATH");
        env::remove_var("WEE_PHOTO_DIR");
        env::remove_var("WEE_PUBLIC_BASE_URL");
        env::remove_var("WEE_BIND_ADDR");
        env::remove_var("WEE_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.edit_password.is_none());
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.db_path, PathBuf::from("./data/adventure.sqlite"));
        assert_eq!(config.photo_dir, PathBuf::from("./data/photos"));
        assert!(config.public_base_url.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_photo_url_with_and_without_base() {
        let mut config = Config {
            edit_password: None,
            session_ttl_hours: 24,
            db_path: PathBuf::new(),
            photo_dir: PathBuf::new(),
            public_base_url: None,
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            log_level: "info".to_string(),
        };
        assert_eq!(config.photo_url("abc"), "/api/photos/abc");

        config.public_base_url = Some("https://adventure.example.com".to_string());
        assert_eq!(
            config.photo_url("abc"),
            "https://adventure.example.com/api/photos/abc"
        );
    }
}
