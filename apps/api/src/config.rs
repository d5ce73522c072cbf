use anyhow::{Context, Result};

/// Backendless table that holds the user records.
pub const DEFAULT_USERS_TABLE_URL: &str =
    "https://amatoryrabbit-us.backendless.app/api/data/tbl_users";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so the gateway starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub users_table_url: String,
    pub backendless_app_id: Option<String>,
    pub backendless_api_key: Option<String>,
    pub remote_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            users_table_url: std::env::var("USERS_TABLE_URL")
                .unwrap_or_else(|_| DEFAULT_USERS_TABLE_URL.to_string()),
            backendless_app_id: optional_env("BACKENDLESS_APP_ID"),
            backendless_api_key: optional_env("BACKENDLESS_API_KEY"),
            remote_timeout_secs: std::env::var("REMOTE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("REMOTE_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
