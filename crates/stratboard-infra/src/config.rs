//! Application configuration loader for stratboard.
//!
//! Non-secret settings come from `stratboard.toml` in the data directory
//! (`~/.stratboard/` in production) and fall back to defaults when the file
//! is missing or malformed. Secrets come from environment variables and are
//! wrapped in [`secrecy::SecretString`] so they never land in logs.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Non-secret application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature sent with every completion request.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Base URL of the completion API (without the `/chat/completions` path).
    #[serde(default = "default_completion_base_url")]
    pub completion_base_url: String,
    /// `HTTP-Referer` attribution header value.
    #[serde(default = "default_http_referer")]
    pub http_referer: String,
    /// `X-Title` attribution header value.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            completion_base_url: default_completion_base_url(),
            http_referer: default_http_referer(),
            app_title: default_app_title(),
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_model() -> String {
    "openai/gpt-4o-2024-11-20".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_completion_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_http_referer() -> String {
    "http://localhost:8501".to_string()
}

fn default_app_title() -> String {
    "Board of Directors Chat".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Load application configuration from `{data_dir}/stratboard.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("stratboard.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No stratboard.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the data directory.
///
/// `STRATBOARD_DATA_DIR` overrides; otherwise `~/.stratboard`, with the
/// current directory as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STRATBOARD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".stratboard");
    }

    PathBuf::from(".stratboard")
}

/// Secrets and credentials read from the environment.
///
/// None of these appear in `Debug` output: the struct deliberately does not
/// derive `Debug`, and the sensitive fields are [`SecretString`]s.
pub struct Secrets {
    /// Bearer token for the completion API (`OPENROUTER_API_KEY`).
    pub completion_api_key: Option<SecretString>,
    /// Base URL of the document store (`STRATBOARD_DB_URL`). The store is
    /// treated as unavailable when unset.
    pub database_url: Option<String>,
    /// Auth token appended to document store requests (`STRATBOARD_DB_AUTH`).
    pub database_auth: Option<SecretString>,
    /// Admin view password (`STRATBOARD_ADMIN_PASSWORD`, default `admin123`).
    pub admin_password: SecretString,
}

impl Secrets {
    /// Read all secrets from the environment.
    pub fn from_env() -> Self {
        Self {
            completion_api_key: env_var("OPENROUTER_API_KEY").map(SecretString::from),
            database_url: env_var("STRATBOARD_DB_URL"),
            database_auth: env_var("STRATBOARD_DB_AUTH").map(SecretString::from),
            admin_password: SecretString::from(
                env_var("STRATBOARD_ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            ),
        }
    }
}

/// Read an environment variable, treating non-Unicode values as absent
/// (secrets must be valid strings).
fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}
