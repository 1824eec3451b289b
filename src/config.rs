use serde::Deserialize;
use std::time::Duration;

/// Placeholder key shipped in sample env files; treated as "no key configured"
pub const PLACEHOLDER_API_KEY: &str = "YOUR_TMDB_API_KEY_HERE";

/// Which backend holds favorites, history and settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    Memory,
    /// Single JSON document on disk
    File,
    /// Shared Redis instance
    Redis,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. Absent or placeholder means demo mode.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    /// Path of the JSON store when `storage_backend` is `file`
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Redis connection URL when `storage_backend` is `redis`
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Connect, read and write timeout for Redis commands, in milliseconds
    #[serde(default = "default_redis_timeout_ms")]
    pub redis_timeout_ms: u64,

    /// Optional JSON file overriding the built-in mood/genre catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Maximum number of favorites kept
    #[serde(default = "default_max_favorites")]
    pub max_favorites: usize,

    /// Maximum number of history entries kept
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_storage_path() -> String {
    "moodflix_store.json".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_redis_timeout_ms() -> u64 {
    2000
}

fn default_max_favorites() -> usize {
    50
}

fn default_max_history() -> usize {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The usable TMDB key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }

    /// True when movie data comes from the embedded demo set
    pub fn is_demo_mode(&self) -> bool {
        self.api_key().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(config.max_favorites, 50);
        assert_eq!(config.max_history, 20);
        assert_eq!(config.port, 3000);
        assert_eq!(config.redis_timeout(), Duration::from_secs(2));
        assert!(config.is_demo_mode());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TMDB_API_KEY", "abc123"),
            ("STORAGE_BACKEND", "redis"),
            ("MAX_HISTORY", "5"),
        ]);
        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.storage_backend, StorageBackend::Redis);
        assert_eq!(config.max_history, 5);
        assert!(!config.is_demo_mode());
    }

    #[test]
    fn test_placeholder_key_is_demo_mode() {
        let config = config_from(&[("TMDB_API_KEY", PLACEHOLDER_API_KEY)]);
        assert!(config.is_demo_mode());

        let config = config_from(&[("TMDB_API_KEY", "   ")]);
        assert!(config.is_demo_mode());
    }
}
