use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the recipe browser
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Base URL of the recipes endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Developer key sent as the `key` query parameter. Required for uploads.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// File backing the bookmark store
    #[serde(default = "default_bookmarks_path")]
    pub bookmarks_path: PathBuf,
    /// Delay before the upload window closes after a successful upload
    #[serde(default = "default_modal_close_ms")]
    pub modal_close_ms: u64,
    /// Sprite sheet referenced by icon markup
    #[serde(default = "default_icons_url")]
    pub icons_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout: default_timeout(),
            results_per_page: default_results_per_page(),
            bookmarks_path: default_bookmarks_path(),
            modal_close_ms: default_modal_close_ms(),
            icons_url: default_icons_url(),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://forkify-api.herokuapp.com/api/v2/recipes".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_results_per_page() -> usize {
    10
}

fn default_bookmarks_path() -> PathBuf {
    PathBuf::from("bookmarks.json")
}

fn default_modal_close_ms() -> u64 {
    2500
}

fn default_icons_url() -> String {
    "img/icons.svg".to_string()
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. forkify.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn modal_close_duration(&self) -> Duration {
        Duration::from_millis(self.modal_close_ms)
    }
}

/// Load configuration from file and environment variables
///
/// See [`BrowserConfig::load`] for the source priority.
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("forkify").required(false))
        // Use double underscore for nested keys: FORKIFY__API_KEY
        .add_source(
            Environment::with_prefix("FORKIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: BrowserConfig = settings.try_deserialize()?;
    if config.results_per_page == 0 {
        return Err(ConfigError::Message(
            "results_per_page must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(
            default_api_url(),
            "https://forkify-api.herokuapp.com/api/v2/recipes"
        );
        assert_eq!(default_timeout(), 10);
        assert_eq!(default_results_per_page(), 10);
        assert_eq!(default_modal_close_ms(), 2500);
    }

    #[test]
    fn test_config_default_matches_serde_defaults() {
        let from_empty: BrowserConfig = serde_json::from_str("{}").unwrap();
        let default = BrowserConfig::default();
        assert_eq!(from_empty.api_url, default.api_url);
        assert_eq!(from_empty.timeout, default.timeout);
        assert_eq!(from_empty.results_per_page, default.results_per_page);
        assert_eq!(from_empty.bookmarks_path, default.bookmarks_path);
        assert!(from_empty.api_key.is_none());
    }

    #[test]
    fn test_durations() {
        let config = BrowserConfig {
            timeout: 3,
            modal_close_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.timeout_duration(), Duration::from_secs(3));
        assert_eq!(config.modal_close_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_config_without_file() {
        // Every field has a default, so loading succeeds without a file
        let config = load_config().unwrap();
        assert!(config.results_per_page >= 1);
    }
}
