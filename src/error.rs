use thiserror::Error;

/// Errors that can occur while browsing, bookmarking or uploading recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Transport failure talking to the recipe API
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The request lost the race against the configured timeout
    #[error("Request took too long! Timeout after {0} second(s)")]
    Timeout(u64),

    /// The recipe API answered with a non-success status
    #[error("{message} ({status})")]
    Api { status: u16, message: String },

    /// No recipe exists for the requested id
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Malformed upload input
    #[error("Wrong ingredient format: {0}")]
    Format(String),

    /// A view was asked to render nothing. Carries the region's error message.
    #[error("{0}")]
    EmptyData(String),

    /// Incremental update was given markup with more elements than the region holds
    #[error("Markup shape changed: region has {expected} element(s), update has {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Reading or writing the bookmark store failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BrowserError {
    /// Whether this error belongs to the network family (transport, timeout, API status).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BrowserError::Network(_) | BrowserError::Timeout(_) | BrowserError::Api { .. }
        )
    }
}

pub type Result<T, E = BrowserError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_network_error() {
        assert!(BrowserError::Timeout(10).is_network());
        assert!(BrowserError::Api {
            status: 400,
            message: "Invalid _id".to_string()
        }
        .is_network());
        assert!(!BrowserError::Format("x".to_string()).is_network());
        assert!(!BrowserError::NotFound("5".to_string()).is_network());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BrowserError::Timeout(10).to_string(),
            "Request took too long! Timeout after 10 second(s)"
        );
        assert_eq!(
            BrowserError::Api {
                status: 400,
                message: "Invalid _id".to_string()
            }
            .to_string(),
            "Invalid _id (400)"
        );
        assert_eq!(
            BrowserError::EmptyData("No bookmarks yet.".to_string()).to_string(),
            "No bookmarks yet."
        );
    }
}
