//! Application configuration.
//!
//! The browser bundle reads the API base URL at compile time from
//! `ADJAHI_API_URL`. The server reads its settings from environment variables;
//! load them with `ServerConfig::from_env()` after calling `dotenvy::dotenv()`.

/// API base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Extra attempts for idempotent requests that fail transiently
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Settings for the API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, without trailing slash
    pub api_base_url: String,
    /// Retries for GET requests on network errors and 5xx answers
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Configuration baked into the build
    pub fn from_build_env() -> Self {
        Self::new(option_env!("ADJAHI_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Full URL for an endpoint path such as `/patients/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Server process configuration loaded from environment variables.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum log level
    /// Example: debug
    pub log_filter: Option<String>,
}

#[cfg(feature = "ssr")]
impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("RUST_LOG").ok(),
        }
    }

    /// Level for the tracing subscriber, `INFO` when unset or unparsable
    pub fn log_level(&self) -> tracing::Level {
        self.log_filter
            .as_deref()
            .and_then(|filter| filter.trim().parse().ok())
            .unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(feature = "ssr")]
impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.adjahi.org/api/v1/");
        assert_eq!(config.api_base_url, "https://api.adjahi.org/api/v1");
    }

    #[test]
    fn test_blank_base_url_falls_back_to_default() {
        let config = ClientConfig::new("   ");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_url_joins_paths() {
        let config = ClientConfig::new("http://localhost:8000/api/v1");
        assert_eq!(
            config.url("/patients/"),
            "http://localhost:8000/api/v1/patients/"
        );
        assert_eq!(
            config.url("auth/login/"),
            "http://localhost:8000/api/v1/auth/login/"
        );
    }

    #[test]
    fn test_default_retry_count() {
        let config = ClientConfig::new(DEFAULT_API_URL);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.with_max_retries(0).max_retries, 0);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_server_log_level() {
        let config = ServerConfig {
            log_filter: Some(" debug ".to_string()),
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);

        let config = ServerConfig {
            log_filter: Some("info,adjahi_admin=debug".to_string()),
        };
        assert_eq!(config.log_level(), tracing::Level::INFO);

        let config = ServerConfig { log_filter: None };
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }
}
