//! Configuration types for svf-print

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use url::Url;

/// SVF Cloud API location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API endpoint (default: "https://api.svfcloud.com/")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Path below the endpoint where actions live (default: "v1/actions")
    #[serde(default = "default_actions_path")]
    pub actions_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            actions_path: default_actions_path(),
        }
    }
}

/// HTTP client behavior (timeouts, redirects, transfer buffer)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout (default: 60 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Connection establishment timeout (default: 10 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Maximum number of `303 See Other` hops a download follows (default: 5)
    ///
    /// One more redirect than this fails with [`Error::RedirectLoop`].
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Write buffer used while streaming a download to disk (default: 8192 bytes)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_redirects: default_max_redirects(),
            buffer_size: default_buffer_size(),
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for [`SvfClient`](crate::SvfClient)
///
/// Every field has a default, so an empty JSON object is a valid configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API location
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_slice(&bytes)?;
        Ok(config)
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        if self.http.buffer_size == 0 {
            return Err(Error::config(
                "http.buffer_size",
                "buffer size must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The API endpoint as a parsed http(s) URL
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api.endpoint).map_err(|e| {
            Error::config(
                "api.endpoint",
                format!("invalid endpoint '{}': {}", self.api.endpoint, e),
            )
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::config(
                "api.endpoint",
                format!(
                    "URL scheme '{}' is not allowed; only http and https are supported",
                    scheme
                ),
            )),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.svfcloud.com/".to_string()
}

fn default_actions_path() -> String {
    "v1/actions".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_redirects() -> u32 {
    5
}

fn default_buffer_size() -> usize {
    8192
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

// Durations are stored as whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "https://api.svfcloud.com/");
        assert_eq!(config.api.actions_path, "v1/actions");
        assert_eq!(config.http.max_redirects, 5);
        assert_eq!(config.http.buffer_size, 8192);
        assert_eq!(config.http.timeout, Duration::from_secs(60));
        assert!(config.http.user_agent.starts_with("svf-print/"));
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_json_overrides_only_given_fields() {
        let config: Config = serde_json::from_str(
            r#"{"api": {"endpoint": "http://localhost:8080"}, "http": {"timeout": 5, "max_redirects": 1}}"#,
        )
        .unwrap();
        assert_eq!(config.api.endpoint, "http://localhost:8080");
        assert_eq!(config.api.actions_path, "v1/actions");
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert_eq!(config.http.max_redirects, 1);
        assert_eq!(config.http.buffer_size, 8192);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("svf.json");
        std::fs::write(&path, r#"{"http": {"buffer_size": 1024}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.http.buffer_size, 1024);
    }

    #[test]
    fn test_from_missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::from_file(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Config { key: None, .. }));
    }

    #[test]
    fn test_from_invalid_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("svf.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "ftp://api.svfcloud.com/".to_string();
        match config.validate().unwrap_err() {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("api.endpoint")),
            e => panic!("expected Config error, got {e:?}"),
        }

        config.api.endpoint = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let mut config = Config::default();
        config.http.buffer_size = 0;
        match config.validate().unwrap_err() {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("http.buffer_size")),
            e => panic!("expected Config error, got {e:?}"),
        }
    }
}
