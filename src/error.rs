//! Error types for svf-print
//!
//! Every fallible operation in the crate returns [`Result`]. Each variant carries the
//! context needed to report the failure (URL, status line, path) and maps to a process
//! exit code through [`ToExitCode`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for svf-print operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for svf-print
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, DNS, TLS or body-transfer failure reported by the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A location string that cannot be used (not a URL, no query, no `action`, ...)
    #[error("malformed URL '{location}': {reason}")]
    MalformedUrl {
        /// The offending location or URL
        location: String,
        /// What is wrong with it
        reason: String,
    },

    /// The server answered with a status other than the ones the operation accepts
    #[error("HTTP {code} {message} from '{url}'")]
    HttpStatus {
        /// URL of the request that failed
        url: String,
        /// Numeric status code
        code: u16,
        /// Reason phrase for the status (empty when unknown)
        message: String,
    },

    /// The download kept answering 303 past the configured limit
    #[error("too many redirects (limit {limit}), last location '{url}'")]
    RedirectLoop {
        /// Maximum number of redirects that were allowed
        limit: u32,
        /// The redirect target that would have exceeded the limit, or the redirecting
        /// URL when that 303 carried no usable `Location`
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The destination path cannot receive a download
    #[error("invalid destination {path}: {reason}")]
    InvalidDestination {
        /// The rejected path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api.endpoint")
        key: Option<String>,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The print job could not be submitted
    #[error("submission failed: {0}")]
    Submission(String),
}

impl Error {
    /// Build a [`Error::MalformedUrl`]
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedUrl {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`Error::Config`] for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// The `[<code>][<message>]` line printed for rejected requests.
    ///
    /// Returns `None` for every variant other than [`Error::HttpStatus`].
    pub fn status_line(&self) -> Option<String> {
        match self {
            Error::HttpStatus { code, message, .. } => Some(format!("[{}][{}]", code, message)),
            _ => None,
        }
    }
}

/// Map errors to process exit codes
///
/// Code 0 is reserved for success and 2 matches the usage-error code `clap` uses.
pub trait ToExitCode {
    /// Get the process exit code for this error
    fn exit_code(&self) -> u8;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> u8 {
        match self {
            Error::Serialization(_) => 1,
            Error::Config { .. } => 2,
            Error::Network(_) => 3,
            Error::MalformedUrl { .. } => 4,
            Error::HttpStatus { .. } => 5,
            Error::RedirectLoop { .. } => 6,
            Error::Io(_) | Error::InvalidDestination { .. } => 7,
            Error::Submission(_) => 8,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Network(_) => "network_error",
            Error::MalformedUrl { .. } => "malformed_url",
            Error::HttpStatus { .. } => "http_status",
            Error::RedirectLoop { .. } => "redirect_loop",
            Error::Io(_) => "io_error",
            Error::InvalidDestination { .. } => "invalid_destination",
            Error::Config { .. } => "config_error",
            Error::Serialization(_) => "serialization_error",
            Error::Submission(_) => "submission_error",
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> Error {
        Error::HttpStatus {
            url: "https://x/y?action=1".to_string(),
            code: 404,
            message: "Not Found".to_string(),
        }
    }

    #[test]
    fn test_status_line_for_http_status() {
        assert_eq!(not_found().status_line().as_deref(), Some("[404][Not Found]"));
        assert_eq!(Error::Submission("x".into()).status_line(), None);
    }

    #[test]
    fn test_display_includes_context() {
        let msg = not_found().to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://x/y?action=1"));

        let msg = Error::malformed("no-query", "missing '?'").to_string();
        assert_eq!(msg, "malformed URL 'no-query': missing '?'");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_failure_class() {
        let errors = [
            Error::config("api.endpoint", "bad"),
            Error::malformed("x", "y"),
            not_found(),
            Error::RedirectLoop {
                limit: 5,
                url: "http://a".into(),
            },
            Error::Io(std::io::Error::other("disk")),
            Error::Submission("none".into()),
        ];
        let mut codes: Vec<u8> = errors.iter().map(|e| e.exit_code()).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(not_found().error_code(), "http_status");
        assert_eq!(
            Error::InvalidDestination {
                path: PathBuf::from("/"),
                reason: "no file name".into()
            }
            .error_code(),
            "invalid_destination"
        );
        let err = Error::config("http.buffer_size", "must be positive");
        assert_eq!(err.exit_code(), 2);
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("http.buffer_size")),
            _ => panic!("expected Config"),
        }
    }
}
