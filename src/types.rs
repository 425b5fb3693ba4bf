//! Core types for svf-print

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Bearer token sent with every request
///
/// The token is opaque and passed through unchanged. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Server-issued URL identifying a print job's result
///
/// Carries the job's action identifier in its `action` query parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Wrap a location string without validating it
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The location as given by the server
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the location as an absolute URL
    pub fn to_url(&self) -> Result<Url> {
        Url::parse(&self.0).map_err(|e| Error::malformed(&self.0, e.to_string()))
    }

    /// The `action` query parameter
    pub fn action_id(&self) -> Result<ActionId> {
        crate::location::action_id(&self.0)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Location {
    fn from(location: String) -> Self {
        Self(location)
    }
}

impl From<&str> for Location {
    fn from(location: &str) -> Self {
        Self(location.to_string())
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}

/// Identifier of a print action, taken from a [`Location`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    /// The identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Artifact metadata as returned by the server
///
/// The JSON body is kept verbatim; [`ArtifactInfo::json`] parses it on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactInfo(pub String);

impl ArtifactInfo {
    /// The raw body
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First line of the body, without its line terminator
    pub fn first_line(&self) -> &str {
        self.0.lines().next().unwrap_or("")
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.0)?)
    }

    /// Take the raw body
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ArtifactInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Print job status as returned by the actions endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrintStatus(pub String);

impl PrintStatus {
    /// The raw body
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

impl std::fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to print: handed to a [`Submitter`](crate::Submitter)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRequest {
    /// Output device, e.g. "PDF" or "Excel"
    pub printer_id: String,
    /// Form template path, e.g. "form/Test/sample_ja.xml"
    pub form_file_path: PathBuf,
    /// Data file path (CSV)
    pub data_file_path: PathBuf,
    /// Optional resource file (images and the like)
    #[serde(default)]
    pub resource_file_path: Option<PathBuf>,
}

/// Accepted response representation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accept {
    /// `application/octet-stream`, for artifact downloads
    OctetStream,
    /// `application/json`, for metadata and status
    Json,
}

impl Accept {
    /// The media type sent in the `Accept` header
    pub fn as_str(&self) -> &'static str {
        match self {
            Accept::OctetStream => "application/octet-stream",
            Accept::Json => "application/json",
        }
    }
}

/// Result of a completed download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Where the artifact was written
    pub path: PathBuf,
    /// Number of body bytes written
    pub bytes: u64,
    /// Number of `303 See Other` hops followed
    pub redirects: u32,
    /// URL the body was finally read from
    pub final_url: Url,
}
