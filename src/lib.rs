//! # svf-print
//!
//! Client for SVF Cloud print jobs. Given the result location of a submitted job it
//! downloads the rendered artifact (e.g. a PDF), fetches the artifact metadata and
//! looks up the job's print status.
//!
//! ## Design
//!
//! - **Sequential** - one request at a time, no background tasks
//! - **Typed failures** - every step returns [`Result`]; the caller decides whether to
//!   go on (see [`job::run_job`])
//! - **Injected endpoints** - the API endpoint and paths come from [`Config`], so the
//!   client can be pointed at a mock server
//!
//! ## Quick Start
//!
//! ```no_run
//! use svf_print::{AccessToken, Config, Location, SvfClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SvfClient::new(Config::default())?;
//!     let token = AccessToken::new("77eb1e8fe5f0a0be");
//!     let location = Location::new("https://api.svfcloud.com/v1/artifacts/1?action=77");
//!
//!     let outcome = client.download(&token, &location, "order.pdf").await?;
//!     println!("{} bytes written to {}", outcome.bytes, outcome.path.display());
//!
//!     let info = client.retrieve_artifact_info(&token, &location).await?;
//!     println!("{}", info);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Artifact metadata retrieval
pub mod artifact;
/// Command-line front end
pub mod cli;
/// Authenticated HTTP client
pub mod client;
/// Configuration types
pub mod config;
/// Artifact download
pub mod download;
/// Error types
pub mod error;
/// Print job workflow
pub mod job;
/// Result location parsing
pub mod location;
/// Print status lookup
pub mod status;
/// Print job submission
pub mod submit;
/// Core types
pub mod types;

// Re-export commonly used types
pub use client::SvfClient;
pub use config::{ApiConfig, Config, HttpConfig};
pub use error::{Error, Result, ToExitCode};
pub use job::{JobParams, JobReport, run_job};
pub use status::{StatusFetcher, status_url};
pub use submit::{PresetLocation, Submitter, Unconfigured};
pub use types::{
    Accept, AccessToken, ActionId, ArtifactInfo, DownloadOutcome, Location, PrintRequest,
    PrintStatus,
};
