//! Print job submission seam
//!
//! Submitting a job (uploading form, data and resources) is done by the SVF print
//! service client, which is not part of this crate. A [`Submitter`] turns a
//! [`PrintRequest`] into the [`Location`] of the job's result.

use crate::error::{Error, Result};
use crate::types::{AccessToken, Location, PrintRequest};
use async_trait::async_trait;

/// Something that can submit a print job
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit `request` and return the location of its result
    async fn submit(&self, token: &AccessToken, request: &PrintRequest) -> Result<Location>;
}

/// Submitter for jobs that were already submitted elsewhere
///
/// Returns the configured location for any request.
#[derive(Clone, Debug)]
pub struct PresetLocation(pub Location);

#[async_trait]
impl Submitter for PresetLocation {
    async fn submit(&self, _token: &AccessToken, request: &PrintRequest) -> Result<Location> {
        tracing::info!(
            printer = %request.printer_id,
            form = %request.form_file_path.display(),
            location = %self.0,
            "using preset result location"
        );
        Ok(self.0.clone())
    }
}

/// Submitter used when no submission backend is configured
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

#[async_trait]
impl Submitter for Unconfigured {
    async fn submit(&self, _token: &AccessToken, _request: &PrintRequest) -> Result<Location> {
        Err(Error::Submission(
            "no submission backend configured; pass the result location with --location"
                .to_string(),
        ))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PrintRequest {
        PrintRequest {
            printer_id: "PDF".to_string(),
            form_file_path: "form/Test/sample_ja.xml".into(),
            data_file_path: "/WebAPISample/sample_ja.csv".into(),
            resource_file_path: None,
        }
    }

    #[tokio::test]
    async fn test_preset_location() {
        let submitter = PresetLocation(Location::from("https://x/y?action=77"));
        let location = submitter
            .submit(&AccessToken::new("tok123"), &request())
            .await
            .unwrap();
        assert_eq!(location.as_str(), "https://x/y?action=77");
    }

    #[tokio::test]
    async fn test_unconfigured_fails_with_submission_error() {
        let err = Unconfigured
            .submit(&AccessToken::new("tok123"), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Submission(_)));
    }
}
