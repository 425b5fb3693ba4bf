//! End-to-end print job workflow
//!
//! Submit -> download -> artifact info -> status. Submission failure aborts the job;
//! every later step runs regardless of earlier failures and reports its own result.

use crate::client::SvfClient;
use crate::error::{Error, Result};
use crate::status::{StatusFetcher, status_url};
use crate::submit::Submitter;
use crate::types::{
    AccessToken, ArtifactInfo, DownloadOutcome, Location, PrintRequest, PrintStatus,
};
use std::path::Path;
use url::Url;

/// Inputs of a print job run
pub struct JobParams<'a> {
    /// Bearer token for every request
    pub token: &'a AccessToken,
    /// What to print
    pub request: &'a PrintRequest,
    /// Where the artifact is written
    pub download_path: &'a Path,
}

/// Outcome of each step of a job that was submitted
#[derive(Debug)]
pub struct JobReport {
    /// Result location returned by the submitter
    pub location: Location,
    /// Artifact download
    pub download: Result<DownloadOutcome>,
    /// Artifact metadata
    pub artifact_info: Result<ArtifactInfo>,
    /// Status URL derived from the location, when the location carries an action id
    pub status_url: Option<Url>,
    /// Print status
    pub status: Result<PrintStatus>,
}

impl JobReport {
    /// Errors of the failed steps, in execution order
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        [
            self.download.as_ref().err(),
            self.artifact_info.as_ref().err(),
            self.status.as_ref().err(),
        ]
        .into_iter()
        .flatten()
    }

    /// The first failure, which decides the exit code
    pub fn first_error(&self) -> Option<&Error> {
        self.errors().next()
    }

    /// Whether every step succeeded
    pub fn is_success(&self) -> bool {
        self.first_error().is_none()
    }
}

/// Run a print job from submission to status
///
/// # Errors
///
/// Only a failed submission is returned as `Err`; failures of later steps are
/// recorded in the [`JobReport`].
pub async fn run_job<S, F>(
    client: &SvfClient,
    submitter: &S,
    status_fetcher: &F,
    params: JobParams<'_>,
) -> Result<JobReport>
where
    S: Submitter + ?Sized,
    F: StatusFetcher + ?Sized,
{
    let JobParams {
        token,
        request,
        download_path,
    } = params;

    let location = submitter.submit(token, request).await.inspect_err(|e| {
        tracing::error!(error = %e, printer = %request.printer_id, "print submission failed");
    })?;
    tracing::info!(location = %location, "print job submitted");

    let download = client.download(token, &location, download_path).await;
    if let Err(e) = &download {
        tracing::warn!(error = %e, path = %download_path.display(), "download failed");
    }

    let artifact_info = client.retrieve_artifact_info(token, &location).await;
    if let Err(e) = &artifact_info {
        tracing::warn!(error = %e, "artifact info retrieval failed");
    }

    let (status_url, status) = match location
        .action_id()
        .and_then(|id| status_url(client.config(), &id))
    {
        Ok(url) => {
            let status = status_fetcher.fetch_status(token, &url).await;
            (Some(url), status)
        }
        Err(e) => (None, Err(e)),
    };
    if let Err(e) = &status {
        tracing::warn!(error = %e, "print status retrieval failed");
    }

    Ok(JobReport {
        location,
        download,
        artifact_info,
        status_url,
        status,
    })
}
