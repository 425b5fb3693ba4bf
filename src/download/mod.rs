//! Artifact download with bounded `303 See Other` following.
//!
//! The body is streamed into a hidden sibling file (`.<name>.part`) and renamed over
//! the destination once the transfer is complete, so a failed download never leaves a
//! truncated artifact behind and never clobbers an existing one.

use crate::client::{SvfClient, status_error};
use crate::error::{Error, Result};
use crate::types::{Accept, AccessToken, DownloadOutcome, Location};
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use url::Url;


impl SvfClient {
    /// Download the artifact at `location` into `destination`
    ///
    /// Requests `application/octet-stream` with bearer authentication.
    ///
    /// - `200 OK`: the body is streamed to disk; an existing file is replaced.
    /// - `303 See Other`: the `Location` header (absolute or relative) is requested
    ///   next, up to `http.max_redirects` times.
    /// - anything else: [`Error::HttpStatus`], nothing is written.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDestination`] if `destination` has no file name or is a directory
    /// - [`Error::MalformedUrl`] for an unparsable location or redirect target
    /// - [`Error::RedirectLoop`] once the redirect limit is exceeded
    /// - [`Error::Network`] / [`Error::Io`] for transfer and file-system failures
    pub async fn download(
        &self,
        token: &AccessToken,
        location: &Location,
        destination: impl AsRef<Path>,
    ) -> Result<DownloadOutcome> {
        let destination = destination.as_ref();
        let partial = partial_path(destination)?;
        if fs::metadata(destination)
            .await
            .is_ok_and(|metadata| metadata.is_dir())
        {
            return Err(Error::InvalidDestination {
                path: destination.to_path_buf(),
                reason: "is a directory".to_string(),
            });
        }

        let max_redirects = self.config().http.max_redirects;
        let mut url = location.to_url()?;
        let mut redirects = 0;

        loop {
            let response = self.get(&url, Accept::OctetStream, token).await?;
            match response.status() {
                StatusCode::OK => {
                    let bytes = self.write_body(response, destination, &partial).await?;
                    tracing::info!(
                        url = %url,
                        path = %destination.display(),
                        bytes,
                        redirects,
                        "download complete"
                    );
                    return Ok(DownloadOutcome {
                        path: destination.to_path_buf(),
                        bytes,
                        redirects,
                        final_url: url,
                    });
                }
                StatusCode::SEE_OTHER => {
                    if redirects >= max_redirects {
                        // Report the target when there is one, otherwise the URL that redirected
                        let last = redirect_target(&url, &response)
                            .map(String::from)
                            .unwrap_or_else(|_| url.to_string());
                        tracing::warn!(url = %last, limit = max_redirects, "redirect limit reached");
                        return Err(Error::RedirectLoop {
                            limit: max_redirects,
                            url: last,
                        });
                    }
                    let next = redirect_target(&url, &response)?;
                    drop(response);
                    redirects += 1;
                    tracing::debug!(from = %url, to = %next, redirects, "following 303 See Other");
                    url = next;
                }
                status => {
                    tracing::warn!(url = %url, status = %status, "download rejected");
                    return Err(status_error(&url, status));
                }
            }
        }
    }

    /// Stream `response` into `partial`, then move it over `destination`
    async fn write_body(
        &self,
        response: Response,
        destination: &Path,
        partial: &Path,
    ) -> Result<u64> {
        let result = match stream_to_file(response, partial, self.config().http.buffer_size).await
        {
            Ok(bytes) => fs::rename(partial, destination)
                .await
                .map(|()| bytes)
                .map_err(Error::from),
            Err(e) => Err(e),
        };
        if result.is_err() {
            remove_partial(partial).await;
        }
        result
    }
}

async fn stream_to_file(mut response: Response, path: &Path, buffer_size: usize) -> Result<u64> {
    let file = fs::File::create(path).await?;
    let mut writer = BufWriter::with_capacity(buffer_size, file);
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    writer.into_inner().sync_all().await?;
    Ok(written)
}

async fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await
        && e.kind() != io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove partial download");
    }
}

/// Resolve the `Location` header of a 303 against the URL that produced it
fn redirect_target(current: &Url, response: &Response) -> Result<Url> {
    let value = response
        .headers()
        .get(LOCATION)
        .ok_or_else(|| Error::malformed(current.as_str(), "303 See Other without a Location header"))?
        .to_str()
        .map_err(|_| Error::malformed(current.as_str(), "Location header is not valid text"))?;
    current
        .join(value)
        .map_err(|e| Error::malformed(value, e.to_string()))
}

/// `dir/name` -> `dir/.name.part`
fn partial_path(destination: &Path) -> Result<PathBuf> {
    let name = destination
        .file_name()
        .ok_or_else(|| Error::InvalidDestination {
            path: destination.to_path_buf(),
            reason: "path has no file name".to_string(),
        })?;
    let mut partial = OsString::from(".");
    partial.push(name);
    partial.push(".part");
    Ok(destination.with_file_name(partial))
}
