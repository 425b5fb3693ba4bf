//! Print status lookup
//!
//! The status of a job lives at `<endpoint>/<actions_path>/<actionId>`, where the
//! action id comes from the job's result [`Location`](crate::Location).

use crate::client::SvfClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Accept, AccessToken, ActionId, PrintStatus};
use async_trait::async_trait;
use url::Url;

/// Something that can report the status of a print action
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetch the status document at `status_url`
    async fn fetch_status(&self, token: &AccessToken, status_url: &Url) -> Result<PrintStatus>;
}

#[async_trait]
impl StatusFetcher for SvfClient {
    async fn fetch_status(&self, token: &AccessToken, status_url: &Url) -> Result<PrintStatus> {
        let body = self.get_text(status_url, Accept::Json, token).await?;
        tracing::debug!(url = %status_url, "print status received");
        Ok(PrintStatus(body))
    }
}

/// Build the status URL for `action_id`
///
/// With the default configuration this is
/// `https://api.svfcloud.com/v1/actions/<action_id>`. The action id always forms a
/// single path segment. Escapes already present in the id (it is taken undecoded from
/// the location) are kept as they are, so `a%2Fb` stays `a%2Fb`.
pub fn status_url(config: &Config, action_id: &ActionId) -> Result<Url> {
    let mut url = config.endpoint_url()?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::config("api.endpoint", "endpoint cannot be a base URL"))?;
        segments
            .pop_if_empty()
            .extend(config.api.actions_path.split('/').filter(|s| !s.is_empty()));
    }
    // set_path escapes spaces, '?' and '#' but leaves '%' alone
    let segment = action_id.as_str().replace('/', "%2F").replace('\\', "%5C");
    let path = format!("{}/{}", url.path().trim_end_matches('/'), segment);
    url.set_path(&path);
    Ok(url)
}
