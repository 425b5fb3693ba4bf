//! Artifact metadata retrieval

use crate::client::SvfClient;
use crate::error::Result;
use crate::types::{Accept, AccessToken, ArtifactInfo, Location};

impl SvfClient {
    /// Fetch the metadata of the artifact at `location`
    ///
    /// Requests `application/json`; a `200 OK` body is returned whole and unparsed.
    /// Any other status is an [`Error::HttpStatus`](crate::Error::HttpStatus).
    pub async fn retrieve_artifact_info(
        &self,
        token: &AccessToken,
        location: &Location,
    ) -> Result<ArtifactInfo> {
        let url = location.to_url()?;
        let body = self.get_text(&url, Accept::Json, token).await?;
        tracing::debug!(url = %url, len = body.len(), "artifact info received");
        Ok(ArtifactInfo(body))
    }
}
