//! Authenticated HTTP access to SVF Cloud

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Accept, AccessToken};
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::{Response, StatusCode};
use url::Url;

/// HTTP client for SVF Cloud locations and endpoints
///
/// Automatic redirects are disabled: the downloader follows `303 See Other` itself
/// with a bounded counter, and every other operation treats a redirect as an error.
#[derive(Clone, Debug)]
pub struct SvfClient {
    http: reqwest::Client,
    config: Config,
}

impl SvfClient {
    /// Create a client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(config.http.timeout)
            .connect_timeout(config.http.connect_timeout)
            .user_agent(config.http.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue `GET url` with the given `Accept` type and bearer authentication
    ///
    /// The returned response has not been checked for its status.
    pub(crate) async fn get(
        &self,
        url: &Url,
        accept: Accept,
        token: &AccessToken,
    ) -> Result<Response> {
        tracing::debug!(url = %url, accept = accept.as_str(), "GET");
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, accept.as_str())
            .bearer_auth(token.as_str())
            .send()
            .await?;
        tracing::debug!(url = %url, status = %response.status(), "response");
        Ok(response)
    }

    /// `GET url` expecting `200 OK`, returning the whole body as text
    pub(crate) async fn get_text(
        &self,
        url: &Url,
        accept: Accept,
        token: &AccessToken,
    ) -> Result<String> {
        let response = self.get(url, accept, token).await?;
        if response.status() != StatusCode::OK {
            return Err(status_error(url, response.status()));
        }
        Ok(response.text().await?)
    }
}

/// Build the error for a response the caller cannot use
///
/// The message is the standard reason phrase for the code. Codes without one
/// (e.g. 599) use the numeric code as their message.
pub(crate) fn status_error(url: &Url, status: StatusCode) -> Error {
    let message = match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_str().to_string(),
    };
    Error::HttpStatus {
        url: url.to_string(),
        code: status.as_u16(),
        message,
    }
}
