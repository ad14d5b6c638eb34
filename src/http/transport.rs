//! Transport layer abstraction for HTTP communication.
//!
//! The default implementation uses reqwest. Tests substitute a mock or point
//! the reqwest transport at a local server.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, DATE};
use reqwest::Client;
use tracing::trace;

use crate::config::SesConfig;
use crate::error::{SesError, SesResult};
use crate::signing::AUTHORIZATION_HEADER;

use super::request::{SignedRequest, FORM_CONTENT_TYPE};
use super::response::SesResponse;

/// Trait for HTTP transport implementations.
///
/// A transport delivers one signed request and returns whatever SES answered,
/// without interpreting it. Implementations must be safe to share between
/// concurrent sends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a signed request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Transport`] or [`SesError::Timeout`] if no
    /// response could be obtained.
    async fn send(&self, request: SignedRequest) -> SesResult<SesResponse>;
}

/// Reqwest-based HTTP transport.
///
/// Posts the form body to the configured endpoint with the `Date` and
/// `X-Amzn-Authorization` headers attached.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: SesConfig,
}

impl ReqwestTransport {
    /// Create a transport using the timeouts and user agent from `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::config::SesConfig;
    /// use integrations_aws_ses_classic::http::ReqwestTransport;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = SesConfig::builder()
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    ///
    /// let transport = ReqwestTransport::new(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &SesConfig) -> SesResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(|e| SesError::Transport {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Get a reference to the underlying reqwest client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: SignedRequest) -> SesResult<SesResponse> {
        let url = self.config.url_for(&request.path);
        trace!(url = %url, "Posting SES request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION_HEADER, &request.authorization)
            .header(DATE, &request.date)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.form_body())
            .send()
            .await?;

        SesResponse::from_reqwest(response).await
    }
}
