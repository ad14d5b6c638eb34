//! Raw HTTP responses from SES.

use http::StatusCode;

use crate::error::{SesError, SesResult};

/// The status and body of an SES reply, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SesResponse {
    /// HTTP status code.
    pub status: StatusCode,

    /// Response body decoded as UTF-8 (lossily).
    pub body: String,
}

impl SesResponse {
    /// Create a new response.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::http::SesResponse;
    /// use http::StatusCode;
    ///
    /// let response = SesResponse::new(StatusCode::OK, "<SendEmailResponse/>");
    /// assert!(response.is_success());
    /// ```
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Read status and body from a reqwest response.
    pub async fn from_reqwest(response: reqwest::Response) -> SesResult<Self> {
        let status = response.status();

        let bytes = response.bytes().await.map_err(|e| SesError::Transport {
            message: format!("Failed to read response body: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self::new(status, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Whether SES answered `200 OK`.
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}
