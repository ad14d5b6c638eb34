//! Error types for the AWS SES classic integration.
//!
//! Every failure of a send surfaces to the caller as a [`SesError`]. Nothing is
//! retried and nothing is swallowed; the caller decides what to do next.
//!
//! # Error Categories
//!
//! - [`SesError::Configuration`] - missing or empty credentials, bad endpoint
//! - [`SesError::Validation`] - malformed message (empty sender, bad recipients)
//! - [`SesError::Delivery`] - SES answered with an `ErrorResponse` document
//! - [`SesError::Protocol`] - SES answered with something we cannot interpret
//! - [`SesError::Transport`] / [`SesError::Timeout`] - the HTTP call itself failed
//!
//! # Examples
//!
//! ```rust
//! use integrations_aws_ses_classic::error::SesError;
//!
//! fn describe(error: &SesError) -> &'static str {
//!     match error {
//!         SesError::Configuration { .. } => "fix the client configuration",
//!         SesError::Validation { .. } => "fix the message",
//!         SesError::Delivery { .. } => "SES rejected the message",
//!         _ => "unexpected failure",
//!     }
//! }
//! ```

mod mapping;

pub use mapping::{interpret_response, DELIVERY_FAILURE_PREFIX};

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for SES operations.
pub type SesResult<T> = Result<T, SesError>;

/// Top-level error type for the AWS SES classic integration.
#[derive(Debug, Error)]
pub enum SesError {
    /// The client is misconfigured.
    ///
    /// Raised before any network attempt when the access key or secret key
    /// is missing or empty, or when the endpoint cannot be used.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// The message failed client-side validation.
    ///
    /// Raised before any network attempt.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation error.
        message: String,
        /// Name of the offending field, if known.
        field: Option<String>,
    },

    /// SES explicitly rejected the request.
    ///
    /// The message embeds the text SES returned in `ErrorResponse/Error/Message`.
    #[error("{message}")]
    Delivery {
        /// Human-readable failure, prefixed with [`DELIVERY_FAILURE_PREFIX`].
        message: String,
        /// The SES error code (e.g. `MessageRejected`), when present.
        code: Option<String>,
        /// The SES request ID, when present.
        request_id: Option<String>,
    },

    /// SES answered with a status/body combination that could not be interpreted.
    #[error("{message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
        /// The raw response body, kept for diagnosis.
        body: String,
    },

    /// The HTTP call failed.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The HTTP call timed out.
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },
}

impl SesError {
    /// Shorthand for a [`SesError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SesError::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for a [`SesError::Validation`] error on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SesError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Returns the SES error code if this is a delivery error that carried one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::error::SesError;
    ///
    /// let error = SesError::Delivery {
    ///     message: "Failed to send the Email: Email address is not verified.".to_string(),
    ///     code: Some("MessageRejected".to_string()),
    ///     request_id: None,
    /// };
    ///
    /// assert_eq!(error.error_code(), Some("MessageRejected"));
    /// ```
    pub fn error_code(&self) -> Option<&str> {
        match self {
            SesError::Delivery { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns the SES request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SesError::Delivery { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the raw response body for protocol errors.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            SesError::Protocol { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Returns true if the failure happened before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SesError::Configuration { .. } | SesError::Validation { .. }
        )
    }
}

impl From<ConfigError> for SesError {
    fn from(err: ConfigError) -> Self {
        SesError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for SesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SesError::Timeout {
                message: err.to_string(),
            }
        } else {
            SesError::Transport {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}
