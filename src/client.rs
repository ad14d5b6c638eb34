//! SES client implementation.
//!
//! `SesClient` is the entry point: it owns the configuration and a transport
//! and exposes the email service through [`SesClient::emails`].
//!
//! # Example
//!
//! ```rust,no_run
//! use integrations_aws_ses_classic::{EmailBuilder, SesClient, SesConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SesConfig::builder()
//!     .credentials("AKID", "SECRET")
//!     .build()?;
//! let client = SesClient::new(config)?;
//!
//! let message = EmailBuilder::new()
//!     .from("sender@example.com")
//!     .to("recipient@example.com")
//!     .subject("Hello")
//!     .text("Email body")
//!     .build()?;
//!
//! let message_id = client.send(&message).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::SesConfig;
use crate::error::{SesError, SesResult};
use crate::http::{ReqwestTransport, Transport};
use crate::services::EmailService;
use crate::types::{Message, SendEmailResponse};

/// Main client for the SES classic API.
///
/// # Thread Safety
///
/// `SesClient` is `Send + Sync`. Cloning is cheap; clones share the
/// configuration and the underlying HTTP client.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_aws_ses_classic::SesClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SesClient::from_env()?;
///
/// let client_clone = client.clone();
/// tokio::spawn(async move {
///     // Use client_clone...
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SesClient {
    config: Arc<SesConfig>,
    emails: EmailService,
}

impl SesClient {
    /// Create a client that talks to SES over reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: SesConfig, transport: Arc<dyn Transport>) -> Self {
        let config = Arc::new(config);
        let emails = EmailService::new(Arc::clone(&config), transport);
        Self { config, emails }
    }

    /// Create a client configured from environment variables.
    ///
    /// See [`SesConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] if a required variable is missing.
    pub fn from_env() -> SesResult<Self> {
        let config = SesConfig::from_env()?;
        Self::new(config)
    }

    /// Create a new client builder.
    pub fn builder() -> SesClientBuilder {
        SesClientBuilder::new()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    /// Access the email service.
    pub fn emails(&self) -> &EmailService {
        &self.emails
    }

    /// Send a message and return its SES message ID.
    ///
    /// Shorthand for `client.emails().send(message)`.
    pub async fn send(&self, message: &Message) -> SesResult<String> {
        self.emails.send(message).await
    }

    /// Send a message and return the full SES result.
    pub async fn send_email(&self, message: &Message) -> SesResult<SendEmailResponse> {
        self.emails.send_email(message).await
    }
}

impl std::fmt::Debug for SesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for creating SES clients.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_aws_ses_classic::{SesClient, SesConfig};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SesConfig::builder()
///     .credentials("AKID", "SECRET")
///     .build()?;
///
/// let client = SesClient::builder().config(config).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SesClientBuilder {
    config: Option<SesConfig>,
    from_env: bool,
    transport: Option<Arc<dyn Transport>>,
}

impl SesClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: SesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables when none was given.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Use a custom transport instead of reqwest.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] if no configuration was provided
    /// or the environment is incomplete, and [`SesError::Transport`] if the
    /// HTTP client cannot be built.
    pub fn build(self) -> SesResult<SesClient> {
        let config = if let Some(config) = self.config {
            config
        } else if self.from_env {
            SesConfig::from_env()?
        } else {
            return Err(SesError::configuration(
                "No configuration provided. Use config() or from_env()",
            ));
        };

        match self.transport {
            Some(transport) => Ok(SesClient::with_transport(config, transport)),
            None => SesClient::new(config),
        }
    }
}
