//! Configuration module for the SES classic client.
//!
//! A [`SesConfig`] is built once at startup and handed to the client, which
//! keeps it behind an `Arc` and only ever reads it. It carries:
//!
//! - The access key pair used to sign requests
//! - The API version string sent with every request
//! - The base endpoint
//! - Default sender address and display name
//! - Transport timeouts and user agent

use std::time::Duration;

use url::Url;

pub mod error;

pub use error::ConfigError;

use crate::credentials::{credentials_from_env, AwsCredentials};

/// Default SES endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://email.us-east-1.amazonaws.com";

/// Default SES query API version.
pub const DEFAULT_API_VERSION: &str = "2010-12-01";

/// Environment variable overriding the endpoint.
pub const SES_ENDPOINT: &str = "SES_ENDPOINT";

/// Environment variable holding the default sender address.
pub const SES_DEFAULT_SENDER: &str = "SES_DEFAULT_SENDER";

/// Environment variable holding the default sender display name.
pub const SES_DEFAULT_SENDER_NAME: &str = "SES_DEFAULT_SENDER_NAME";

/// Configuration for the SES client.
#[derive(Clone, Debug)]
pub struct SesConfig {
    /// Access key pair used for signing.
    pub credentials: AwsCredentials,

    /// API version sent as the `Version` parameter.
    pub version: String,

    /// Base endpoint URL.
    pub endpoint: String,

    /// Sender address used when a message does not set one.
    pub default_sender: Option<String>,

    /// Sender display name used when a message does not set one.
    pub default_sender_name: Option<String>,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,

    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl SesConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .credentials("access_key", "secret_key")
    ///     .default_sender("noreply@example.com")
    ///     .build()?;
    ///
    /// assert_eq!(config.version, "2010-12-01");
    /// # Ok::<(), integrations_aws_ses_classic::config::ConfigError>(())
    /// ```
    pub fn builder() -> SesConfigBuilder {
        SesConfigBuilder::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` (required) plus
    /// `SES_ENDPOINT`, `SES_DEFAULT_SENDER` and `SES_DEFAULT_SENDER_NAME`
    /// (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = crate::credentials::env::credentials_from_lookup(&lookup)?;
        let mut builder = Self::builder().credentials_value(credentials);

        if let Some(endpoint) = lookup(SES_ENDPOINT).filter(|v| !v.is_empty()) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(sender) = lookup(SES_DEFAULT_SENDER).filter(|v| !v.is_empty()) {
            builder = builder.default_sender(sender);
        }
        if let Some(name) = lookup(SES_DEFAULT_SENDER_NAME).filter(|v| !v.is_empty()) {
            builder = builder.default_sender_name(name);
        }

        builder.build()
    }

    /// The full URL a request for `path` is posted to.
    ///
    /// ```
    /// use integrations_aws_ses_classic::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .credentials("access_key", "secret_key")
    ///     .endpoint("http://localhost:4566/")
    ///     .build()?;
    ///
    /// assert_eq!(config.url_for("/"), "http://localhost:4566/");
    /// # Ok::<(), integrations_aws_ses_classic::config::ConfigError>(())
    /// ```
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for creating SES client configurations.
#[derive(Default)]
pub struct SesConfigBuilder {
    credentials: Option<AwsCredentials>,
    version: Option<String>,
    endpoint: Option<String>,
    default_sender: Option<String>,
    default_sender_name: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SesConfigBuilder {
    /// Set the access key pair.
    ///
    /// Empty strings are accepted here; sending will fail with a
    /// configuration error until both are non-empty.
    pub fn credentials(self, access_key: &str, secret_key: &str) -> Self {
        self.credentials_value(AwsCredentials::new(access_key, secret_key))
    }

    /// Set the credentials from an existing [`AwsCredentials`].
    pub fn credentials_value(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Read the credentials from the environment.
    pub fn credentials_from_env(self) -> Result<Self, ConfigError> {
        Ok(self.credentials_value(credentials_from_env()?))
    }

    /// Override the API version (defaults to `2010-12-01`).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// This is useful for testing against a local mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the sender address used when a message has none.
    pub fn default_sender(mut self, sender: impl Into<String>) -> Self {
        self.default_sender = Some(sender.into());
        self
    }

    /// Set the sender display name used when a message has none.
    pub fn default_sender_name(mut self, name: impl Into<String>) -> Self {
        self.default_sender_name = Some(name.into());
        self
    }

    /// Set the request timeout passed to the transport.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the connection timeout passed to the transport.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set a custom user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingField`] if credentials were never set
    /// - [`ConfigError::InvalidEndpoint`] if the endpoint is not an http(s) URL
    pub fn build(self) -> Result<SesConfig, ConfigError> {
        let credentials = self.credentials.ok_or_else(|| ConfigError::MissingField {
            field: "credentials".to_string(),
        })?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        validate_endpoint(&endpoint)?;

        Ok(SesConfig {
            credentials,
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            endpoint,
            default_sender: self.default_sender,
            default_sender_name: self.default_sender_name,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(10)),
            user_agent: self.user_agent,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {}", other))),
    }

    if url.host_str().is_none() {
        return Err(invalid("endpoint has no host".to_string()));
    }

    Ok(())
}
