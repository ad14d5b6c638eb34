//! Errors raised while assembling an [`SesConfig`](super::SesConfig).

use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required configuration field was never set.
    #[error("Missing required configuration: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// The endpoint is not an absolute http(s) URL.
    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint {
        /// The rejected endpoint.
        endpoint: String,
        /// Why it was rejected.
        message: String,
    },

    /// A required environment variable is not set.
    #[error("Environment variable {variable} is not set")]
    Environment {
        /// Name of the variable.
        variable: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::InvalidEndpoint {
            endpoint: "ftp://example.com".to_string(),
            message: "unsupported scheme ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid endpoint 'ftp://example.com': unsupported scheme ftp"
        );

        let err = ConfigError::Environment {
            variable: "AWS_ACCESS_KEY_ID".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Environment variable AWS_ACCESS_KEY_ID is not set"
        );
    }
}
