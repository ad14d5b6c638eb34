//! Builders for constructing SES messages.
//!
//! # Examples
//!
//! ```rust
//! use integrations_aws_ses_classic::builders::EmailBuilder;
//!
//! let message = EmailBuilder::new()
//!     .from("sender@example.com")
//!     .to("recipient@example.com")
//!     .subject("Hello World")
//!     .text("This is a plain text email")
//!     .build()?;
//! # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
//! ```

mod email_builder;

pub use email_builder::EmailBuilder;

use crate::error::SesError;
use thiserror::Error;

/// Error type for builder operations.
///
/// Returned when `build()` is called on a builder in an invalid state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A required field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A field has an invalid value.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue {
        /// The name of the field with the invalid value.
        field: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl BuilderError {
    /// Create a new missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::InvalidValue { field, .. } => field,
        }
    }
}

impl From<BuilderError> for SesError {
    fn from(err: BuilderError) -> Self {
        SesError::validation(err.field().to_string(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_error_display() {
        let error = BuilderError::missing_field("to");
        assert_eq!(error.to_string(), "Missing required field: to");

        let error = BuilderError::invalid_value("to", "not an address list");
        assert_eq!(
            error.to_string(),
            "Invalid value for field 'to': not an address list"
        );
    }

    #[test]
    fn test_into_validation_error() {
        let err: SesError = BuilderError::missing_field("to").into();
        match err {
            SesError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("to"));
                assert_eq!(message, "Missing required field: to");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
