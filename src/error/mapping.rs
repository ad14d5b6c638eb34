//! Mapping of SES responses to results.
//!
//! - `200` with a `SendEmailResponse` root: the nested message ID, or
//!   [`SesError::Protocol`] if it is absent
//! - any other status with an `ErrorResponse` root carrying `Error/Message`:
//!   [`SesError::Delivery`]
//! - everything else: [`SesError::Protocol`] carrying the raw body

use super::{SesError, SesResult};
use crate::types::SendEmailResponse;
use crate::xml::{parse_response, ResponseDocument};
use http::StatusCode;

/// Prefix of every [`SesError::Delivery`] message.
pub const DELIVERY_FAILURE_PREFIX: &str = "Failed to send the Email: ";

/// Interpret an SES `SendEmail` response.
///
/// # Arguments
///
/// * `status` - The HTTP status code
/// * `body` - The raw response body
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use integrations_aws_ses_classic::error::{interpret_response, SesError};
///
/// let body = "<ErrorResponse><Error><Message>Something went wrong</Message></Error></ErrorResponse>";
/// let err = interpret_response(StatusCode::BAD_REQUEST, body).unwrap_err();
///
/// assert!(matches!(err, SesError::Delivery { .. }));
/// assert_eq!(err.to_string(), "Failed to send the Email: Something went wrong");
/// ```
pub fn interpret_response(status: StatusCode, body: &str) -> SesResult<SendEmailResponse> {
    let document = match parse_response(body) {
        Ok(document) => document,
        Err(_) => return Err(protocol_error(body)),
    };

    match document {
        ResponseDocument::SendEmail {
            message_id: Some(message_id),
            request_id,
        } if status == StatusCode::OK => Ok(SendEmailResponse {
            message_id,
            request_id,
        }),
        ResponseDocument::Error {
            code,
            message: Some(message),
            request_id,
        } if status != StatusCode::OK => Err(SesError::Delivery {
            message: format!("{}{}", DELIVERY_FAILURE_PREFIX, message),
            code,
            request_id,
        }),
        _ => Err(protocol_error(body)),
    }
}

fn protocol_error(body: &str) -> SesError {
    SesError::Protocol {
        message: format!("Failed to extract the message ID, raw response: {}", body),
        body: body.to_string(),
    }
}
