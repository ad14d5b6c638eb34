//! Response types for SES classic API operations.

use serde::{Deserialize, Serialize};

/// Response from sending an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    /// Message ID assigned by SES (`SendEmailResult/MessageId`).
    pub message_id: String,
    /// Request ID for support cases (`ResponseMetadata/RequestId`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}
