//! HTTP plumbing for the SES query API.
//!
//! - **Request**: [`SignedRequest`] carries the ordered form parameters and
//!   the two signing headers.
//! - **Transport**: [`Transport`] delivers a request; [`ReqwestTransport`] is
//!   the default.
//! - **Response**: [`SesResponse`] is the raw status and body, interpreted
//!   later by [`interpret_response`](crate::error::interpret_response).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  EmailService   │  - Validation, parameters, signing
//! └────────┬────────┘
//!          │ SignedRequest
//!          ▼
//! ┌─────────────────┐
//! │   Transport     │  - HTTP transport abstraction
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   reqwest       │  - Actual HTTP implementation
//! └─────────────────┘
//! ```

mod request;
mod response;
mod transport;

pub use request::{SignedRequest, FORM_CONTENT_TYPE};
pub use response::SesResponse;
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::MockTransport;
