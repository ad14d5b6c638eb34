//! Types for AWS SES classic operations.
//!
//! This module provides the message model sent through `SendEmail` and the
//! typed result returned on success.

mod email;
mod responses;

pub use email::*;
pub use responses::*;
