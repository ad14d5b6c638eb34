//! Service adapters for SES classic operations.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          SesClient           │
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │  EmailService (this module)  │  - SendEmail parameters, signing
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │          Transport           │
//! └──────────────────────────────┘
//! ```

pub mod emails;

pub use emails::{build_send_email_params, EmailService};
