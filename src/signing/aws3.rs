//! AWS3-HTTPS signature implementation.
//!
//! The signature is an HMAC-SHA256 of the exact `Date` header value, keyed
//! with the secret access key and base64 encoded:
//!
//! ```text
//! X-Amzn-Authorization: AWS3-HTTPS AWSAccessKey=<id>, Signature=<b64>, Algorithm=HmacSHA256
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credentials::AwsCredentials;
use crate::error::SesResult;

type HmacSha256 = Hmac<Sha256>;

/// Authentication scheme name.
pub const AWS3_SCHEME: &str = "AWS3-HTTPS";

/// Signing algorithm name sent in the header.
pub const SIGNING_ALGORITHM: &str = "HmacSHA256";

/// Name of the header carrying the signature.
pub const AUTHORIZATION_HEADER: &str = "X-Amzn-Authorization";

/// A single captured instant, rendered in both formats a request needs.
///
/// Both encodings come from the same `DateTime`, so the `Timestamp` form
/// field and the signed `Date` header can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimestamp {
    instant: DateTime<Utc>,
}

impl RequestTimestamp {
    /// Capture the current time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap an existing instant.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// The captured instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// `Timestamp` form field value, e.g. `2012-01-24T12:30:45.000Z`.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use integrations_aws_ses_classic::signing::RequestTimestamp;
    ///
    /// let ts = RequestTimestamp::from_datetime(Utc.with_ymd_and_hms(2012, 1, 24, 12, 30, 45).unwrap());
    /// assert_eq!(ts.query_timestamp(), "2012-01-24T12:30:45.000Z");
    /// ```
    pub fn query_timestamp(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
    }

    /// `Date` header value, e.g. `Tue, 24 Jan 2012 12:30:45 GMT`.
    ///
    /// This is the string that gets signed.
    pub fn http_date(&self) -> String {
        self.instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }
}

/// Compute the base64 HMAC-SHA256 signature of `timestamp`.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_classic::signing::sign;
///
/// let signature = sign("secret", "Tue, 24 Jan 2012 12:30:45 GMT");
/// assert_eq!(signature.len(), 44);
/// ```
pub fn sign(secret_key: &str, timestamp: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());

    STANDARD
        .encode(mac.finalize().into_bytes())
        .trim_end()
        .to_string()
}

/// Build the `X-Amzn-Authorization` header value.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_classic::signing::authorization_header;
///
/// let header = authorization_header("access", "secret", "Tue, 24 Jan 2012 12:30:45 GMT");
/// assert!(header.starts_with("AWS3-HTTPS AWSAccessKey=access, Signature="));
/// assert!(header.ends_with(", Algorithm=HmacSHA256"));
/// ```
pub fn authorization_header(access_key: &str, secret_key: &str, timestamp: &str) -> String {
    format!(
        "{} AWSAccessKey={}, Signature={}, Algorithm={}",
        AWS3_SCHEME,
        access_key,
        sign(secret_key, timestamp),
        SIGNING_ALGORITHM
    )
}

/// Verify `credentials` and build the header for `timestamp`.
///
/// # Errors
///
/// Returns [`SesError::Configuration`](crate::error::SesError::Configuration)
/// if either key is empty.
pub fn sign_credentials(
    credentials: &AwsCredentials,
    timestamp: &RequestTimestamp,
) -> SesResult<String> {
    credentials.verify()?;

    Ok(authorization_header(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        &timestamp.http_date(),
    ))
}
