//! Signed form requests for the SES query API.

use url::form_urlencoded;

/// Content type of every SES query request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully signed SES query request, ready to be handed to a
/// [`Transport`](super::Transport).
///
/// Parameters keep their insertion order so the encoded body is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Path relative to the configured endpoint (usually `/`).
    pub path: String,

    /// Ordered form parameters.
    pub params: Vec<(String, String)>,

    /// Value of the `X-Amzn-Authorization` header.
    pub authorization: String,

    /// Value of the `Date` header; the string that was signed.
    pub date: String,
}

impl SignedRequest {
    /// Create a request for `path` with the given parameters and signature.
    pub fn new(
        path: impl Into<String>,
        params: Vec<(String, String)>,
        authorization: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            params,
            authorization: authorization.into(),
            date: date.into(),
        }
    }

    /// Encode the parameters as an `application/x-www-form-urlencoded` body.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::http::SignedRequest;
    ///
    /// let request = SignedRequest::new(
    ///     "/",
    ///     vec![
    ///         ("Action".to_string(), "SendEmail".to_string()),
    ///         ("Source".to_string(), "Jane <jane@example.com>".to_string()),
    ///     ],
    ///     "AWS3-HTTPS ...",
    ///     "Tue, 24 Jan 2012 12:30:45 GMT",
    /// );
    ///
    /// assert_eq!(
    ///     request.form_body(),
    ///     "Action=SendEmail&Source=Jane+%3Cjane%40example.com%3E"
    /// );
    /// ```
    pub fn form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Look up the first parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
