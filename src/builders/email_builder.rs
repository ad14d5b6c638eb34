//! Email builder for constructing [`Message`] values.

use serde_json::Value;

use crate::builders::BuilderError;
use crate::error::SesError;
use crate::types::{ContentKind, Message, Recipients, DEFAULT_CHARSET};

/// Builder for constructing a [`Message`] with a fluent API.
///
/// The sender is optional here; when it is left out the client's configured
/// default sender is used at send time.
///
/// # Examples
///
/// ## Single recipient, HTML body
///
/// ```rust
/// use integrations_aws_ses_classic::builders::EmailBuilder;
///
/// let message = EmailBuilder::new()
///     .from("user@example.com")
///     .name("User")
///     .to("user1@example.com")
///     .subject("Example")
///     .html("<p>This is the body</p>")
///     .build()?;
///
/// assert!(message.is_html());
/// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
/// ```
///
/// ## Recipient list from loosely typed input
///
/// ```rust
/// use integrations_aws_ses_classic::builders::EmailBuilder;
/// use serde_json::json;
///
/// let result = EmailBuilder::new()
///     .from("foo@bar.com")
///     .to_value(json!(10))
///     .build();
///
/// assert!(result.is_err());
/// ```
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from: Option<String>,
    name: Option<String>,
    to: Option<Recipients>,
    to_error: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    content: ContentKind,
    charset: Option<String>,
}

impl EmailBuilder {
    /// Create a new email builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender email address.
    pub fn from(mut self, email: impl Into<String>) -> Self {
        self.from = Some(email.into());
        self
    }

    /// Set the sender display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a recipient.
    ///
    /// The first call sets a single recipient; further calls turn it into a
    /// list.
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::builders::EmailBuilder;
    /// use integrations_aws_ses_classic::types::Recipients;
    ///
    /// let message = EmailBuilder::new()
    ///     .to("a@example.com")
    ///     .to("b@example.com")
    ///     .build()?;
    ///
    /// assert_eq!(message.to, Some(Recipients::multiple(["a@example.com", "b@example.com"])));
    /// # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
    /// ```
    pub fn to(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.to = Some(match self.to.take() {
            None => Recipients::Single(email),
            Some(Recipients::Single(first)) => Recipients::Multiple(vec![first, email]),
            Some(Recipients::Multiple(mut list)) => {
                list.push(email);
                Recipients::Multiple(list)
            }
        });
        self
    }

    /// Set the recipients to an explicit list, even if it has one entry.
    pub fn to_list<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to = Some(Recipients::multiple(addresses));
        self
    }

    /// Set the recipients from a JSON value (a string or an array of strings).
    ///
    /// Any other shape makes [`build`](Self::build) fail.
    pub fn to_value(mut self, value: Value) -> Self {
        match Recipients::try_from(value) {
            Ok(recipients) => {
                self.to = Some(recipients);
                self.to_error = None;
            }
            Err(SesError::Validation { message, .. }) => self.to_error = Some(message),
            Err(other) => self.to_error = Some(other.to_string()),
        }
        self
    }

    /// Set the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set a plain text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content = ContentKind::Text;
        self
    }

    /// Set an HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content = ContentKind::Html;
        self
    }

    /// Set the character set (defaults to `UTF-8`).
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Build the message.
    ///
    /// # Errors
    ///
    /// - [`BuilderError::InvalidValue`] if [`to_value`](Self::to_value) got an
    ///   unsupported shape
    /// - [`BuilderError::MissingField`] if no recipient was set
    pub fn build(self) -> Result<Message, BuilderError> {
        if let Some(message) = self.to_error {
            return Err(BuilderError::invalid_value("to", message));
        }

        let to = self.to.ok_or_else(|| BuilderError::missing_field("to"))?;

        Ok(Message {
            from: self.from,
            name: self.name,
            to: Some(to),
            subject: self.subject.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            content: self.content,
            charset: self
                .charset
                .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        })
    }
}
