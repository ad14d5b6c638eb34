//! Email message types for the SES classic API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SesError;

/// Character set used when a message does not specify one.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Whether the body is sent as `Message.Body.Text` or `Message.Body.Html`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Plain text body.
    #[default]
    Text,
    /// HTML body.
    Html,
}

impl ContentKind {
    /// The segment used in the `Message.Body.<kind>.*` parameter names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::Html => "Html",
        }
    }
}

/// The `To` recipients of a message.
///
/// SES accepts either one address or an ordered list. The two shapes are
/// encoded differently on the wire, so the distinction is kept even for a
/// one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    /// Exactly one address.
    Single(String),
    /// An ordered list of addresses. Blank entries are allowed and skipped
    /// when the request is built.
    Multiple(Vec<String>),
}

impl Recipients {
    /// A single recipient.
    pub fn single(address: impl Into<String>) -> Self {
        Recipients::Single(address.into())
    }

    /// An ordered list of recipients.
    pub fn multiple<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recipients::Multiple(addresses.into_iter().map(Into::into).collect())
    }

    /// The addresses that will actually be sent to, in order.
    ///
    /// A single recipient is returned as-is; blank list entries are dropped.
    ///
    /// ```
    /// use integrations_aws_ses_classic::types::Recipients;
    ///
    /// let to = Recipients::multiple(["a@example.com", "", "b@example.com"]);
    /// assert_eq!(to.addresses(), vec!["a@example.com", "b@example.com"]);
    /// ```
    pub fn addresses(&self) -> Vec<&str> {
        match self {
            Recipients::Single(address) => vec![address.as_str()],
            Recipients::Multiple(addresses) => addresses
                .iter()
                .map(String::as_str)
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::single(address)
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Recipients::Single(address)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Recipients::Multiple(addresses)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addresses: Vec<&str>) -> Self {
        Recipients::multiple(addresses)
    }
}

/// Accepts a JSON string or an array of strings.
///
/// `null` array members are kept as blank entries. Every other shape is a
/// [`SesError::Validation`] on the `to` field.
impl TryFrom<Value> for Recipients {
    type Error = SesError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(address) => Ok(Recipients::Single(address)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(address) => Ok(address),
                    Value::Null => Ok(String::new()),
                    other => Err(shape_error(&other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Recipients::Multiple),
            other => Err(shape_error(&other)),
        }
    }
}

impl<'de> Deserialize<'de> for Recipients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Recipients::try_from(value).map_err(serde::de::Error::custom)
    }
}

fn shape_error(value: &Value) -> SesError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };

    SesError::validation(
        "to",
        format!(
            "Expected a string or a list of strings for the to address but got {} instead",
            kind
        ),
    )
}

/// An email to send through [`EmailService`](crate::services::EmailService).
///
/// `from` and `name` fall back to the configured defaults when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Sender address.
    pub from: Option<String>,
    /// Sender display name.
    ///
    /// An empty name counts as unset: `Source` is then the bare address
    /// rather than `" <address>"`.
    pub name: Option<String>,
    /// Recipients.
    pub to: Option<Recipients>,
    /// Subject line.
    pub subject: String,
    /// Body, interpreted according to `content`.
    pub body: String,
    /// Whether `body` is text or HTML.
    pub content: ContentKind,
    /// Character set of subject and body.
    pub charset: String,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            from: None,
            name: None,
            to: None,
            subject: String::new(),
            body: String::new(),
            content: ContentKind::Text,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl Message {
    /// Create an empty message with the default charset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the body is HTML.
    pub fn is_html(&self) -> bool {
        self.content == ContentKind::Html
    }
}
