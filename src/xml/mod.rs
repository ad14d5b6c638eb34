//! XML parsing utilities for SES query API responses.
//!
//! The classic SES API answers every `SendEmail` call with one of two XML
//! documents:
//!
//! ```text
//! <SendEmailResponse>                 <ErrorResponse>
//!   <SendEmailResult>                   <Error>
//!     <MessageId>...</MessageId>          <Type>Sender</Type>
//!   </SendEmailResult>                    <Code>MessageRejected</Code>
//!   <ResponseMetadata>                    <Message>...</Message>
//!     <RequestId>...</RequestId>        </Error>
//!   </ResponseMetadata>                 <RequestId>...</RequestId>
//! </SendEmailResponse>                </ErrorResponse>
//! ```
//!
//! Elements are matched on their local name, so the `xmlns` attribute SES puts
//! on the root element does not matter.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Root element of a successful send.
pub const SEND_EMAIL_RESPONSE: &str = "SendEmailResponse";

/// Root element of a rejected request.
pub const ERROR_RESPONSE: &str = "ErrorResponse";

/// The interesting parts of a parsed SES response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDocument {
    /// Root element was `SendEmailResponse`.
    SendEmail {
        /// `SendEmailResult/MessageId`, if present.
        message_id: Option<String>,
        /// `ResponseMetadata/RequestId`, if present.
        request_id: Option<String>,
    },
    /// Root element was `ErrorResponse`.
    Error {
        /// `Error/Code`, if present.
        code: Option<String>,
        /// `Error/Message`, if present.
        message: Option<String>,
        /// `RequestId`, if present.
        request_id: Option<String>,
    },
    /// Any other root element, or no element at all (empty string).
    Other {
        /// Local name of the root element.
        root: String,
    },
}

/// Parse an SES response body.
///
/// # Errors
///
/// Returns the underlying [`quick_xml::Error`] if the body is not well-formed XML.
///
/// # Examples
///
/// ```rust
/// use integrations_aws_ses_classic::xml::{parse_response, ResponseDocument};
///
/// let doc = parse_response(
///     "<SendEmailResponse><SendEmailResult><MessageId>ABC123</MessageId></SendEmailResult></SendEmailResponse>",
/// )
/// .unwrap();
///
/// assert_eq!(
///     doc,
///     ResponseDocument::SendEmail {
///         message_id: Some("ABC123".to_string()),
///         request_id: None,
///     }
/// );
/// ```
pub fn parse_response(xml: &str) -> Result<ResponseDocument, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root: Option<String> = None;
    let mut path: Vec<String> = Vec::new();
    let mut open_ids: Vec<usize> = Vec::new();
    let mut opened = 0usize;
    let mut values: Vec<PathValue> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if root.is_none() {
                    root = Some(name.clone());
                }
                path.push(name);
                opened += 1;
                open_ids.push(opened);
            }
            Event::Empty(e) => {
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?.to_string();
                push_value(&mut values, &path, open_ids.last().copied(), text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).to_string();
                push_value(&mut values, &path, open_ids.last().copied(), text);
            }
            Event::End(_) => {
                path.pop();
                open_ids.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let lookup = |wanted: &str| {
        values
            .iter()
            .find(|value| value.key == wanted)
            .map(|value| value.text.clone())
    };

    let root = root.unwrap_or_default();
    let document = match root.as_str() {
        SEND_EMAIL_RESPONSE => ResponseDocument::SendEmail {
            message_id: lookup("SendEmailResponse/SendEmailResult/MessageId"),
            request_id: lookup("SendEmailResponse/ResponseMetadata/RequestId"),
        },
        ERROR_RESPONSE => ResponseDocument::Error {
            code: lookup("ErrorResponse/Error/Code"),
            message: lookup("ErrorResponse/Error/Message"),
            request_id: lookup("ErrorResponse/RequestId"),
        },
        _ => ResponseDocument::Other { root },
    };

    Ok(document)
}

fn push_value(
    values: &mut Vec<PathValue>,
    path: &[String],
    element: Option<usize>,
    text: String,
) {
    let Some(element) = element else {
        return;
    };

    let key = path.join("/");
    match values.iter_mut().find(|v| v.key == key) {
        // Split text or CDATA inside one element.
        Some(existing) if existing.element == element => existing.text.push_str(&text),
        // A repeated element; the first occurrence wins.
        Some(_) => {}
        None => values.push(PathValue { key, element, text }),
    }
}

/// Text collected for one element path.
struct PathValue {
    key: String,
    element: usize,
    text: String,
}
