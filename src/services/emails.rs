//! Email sending through the SES classic `SendEmail` action.
//!
//! A send is a single pass with no retries:
//!
//! 1. resolve sender defaults and validate the message
//! 2. build the flat `SendEmail` form parameters
//! 3. verify the credentials
//! 4. capture one timestamp and sign it
//! 5. post through the [`Transport`]
//! 6. map the XML reply with [`interpret_response`]

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::SesConfig;
use crate::error::{interpret_response, SesError, SesResult};
use crate::http::{SignedRequest, Transport};
use crate::signing::{sign_credentials, RequestTimestamp};
use crate::types::{Message, Recipients, SendEmailResponse};

/// Query action name.
pub const SEND_EMAIL_ACTION: &str = "SendEmail";

/// Parameter prefix used for a single recipient.
pub const SINGLE_DESTINATION_PREFIX: &str = "Destination.ToAddresses.member";

/// Parameter prefix used for a recipient list.
///
/// The lowercase `t` differs from [`SINGLE_DESTINATION_PREFIX`]; both shapes
/// are kept as they have always been sent.
pub const LIST_DESTINATION_PREFIX: &str = "Destination.toAddresses.member";

const REQUEST_PATH: &str = "/";

/// Service for sending email.
///
/// Holds the configuration fixed at construction and a shared transport, so
/// one instance can serve concurrent sends.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use integrations_aws_ses_classic::config::SesConfig;
/// use integrations_aws_ses_classic::http::ReqwestTransport;
/// use integrations_aws_ses_classic::services::EmailService;
/// use integrations_aws_ses_classic::builders::EmailBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SesConfig::builder()
///     .credentials("access_key", "secret_key")
///     .default_sender("noreply@example.com")
///     .build()?;
///
/// let transport = Arc::new(ReqwestTransport::new(&config)?);
/// let service = EmailService::new(Arc::new(config), transport);
///
/// let message = EmailBuilder::new()
///     .to("user@example.com")
///     .subject("Welcome")
///     .text("Hello!")
///     .build()?;
///
/// let message_id = service.send(&message).await?;
/// println!("Message ID: {}", message_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EmailService {
    config: Arc<SesConfig>,
    transport: Arc<dyn Transport>,
}

impl EmailService {
    /// Create a new email service.
    pub fn new(config: Arc<SesConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The configuration this service sends with.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    /// Send a message and return the SES message ID.
    ///
    /// # Errors
    ///
    /// See [`send_email`](Self::send_email).
    pub async fn send(&self, message: &Message) -> SesResult<String> {
        self.send_email(message)
            .await
            .map(|response| response.message_id)
    }

    /// Send a message and return the full SES result.
    ///
    /// # Errors
    ///
    /// - [`SesError::Validation`] if the sender or recipients are missing
    /// - [`SesError::Configuration`] if either credential is empty
    /// - [`SesError::Delivery`] if SES rejected the request
    /// - [`SesError::Protocol`] if the reply could not be interpreted
    /// - [`SesError::Transport`] / [`SesError::Timeout`] if the call failed
    ///
    /// Configuration and validation failures happen before anything is sent.
    pub async fn send_email(&self, message: &Message) -> SesResult<SendEmailResponse> {
        let mut params = build_send_email_params(message, &self.config)?;

        let credentials = &self.config.credentials;
        credentials.verify()?;

        debug!(
            sender = params_value(&params, "Source").unwrap_or_default(),
            recipients = message.to.as_ref().map_or(0, |to| to.addresses().len()),
            html = message.is_html(),
            "Sending email via SES"
        );

        let timestamp = RequestTimestamp::now();
        params.push(("Timestamp".to_string(), timestamp.query_timestamp()));
        params.push(("Version".to_string(), self.config.version.clone()));
        params.push((
            "AWSAccessKeyId".to_string(),
            credentials.access_key_id().to_string(),
        ));

        let authorization = sign_credentials(credentials, &timestamp)?;
        let request =
            SignedRequest::new(REQUEST_PATH, params, authorization, timestamp.http_date());

        trace!(params = request.params.len(), "Dispatching SendEmail request");

        let response = self.transport.send(request).await?;

        trace!(status = %response.status, "Received SES response");

        interpret_response(response.status, &response.body)
    }
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Validate `message` and build its `SendEmail` parameters.
///
/// Sender and display name fall back to the configured defaults. The
/// returned list excludes `Timestamp`, `Version` and `AWSAccessKeyId`, which
/// are added at signing time.
///
/// # Errors
///
/// Returns [`SesError::Validation`] if the resolved sender is empty or no
/// recipients were given.
///
/// # Examples
///
/// ```rust
/// use integrations_aws_ses_classic::config::SesConfig;
/// use integrations_aws_ses_classic::services::build_send_email_params;
/// use integrations_aws_ses_classic::types::{Message, Recipients};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SesConfig::builder().credentials("a", "s").build()?;
///
/// let mut message = Message::new();
/// message.from = Some("from@example.com".to_string());
/// message.to = Some(Recipients::multiple(["a@example.com", "", "b@example.com"]));
///
/// let params = build_send_email_params(&message, &config)?;
/// assert!(params.contains(&(
///     "Destination.toAddresses.member.2".to_string(),
///     "b@example.com".to_string(),
/// )));
/// # Ok(())
/// # }
/// ```
pub fn build_send_email_params(
    message: &Message,
    config: &SesConfig,
) -> SesResult<Vec<(String, String)>> {
    let from = message
        .from
        .as_deref()
        .or(config.default_sender.as_deref())
        .unwrap_or_default();

    if from.is_empty() {
        return Err(SesError::validation(
            "from",
            "You have to specify the from address",
        ));
    }

    let to = message
        .to
        .as_ref()
        .ok_or_else(|| SesError::validation("to", "You have to specify the to address"))?;

    let name = message
        .name
        .as_deref()
        .or(config.default_sender_name.as_deref())
        .filter(|name| !name.is_empty());

    let source = match name {
        Some(name) => format!("{} <{}>", name, from),
        None => from.to_string(),
    };

    let kind = message.content.as_str();
    let mut params = vec![
        ("Action".to_string(), SEND_EMAIL_ACTION.to_string()),
        ("Source".to_string(), source),
        ("Message.Subject.Data".to_string(), message.subject.clone()),
        ("Message.Subject.Charset".to_string(), message.charset.clone()),
        (format!("Message.Body.{}.Data", kind), message.body.clone()),
        (format!("Message.Body.{}.Charset", kind), message.charset.clone()),
    ];

    params.extend(destination_params(to));

    Ok(params)
}

fn destination_params(to: &Recipients) -> Vec<(String, String)> {
    let prefix = match to {
        Recipients::Single(_) => SINGLE_DESTINATION_PREFIX,
        Recipients::Multiple(_) => LIST_DESTINATION_PREFIX,
    };

    to.addresses()
        .into_iter()
        .enumerate()
        .map(|(i, address)| (format!("{}.{}", prefix, i + 1), address.to_string()))
        .collect()
}

fn params_value<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::EmailBuilder;
    use crate::http::{MockTransport, ReqwestTransport, SesResponse};
    use crate::signing::authorization_header;
    use chrono::{DateTime, NaiveDateTime};
    use http::StatusCode;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SUCCESS_BODY: &str = r#"<SendEmailResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <SendEmailResult>
    <MessageId>ABC123</MessageId>
  </SendEmailResult>
  <ResponseMetadata>
    <RequestId>d5964849-c866-11e0-9beb-01a62d68c57f</RequestId>
  </ResponseMetadata>
</SendEmailResponse>"#;

    const ERROR_BODY: &str =
        "<ErrorResponse><Error><Message>Something went wrong</Message></Error></ErrorResponse>";

    fn config() -> SesConfig {
        SesConfig::builder()
            .credentials("AKIDEXAMPLE", "secret")
            .build()
            .unwrap()
    }

    fn message() -> Message {
        EmailBuilder::new()
            .from("user@example.com")
            .to("user1@example.com")
            .subject("Example")
            .text("This is the body")
            .build()
            .unwrap()
    }

    fn service_with(config: SesConfig, transport: MockTransport) -> EmailService {
        EmailService::new(Arc::new(config), Arc::new(transport))
    }

    fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params_value(params, name)
    }

    #[test]
    fn test_text_message_params() {
        let params = build_send_email_params(&message(), &config()).unwrap();

        assert_eq!(param(&params, "Action"), Some("SendEmail"));
        assert_eq!(param(&params, "Source"), Some("user@example.com"));
        assert_eq!(param(&params, "Message.Subject.Data"), Some("Example"));
        assert_eq!(param(&params, "Message.Subject.Charset"), Some("UTF-8"));
        assert_eq!(param(&params, "Message.Body.Text.Data"), Some("This is the body"));
        assert_eq!(param(&params, "Message.Body.Text.Charset"), Some("UTF-8"));
        assert_eq!(param(&params, "Message.Body.Html.Data"), None);
    }

    #[test]
    fn test_html_message_params() {
        let message = EmailBuilder::new()
            .from("user@example.com")
            .to("user1@example.com")
            .html("<p>Hi</p>")
            .charset("ISO-8859-1")
            .build()
            .unwrap();

        let params = build_send_email_params(&message, &config()).unwrap();
        assert_eq!(param(&params, "Message.Body.Html.Data"), Some("<p>Hi</p>"));
        assert_eq!(param(&params, "Message.Body.Html.Charset"), Some("ISO-8859-1"));
        assert_eq!(param(&params, "Message.Body.Text.Data"), None);
    }

    #[test]
    fn test_source_with_display_name() {
        let message = EmailBuilder::new()
            .from("user@example.com")
            .name("User")
            .to("user1@example.com")
            .build()
            .unwrap();

        let params = build_send_email_params(&message, &config()).unwrap();
        assert_eq!(param(&params, "Source"), Some("User <user@example.com>"));
    }

    #[test]
    fn test_empty_display_name_is_ignored() {
        let message = EmailBuilder::new()
            .from("user@example.com")
            .name("")
            .to("user1@example.com")
            .build()
            .unwrap();

        let params = build_send_email_params(&message, &config()).unwrap();
        assert_eq!(param(&params, "Source"), Some("user@example.com"));
    }

    #[test]
    fn test_sender_defaults_from_config() {
        let config = SesConfig::builder()
            .credentials("AKIDEXAMPLE", "secret")
            .default_sender("noreply@example.com")
            .default_sender_name("Example")
            .build()
            .unwrap();

        let message = EmailBuilder::new().to("user1@example.com").build().unwrap();
        let params = build_send_email_params(&message, &config).unwrap();
        assert_eq!(param(&params, "Source"), Some("Example <noreply@example.com>"));

        let message = EmailBuilder::new()
            .from("override@example.com")
            .to("user1@example.com")
            .build()
            .unwrap();
        let params = build_send_email_params(&message, &config).unwrap();
        assert_eq!(param(&params, "Source"), Some("Example <override@example.com>"));
    }

    #[test]
    fn test_single_recipient_produces_one_destination() {
        let params = build_send_email_params(&message(), &config()).unwrap();

        let destinations: Vec<_> = params
            .iter()
            .filter(|(key, _)| key.starts_with("Destination."))
            .collect();

        assert_eq!(
            destinations,
            vec![&(
                "Destination.ToAddresses.member.1".to_string(),
                "user1@example.com".to_string()
            )]
        );
    }

    #[test]
    fn test_recipient_list_skips_blank_entries() {
        let message = EmailBuilder::new()
            .from("user@example.com")
            .to_list(["a@example.com", "", "c@example.com"])
            .build()
            .unwrap();

        let params = build_send_email_params(&message, &config()).unwrap();

        let destinations: Vec<_> = params
            .iter()
            .filter(|(key, _)| key.starts_with("Destination."))
            .cloned()
            .collect();

        assert_eq!(
            destinations,
            vec![
                (
                    "Destination.toAddresses.member.1".to_string(),
                    "a@example.com".to_string()
                ),
                (
                    "Destination.toAddresses.member.2".to_string(),
                    "c@example.com".to_string()
                ),
            ]
        );
    }

    // Single and list recipients use differently cased keys on the wire.
    #[test]
    fn test_destination_key_casing_compatibility() {
        let single = build_send_email_params(&message(), &config()).unwrap();
        assert!(param(&single, "Destination.ToAddresses.member.1").is_some());
        assert!(param(&single, "Destination.toAddresses.member.1").is_none());

        let list_message = EmailBuilder::new()
            .from("user@example.com")
            .to_list(["user1@example.com"])
            .build()
            .unwrap();
        let list = build_send_email_params(&list_message, &config()).unwrap();
        assert!(param(&list, "Destination.toAddresses.member.1").is_some());
        assert!(param(&list, "Destination.ToAddresses.member.1").is_none());
    }

    #[test]
    fn test_empty_sender_is_rejected() {
        let mut message = message();
        message.from = Some(String::new());

        let err = build_send_email_params(&message, &config()).unwrap_err();
        match err {
            SesError::Validation { message, field } => {
                assert_eq!(message, "You have to specify the from address");
                assert_eq!(field.as_deref(), Some("from"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_transport() {
        for (access, secret, missing) in [
            ("", "secret", "access_key"),
            ("AKIDEXAMPLE", "", "secret_key"),
            ("", "", "access_key"),
        ] {
            let mut transport = MockTransport::new();
            transport.expect_send().times(0);

            let config = SesConfig::builder()
                .credentials(access, secret)
                .build()
                .unwrap();
            let service = service_with(config, transport);

            let err = service.send(&message()).await.unwrap_err();
            match err {
                SesError::Configuration { message } => assert_eq!(
                    message,
                    format!("You have to specify a non empty value for the {} option", missing)
                ),
                other => panic!("Expected Configuration error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_validation_failures_never_reach_transport() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        let service = service_with(config(), transport);

        let mut no_sender = message();
        no_sender.from = None;
        let err = service.send(&no_sender).await.unwrap_err();
        assert!(matches!(err, SesError::Validation { .. }));

        let mut no_recipients = message();
        no_recipients.to = None;
        let err = service.send(&no_recipients).await.unwrap_err();
        assert!(matches!(err, SesError::Validation { ref field, .. } if field.as_deref() == Some("to")));
    }

    #[tokio::test]
    async fn test_validation_runs_before_credentials_check() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let config = SesConfig::builder().credentials("", "").build().unwrap();
        let service = service_with(config, transport);

        let mut message = message();
        message.from = Some(String::new());

        let err = service.send(&message).await.unwrap_err();
        match err {
            SesError::Validation { message, field } => {
                assert_eq!(message, "You have to specify the from address");
                assert_eq!(field.as_deref(), Some("from"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signed_request_contents() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request: &SignedRequest| {
                let timestamp = request.param("Timestamp").unwrap_or_default();
                let query = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S.000Z");
                let date = DateTime::parse_from_rfc2822(&request.date);

                request.path == "/"
                    && request.param("Version") == Some("2010-12-01")
                    && request.param("AWSAccessKeyId") == Some("AKIDEXAMPLE")
                    && request.authorization
                        == authorization_header("AKIDEXAMPLE", "secret", &request.date)
                    && matches!(
                        (query, date),
                        (Ok(query), Ok(date)) if query == date.naive_utc()
                    )
            })
            .times(1)
            .returning(|_| Ok(SesResponse::new(StatusCode::OK, SUCCESS_BODY)));

        let service = service_with(config(), transport);
        service.send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_returns_message_id() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(SesResponse::new(StatusCode::OK, SUCCESS_BODY)));

        let service = service_with(config(), transport);
        assert_eq!(service.send(&message()).await.unwrap(), "ABC123");
    }

    #[tokio::test]
    async fn test_send_email_keeps_request_id() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(SesResponse::new(StatusCode::OK, SUCCESS_BODY)));

        let service = service_with(config(), transport);
        let response = service.send_email(&message()).await.unwrap();
        assert_eq!(response.message_id, "ABC123");
        assert_eq!(
            response.request_id.as_deref(),
            Some("d5964849-c866-11e0-9beb-01a62d68c57f")
        );
    }

    #[tokio::test]
    async fn test_provider_rejection() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(SesResponse::new(StatusCode::BAD_REQUEST, ERROR_BODY)));

        let service = service_with(config(), transport);
        let err = service.send(&message()).await.unwrap_err();

        assert!(matches!(err, SesError::Delivery { .. }));
        assert_eq!(err.to_string(), "Failed to send the Email: Something went wrong");
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Err(SesError::Timeout {
                message: "operation timed out".to_string(),
            })
        });

        let service = service_with(config(), transport);
        let err = service.send(&message()).await.unwrap_err();
        assert!(matches!(err, SesError::Timeout { .. }));
    }

    async fn wiremock_service(mock_server: &MockServer) -> EmailService {
        let config = SesConfig::builder()
            .credentials("AKIDEXAMPLE", "secret")
            .endpoint(mock_server.uri())
            .build()
            .unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();
        EmailService::new(Arc::new(config), Arc::new(transport))
    }

    #[tokio::test]
    async fn test_round_trip_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header_exists("x-amzn-authorization"))
            .and(header_exists("date"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("Action=SendEmail"))
            .and(body_string_contains("Source=user%40example.com"))
            .and(body_string_contains(
                "Destination.ToAddresses.member.1=user1%40example.com",
            ))
            .and(body_string_contains("AWSAccessKeyId=AKIDEXAMPLE"))
            .and(body_string_contains("Version=2010-12-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS_BODY))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = wiremock_service(&mock_server).await;
        assert_eq!(service.send(&message()).await.unwrap(), "ABC123");
    }

    #[tokio::test]
    async fn test_rejection_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(ERROR_BODY))
            .mount(&mock_server)
            .await;

        let service = wiremock_service(&mock_server).await;
        let err = service.send(&message()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to send the Email: Something went wrong");
    }

    #[tokio::test]
    async fn test_unexpected_body_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let service = wiremock_service(&mock_server).await;
        let err = service.send(&message()).await.unwrap_err();
        assert_eq!(err.raw_body(), Some("Bad Gateway"));
        assert_eq!(
            err.to_string(),
            "Failed to extract the message ID, raw response: Bad Gateway"
        );
    }
}
