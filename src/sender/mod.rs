//! Send primitive layer: the capability the bridge delegates to, plus an HTTP gateway
//! implementation of it.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use phonenumber::country;
use url::Url;

use crate::domain::{Destination, MessageBody, PhoneNumber, SenderId, ValidationError};
use crate::transport::{GatewayForm, GatewayOutcome};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Platform capability that transmits one text message.
///
/// Implementations either succeed silently or return a [`PlatformError`] whose
/// `Display` output is the platform's own description of the failure.
pub trait SmsSender: Send + Sync {
    fn send<'a>(
        &'a self,
        destination: &'a Destination,
        body: &'a MessageBody,
    ) -> BoxFuture<'a, Result<(), PlatformError>>;
}

impl<T: SmsSender + ?Sized> SmsSender for Arc<T> {
    fn send<'a>(
        &'a self,
        destination: &'a Destination,
        body: &'a MessageBody,
    ) -> BoxFuture<'a, Result<(), PlatformError>> {
        (**self).send(destination, body)
    }
}

#[derive(Debug, thiserror::Error)]
/// Failure raised by a send primitive.
pub enum PlatformError {
    /// The platform refused the message and said why.
    #[error("{message}")]
    Rejected { message: String },

    /// The destination could not be parsed as a phone number.
    #[error("invalid phone number: {input}")]
    InvalidDestination { input: String },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the gateway.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

impl PlatformError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Invalid [`HttpGatewaySenderBuilder`] settings.
pub enum ConfigError {
    #[error("invalid gateway endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported gateway endpoint scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`HttpGatewaySender`].
pub struct HttpGatewaySenderBuilder {
    endpoint: String,
    api_token: Option<String>,
    sender_id: Option<String>,
    default_region: Option<country::Id>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpGatewaySenderBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: None,
            sender_id: None,
            default_region: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Credential sent as the `api_token` form field.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sender id sent as the `from` form field.
    pub fn sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Normalize destinations to E.164, using `region` for numbers without a country prefix.
    pub fn default_region(mut self, region: country::Id) -> Self {
        self.default_region = Some(region);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<HttpGatewaySender, ConfigError> {
        let endpoint = validate_endpoint(&self.endpoint)?;
        let sender_id = self.sender_id.map(SenderId::new).transpose()?;
        let api_token = self
            .api_token
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty());

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| ConfigError::HttpClient(Box::new(err)))?;

        Ok(HttpGatewaySender {
            endpoint,
            api_token,
            sender_id,
            default_region: self.default_region,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let url = Url::parse(endpoint.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        });
    }
    Ok(url.into())
}

#[derive(Clone)]
/// Send primitive backed by an HTTP SMS gateway.
///
/// Each send posts one form (`to`, `msg`, optional `from` and `api_token`) to the
/// configured endpoint. A 2xx response with a blank body or `{"status": "OK"}` counts as
/// accepted; `{"status": "ERROR", "status_text": ...}` is a rejection.
pub struct HttpGatewaySender {
    endpoint: String,
    api_token: Option<String>,
    sender_id: Option<SenderId>,
    default_region: Option<country::Id>,
    http: Arc<dyn HttpTransport>,
}

impl HttpGatewaySender {
    pub fn builder(endpoint: impl Into<String>) -> HttpGatewaySenderBuilder {
        HttpGatewaySenderBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn resolve_destination(
        &self,
        destination: &Destination,
    ) -> Result<Destination, PlatformError> {
        let Some(region) = self.default_region else {
            return Ok(destination.clone());
        };
        PhoneNumber::parse(Some(region), destination.raw())
            .map(Destination::from)
            .map_err(|_| PlatformError::InvalidDestination {
                input: destination.raw().to_owned(),
            })
    }

    async fn post(
        &self,
        destination: &Destination,
        body: &MessageBody,
    ) -> Result<(), PlatformError> {
        let destination = self.resolve_destination(destination)?;
        let params = crate::transport::encode_gateway_form(&GatewayForm {
            destination: &destination,
            body,
            sender_id: self.sender_id.as_ref(),
            api_token: self.api_token.as_deref(),
        });

        let response = self
            .http
            .post_form(&self.endpoint, params)
            .await
            .map_err(PlatformError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(PlatformError::HttpStatus {
                status: response.status,
                body,
            });
        }

        match crate::transport::decode_gateway_response(&response.body)
            .map_err(|err| PlatformError::Parse(Box::new(err)))?
        {
            GatewayOutcome::Accepted => Ok(()),
            GatewayOutcome::Rejected { status_text } => Err(PlatformError::rejected(
                status_text.unwrap_or_else(|| "gateway rejected the message".to_owned()),
            )),
        }
    }
}

impl SmsSender for HttpGatewaySender {
    fn send<'a>(
        &'a self,
        destination: &'a Destination,
        body: &'a MessageBody,
    ) -> BoxFuture<'a, Result<(), PlatformError>> {
        Box::pin(self.post(destination, body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        calls: usize,
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_url: None,
                    last_params: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.calls += 1;
                    state.last_url = Some(url.to_owned());
                    state.last_params = params;
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn make_sender(transport: FakeTransport) -> HttpGatewaySender {
        HttpGatewaySender {
            endpoint: "https://example.invalid/sms".to_owned(),
            api_token: Some("secret".to_owned()),
            sender_id: None,
            default_region: None,
            http: Arc::new(transport),
        }
    }

    fn destination(raw: &str) -> Destination {
        Destination::new(raw).unwrap()
    }

    fn body(text: &str) -> MessageBody {
        MessageBody::new(text).unwrap()
    }

    #[tokio::test]
    async fn send_posts_form_and_accepts_blank_body() {
        let transport = FakeTransport::new(200, "");
        let sender = make_sender(transport.clone());

        sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap();

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms"));
        assert_param(&params, "api_token", "secret");
        assert_param(&params, "to", "+15551234567");
        assert_param(&params, "msg", "hello");
    }

    #[tokio::test]
    async fn send_maps_json_error_to_rejection_message() {
        let transport = FakeTransport::new(200, r#"{"status":"ERROR","status_text":"no SIM"}"#);
        let sender = make_sender(transport);

        let err = sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Rejected { .. }));
        assert_eq!(err.to_string(), "no SIM");
    }

    #[tokio::test]
    async fn send_uses_fallback_text_for_silent_rejection() {
        let transport = FakeTransport::new(200, r#"{"status":"ERROR"}"#);
        let sender = make_sender(transport);

        let err = sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "gateway rejected the message");
    }

    #[tokio::test]
    async fn send_maps_non_success_http_status() {
        let sender = make_sender(FakeTransport::new(500, "oops"));
        let err = sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlatformError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));

        let sender = make_sender(FakeTransport::new(503, "   "));
        let err = sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlatformError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn send_maps_unparseable_body_to_parse_error() {
        let sender = make_sender(FakeTransport::new(200, "{ not json }"));
        let err = sender
            .send(&destination("+15551234567"), &body("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Parse(_)));
    }

    #[tokio::test]
    async fn send_normalizes_destination_with_default_region() {
        let transport = FakeTransport::new(200, r#"{"status":"OK"}"#);
        let sender = HttpGatewaySender {
            default_region: Some(country::Id::US),
            sender_id: Some(SenderId::new("ACME").unwrap()),
            ..make_sender(transport.clone())
        };

        sender
            .send(&destination("(202) 555-0143"), &body("hello"))
            .await
            .unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "to", "+12025550143");
        assert_param(&params, "from", "ACME");
    }

    #[tokio::test]
    async fn malformed_destination_fails_without_posting() {
        let transport = FakeTransport::new(200, "");
        let sender = HttpGatewaySender {
            default_region: Some(country::Id::US),
            ..make_sender(transport.clone())
        };

        let err = sender
            .send(&destination("not-a-number"), &body("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::InvalidDestination { .. }));
        assert_eq!(err.to_string(), "invalid phone number: not-a-number");
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn builder_validates_endpoint_and_sender() {
        let sender = HttpGatewaySender::builder(" https://gateway.example.com/send ")
            .api_token("  ")
            .build()
            .unwrap();
        assert_eq!(sender.endpoint(), "https://gateway.example.com/send");
        assert!(sender.api_token.is_none());

        assert!(matches!(
            HttpGatewaySender::builder("not a url").build(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            HttpGatewaySender::builder("ftp://gateway.example.com").build(),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            HttpGatewaySender::builder("https://gateway.example.com")
                .sender_id(" ")
                .build(),
            Err(ConfigError::Validation(_))
        ));
    }
}
