//! Bridge layer: dispatches named calls, validates arguments, and maps send outcomes to replies.

mod notify;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{
    BridgeReply, ErrorCode, MethodCall, SEND_SMS_METHOD, SendRequest, SendResult,
};
use crate::sender::SmsSender;
use crate::transport::CodecError;

pub use notify::{
    LogNotifier, NoopNotifier, Notification, NotificationDuration, Notifier, NotifyError,
};

/// Default channel the handler is registered against.
pub const DEFAULT_CHANNEL: &str = "com.yourdomain.sms_sender";

pub(crate) const LOG_TARGET: &str = "sms_bridge";

const MISSING_ARGUMENTS_MESSAGE: &str = "Phone number or message is missing";

#[derive(Clone)]
/// Builder for [`BridgeHandler`].
pub struct BridgeHandlerBuilder {
    sender: Arc<dyn SmsSender>,
    notifier: Arc<dyn Notifier>,
    channel: String,
    method: String,
}

impl BridgeHandlerBuilder {
    pub fn new(sender: impl SmsSender + 'static) -> Self {
        Self {
            sender: Arc::new(sender),
            notifier: Arc::new(LogNotifier),
            channel: DEFAULT_CHANNEL.to_owned(),
            method: SEND_SMS_METHOD.to_owned(),
        }
    }

    /// Replace the default [`LogNotifier`].
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Override the recognized command name (`sendSMS` by default).
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn build(self) -> BridgeHandler {
        BridgeHandler {
            sender: self.sender,
            notifier: self.notifier,
            channel: self.channel,
            method: self.method,
        }
    }
}

#[derive(Clone)]
/// Native handler for the "send SMS" bridge call.
///
/// Each call is independent: arguments are validated, the send primitive is invoked at most
/// once, and the outcome is returned as a [`BridgeReply`]. The handler holds no mutable state
/// and can be shared across tasks.
pub struct BridgeHandler {
    sender: Arc<dyn SmsSender>,
    notifier: Arc<dyn Notifier>,
    channel: String,
    method: String,
}

impl BridgeHandler {
    /// Create a handler with the default channel, command name, and [`LogNotifier`].
    pub fn new(sender: impl SmsSender + 'static) -> Self {
        BridgeHandlerBuilder::new(sender).build()
    }

    pub fn builder(sender: impl SmsSender + 'static) -> BridgeHandlerBuilder {
        BridgeHandlerBuilder::new(sender)
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Dispatch one bridge call.
    ///
    /// Unknown commands yield [`BridgeReply::NotImplemented`] without looking at `args`.
    /// Missing, `null`, non-string, or blank `number`/`message` values yield
    /// [`ErrorCode::InvalidArguments`] and the send primitive is not invoked.
    pub async fn handle(&self, method: &str, args: &Map<String, Value>) -> BridgeReply {
        if method != self.method {
            log::debug!(target: LOG_TARGET, "no handler for method {method:?} on {}", self.channel);
            return BridgeReply::NotImplemented;
        }

        log::debug!(
            target: LOG_TARGET,
            "Attempting to send SMS to: {} with message: {}",
            display_arg(args, "number"),
            display_arg(args, "message")
        );

        let request = match SendRequest::from_args(args) {
            Ok(request) => request,
            Err(err) => {
                log::error!(target: LOG_TARGET, "Number or message is null/blank: {err}");
                return SendResult::failure(ErrorCode::InvalidArguments, MISSING_ARGUMENTS_MESSAGE)
                    .into();
            }
        };

        self.handle_request(&request).await.into()
    }

    pub async fn handle_call(&self, call: &MethodCall) -> BridgeReply {
        self.handle(&call.method, &call.args).await
    }

    /// Send an already validated request and report the outcome.
    pub async fn handle_request(&self, request: &SendRequest) -> SendResult {
        let destination = request.destination();
        match self.sender.send(destination, request.body()).await {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "SMS sent successfully to {destination}");
                self.notify(Notification::short(format!("SMS sent to {destination}")));
                SendResult::sent()
            }
            Err(err) => {
                let message = format!("Failed to send SMS: {err}");
                log::error!(target: LOG_TARGET, "{message}");
                self.notify(Notification::long(message.clone()));
                SendResult::failure(ErrorCode::SendFailed, message)
            }
        }
    }

    /// Decode a JSON method call, dispatch it, and encode the reply envelope.
    pub async fn handle_message(&self, message: &[u8]) -> Result<Vec<u8>, CodecError> {
        let call = crate::transport::decode_method_call(message)?;
        let reply = self.handle_call(&call).await;
        crate::transport::encode_reply(&reply)
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.notify(&notification) {
            log::warn!(target: LOG_TARGET, "{err}");
        }
    }
}

fn display_arg<'a>(args: &'a Map<String, Value>, key: &str) -> &'a str {
    match args.get(key) {
        Some(Value::String(value)) => value,
        _ => "null",
    }
}
