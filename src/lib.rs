//! Native handler for the "send SMS" bridge call.
//!
//! An application layer sends a named call (`sendSMS`) with a string-keyed argument bag
//! (`number`, `message`). [`BridgeHandler`] validates the arguments, delegates to an injected
//! [`SmsSender`], and answers with a [`BridgeReply`]: a success acknowledgement, an error
//! carrying `INVALID_ARGUMENTS` or `SEND_FAILED`, or "not implemented" for unknown commands.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the JSON
//! method-channel codec and gateway wire format, a sender layer holding the send primitive
//! seam, and the bridge layer orchestrating a call.
//!
//! ```rust,no_run
//! use smsbridge::{BridgeHandler, HttpGatewaySender, MethodCall};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sender = HttpGatewaySender::builder("https://gateway.example.com/send")
//!         .api_token("...")
//!         .build()?;
//!     let bridge = BridgeHandler::new(sender);
//!     let reply = bridge
//!         .handle_call(&MethodCall::send_sms("+15551234567", "hello"))
//!         .await;
//!     println!("{reply:?}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod bridge;
pub mod domain;
pub mod sender;
pub mod transport;

pub use bridge::{
    BridgeHandler, BridgeHandlerBuilder, DEFAULT_CHANNEL, LogNotifier, NoopNotifier,
    Notification, NotificationDuration, Notifier, NotifyError,
};
pub use domain::{
    BridgeReply, Destination, ErrorCode, MessageBody, MethodCall, PhoneNumber, SEND_SMS_METHOD,
    SMS_SENT_ACK, SendRequest, SendResult, SenderId, ValidationError,
};
pub use sender::{
    BoxFuture, ConfigError, HttpGatewaySender, HttpGatewaySenderBuilder, PlatformError,
    SmsSender,
};
pub use transport::CodecError;
