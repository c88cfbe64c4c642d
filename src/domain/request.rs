use serde_json::{Map, Value};

use crate::domain::validation::ValidationError;
use crate::domain::value::{Destination, MessageBody};

/// Command name of the "send SMS" bridge call.
pub const SEND_SMS_METHOD: &str = "sendSMS";

/// A named bridge call with its string-keyed argument bag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodCall {
    pub method: String,
    pub args: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Build a `sendSMS` call carrying `number` and `message`.
    pub fn send_sms(number: impl Into<String>, message: impl Into<String>) -> Self {
        let mut args = Map::new();
        args.insert(Destination::FIELD.to_owned(), Value::String(number.into()));
        args.insert(MessageBody::FIELD.to_owned(), Value::String(message.into()));
        Self::new(SEND_SMS_METHOD, args)
    }
}

/// A validated request to send one SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    destination: Destination,
    body: MessageBody,
}

impl SendRequest {
    pub fn new(destination: Destination, body: MessageBody) -> Self {
        Self { destination, body }
    }

    /// Extract and validate `number` and `message` from a bridge argument bag.
    ///
    /// Missing keys, `null`, and non-string values count as absent.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, ValidationError> {
        let number = string_arg(args, Destination::FIELD)?;
        let message = string_arg(args, MessageBody::FIELD)?;
        Ok(Self {
            destination: Destination::new(number)?,
            body: MessageBody::new(message)?,
        })
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }
}

fn string_arg<'a>(
    args: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Empty { field }),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}
