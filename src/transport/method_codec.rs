use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{BridgeReply, ErrorCode, MethodCall, SendResult};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("method call arguments must be a JSON object, got {found}")]
    ArgsNotAnObject { found: &'static str },

    #[error("malformed reply envelope: {reason}")]
    MalformedEnvelope { reason: &'static str },

    #[error("reply carries unknown error code: {code}")]
    UnknownErrorCode { code: String },
}

#[derive(Debug, Deserialize)]
struct JsonMethodCall {
    method: String,
    #[serde(default)]
    args: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonMethodCallRef<'a> {
    method: &'a str,
    args: &'a Map<String, Value>,
}

/// Decode `{"method": ..., "args": {...}}`.
///
/// Absent or `null` arguments decode to an empty bag.
pub fn decode_method_call(bytes: &[u8]) -> Result<MethodCall, CodecError> {
    let parsed: JsonMethodCall = serde_json::from_slice(bytes)?;
    let args = match parsed.args {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(CodecError::ArgsNotAnObject {
                found: json_kind(&other),
            });
        }
    };
    Ok(MethodCall::new(parsed.method, args))
}

pub fn encode_method_call(call: &MethodCall) -> Result<Vec<u8>, CodecError> {
    let wire = JsonMethodCallRef {
        method: &call.method,
        args: &call.args,
    };
    Ok(serde_json::to_vec(&wire)?)
}

/// Encode a reply envelope.
///
/// Success is `[result]`, an error is `[code, message, null]`, and a
/// not-implemented reply is empty.
pub fn encode_reply(reply: &BridgeReply) -> Result<Vec<u8>, CodecError> {
    let envelope = match reply {
        BridgeReply::NotImplemented => return Ok(Vec::new()),
        BridgeReply::Handled(SendResult::Success(ack)) => vec![Value::String(ack.clone())],
        BridgeReply::Handled(SendResult::Failure { code, message }) => vec![
            Value::String(code.as_str().to_owned()),
            Value::String(message.clone()),
            Value::Null,
        ],
    };
    Ok(serde_json::to_vec(&envelope)?)
}

pub fn decode_reply(bytes: &[u8]) -> Result<BridgeReply, CodecError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(BridgeReply::NotImplemented);
    }

    let envelope: Vec<Value> = serde_json::from_slice(bytes)?;
    let result = match envelope.as_slice() {
        [Value::String(ack)] => SendResult::Success(ack.clone()),
        [Value::String(code), message, _details] => {
            let code = ErrorCode::from_code(code)
                .ok_or_else(|| CodecError::UnknownErrorCode { code: code.clone() })?;
            let message = match message {
                Value::String(message) => message.clone(),
                Value::Null => String::new(),
                _ => {
                    return Err(CodecError::MalformedEnvelope {
                        reason: "error message must be a string or null",
                    });
                }
            };
            SendResult::Failure { code, message }
        }
        [_] => {
            return Err(CodecError::MalformedEnvelope {
                reason: "success result must be a string",
            });
        }
        [_, _, _] => {
            return Err(CodecError::MalformedEnvelope {
                reason: "error code must be a string",
            });
        }
        _ => {
            return Err(CodecError::MalformedEnvelope {
                reason: "expected one or three elements",
            });
        }
    };
    Ok(BridgeReply::Handled(result))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_call_with_args() {
        let call = decode_method_call(
            br#"{"method":"sendSMS","args":{"number":"+15551234567","message":"hello"}}"#,
        )
        .unwrap();
        assert_eq!(call.method, "sendSMS");
        assert_eq!(call.args.get("number"), Some(&json!("+15551234567")));
        assert_eq!(call.args.get("message"), Some(&json!("hello")));
    }

    #[test]
    fn decode_call_without_args_yields_empty_bag() {
        let call = decode_method_call(br#"{"method":"unknownOp"}"#).unwrap();
        assert_eq!(call.method, "unknownOp");
        assert!(call.args.is_empty());

        let call = decode_method_call(br#"{"method":"sendSMS","args":null}"#).unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn decode_call_rejects_non_object_args() {
        let err = decode_method_call(br#"{"method":"sendSMS","args":[1,2]}"#).unwrap_err();
        assert!(matches!(err, CodecError::ArgsNotAnObject { found: "array" }));

        let err = decode_method_call(b"{ not json }").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn encoded_call_decodes_back() {
        let call = MethodCall::send_sms("+15551234567", "hello");
        let bytes = encode_method_call(&call).unwrap();
        assert_eq!(decode_method_call(&bytes).unwrap(), call);
    }

    #[test]
    fn encode_envelopes() {
        let ok = encode_reply(&BridgeReply::Handled(SendResult::sent())).unwrap();
        assert_eq!(ok, br#"["SMS sent"]"#);

        let err = encode_reply(&BridgeReply::Handled(SendResult::failure(
            ErrorCode::InvalidArguments,
            "Phone number or message is missing",
        )))
        .unwrap();
        assert_eq!(
            err,
            br#"["INVALID_ARGUMENTS","Phone number or message is missing",null]"#
        );

        let not_implemented = encode_reply(&BridgeReply::NotImplemented).unwrap();
        assert!(not_implemented.is_empty());
    }

    #[test]
    fn decode_envelopes() {
        assert_eq!(decode_reply(b"").unwrap(), BridgeReply::NotImplemented);
        assert_eq!(
            decode_reply(br#"["SMS sent"]"#).unwrap(),
            BridgeReply::Handled(SendResult::sent())
        );
        assert_eq!(
            decode_reply(br#"["SEND_FAILED","Failed to send SMS: no SIM",null]"#).unwrap(),
            BridgeReply::Handled(SendResult::failure(
                ErrorCode::SendFailed,
                "Failed to send SMS: no SIM"
            ))
        );
    }

    #[test]
    fn decode_rejects_malformed_envelopes() {
        assert!(matches!(
            decode_reply(br#"["A","B"]"#).unwrap_err(),
            CodecError::MalformedEnvelope { .. }
        ));
        assert!(matches!(
            decode_reply(br#"[42]"#).unwrap_err(),
            CodecError::MalformedEnvelope { .. }
        ));
        assert!(matches!(
            decode_reply(br#"["NOPE","x",null]"#).unwrap_err(),
            CodecError::UnknownErrorCode { .. }
        ));
    }
}
