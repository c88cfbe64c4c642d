use serde::Deserialize;

use crate::domain::{Destination, MessageBody, SenderId};

/// Form field carrying the gateway credential.
pub const API_TOKEN_FIELD: &str = "api_token";
/// Form field carrying the destination address.
pub const TO_FIELD: &str = "to";
/// Form field carrying the message body.
pub const MSG_FIELD: &str = "msg";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum TransportStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
struct GatewayJsonResponse {
    status: TransportStatus,
    #[serde(default)]
    status_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    Accepted,
    Rejected { status_text: Option<String> },
}

pub struct GatewayForm<'a> {
    pub destination: &'a Destination,
    pub body: &'a MessageBody,
    pub sender_id: Option<&'a SenderId>,
    pub api_token: Option<&'a str>,
}

pub fn encode_gateway_form(form: &GatewayForm<'_>) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    if let Some(token) = form.api_token {
        params.push((API_TOKEN_FIELD.to_owned(), token.to_owned()));
    }
    params.push((TO_FIELD.to_owned(), form.destination.raw().to_owned()));
    params.push((MSG_FIELD.to_owned(), form.body.as_str().to_owned()));
    if let Some(from) = form.sender_id {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    params
}

/// Decode a 2xx gateway body. A blank body means the message was accepted.
pub fn decode_gateway_response(body: &str) -> Result<GatewayOutcome, TransportError> {
    if body.trim().is_empty() {
        return Ok(GatewayOutcome::Accepted);
    }

    let parsed: GatewayJsonResponse = serde_json::from_str(body)?;
    Ok(match parsed.status {
        TransportStatus::Ok => GatewayOutcome::Accepted,
        TransportStatus::Error => GatewayOutcome::Rejected {
            status_text: parsed.status_text.filter(|text| !text.trim().is_empty()),
        },
    })
}
