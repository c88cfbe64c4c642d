use std::fmt;

/// Acknowledgement returned when the send primitive accepted the message.
pub const SMS_SENT_ACK: &str = "SMS sent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArguments,
    SendFailed,
}

impl ErrorCode {
    /// Machine-readable code carried in error replies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::SendFailed => "SEND_FAILED",
        }
    }

    /// Map a wire code back to a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "INVALID_ARGUMENTS" => Self::InvalidArguments,
            "SEND_FAILED" => Self::SendFailed,
            _ => return None,
        })
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    Success(String),
    Failure { code: ErrorCode, message: String },
}

impl SendResult {
    pub fn sent() -> Self {
        Self::Success(SMS_SENT_ACK.to_owned())
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Failure {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure { code, .. } => Some(*code),
        }
    }
}

/// Outcome of dispatching one bridge call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeReply {
    Handled(SendResult),
    /// No handler is registered for the requested command.
    NotImplemented,
}

impl BridgeReply {
    pub fn result(&self) -> Option<&SendResult> {
        match self {
            Self::Handled(result) => Some(result),
            Self::NotImplemented => None,
        }
    }
}

impl From<SendResult> for BridgeReply {
    fn from(value: SendResult) -> Self {
        Self::Handled(value)
    }
}
