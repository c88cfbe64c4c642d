//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MethodCall, SEND_SMS_METHOD, SendRequest};
pub use response::{BridgeReply, ErrorCode, SMS_SENT_ACK, SendResult};
pub use validation::ValidationError;
pub use value::{Destination, MessageBody, PhoneNumber, SenderId};
