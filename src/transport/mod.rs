//! Transport layer: wire-format details (serialization/deserialization).

mod gateway;
pub mod method_codec;

pub(crate) use gateway::{
    GatewayForm, GatewayOutcome, decode_gateway_response, encode_gateway_form,
};
pub use method_codec::{
    CodecError, decode_method_call, decode_reply, encode_method_call, encode_reply,
};
