use debug_shapes_protocol::EncodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("failed to encode debug message: {0}")]
    Encode(#[from] EncodeError),
    #[error("recipient {recipient} rejected message on channel {channel}: {reason}")]
    Rejected {
        recipient: String,
        channel: String,
        reason: String,
    },
}
