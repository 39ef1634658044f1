use debug_shapes_protocol::{DebugMessage, Encode};
use log::{debug, warn};

use crate::{errors::DeliveryError, DeliveryConfig};

/// Someone a debug message may be addressed to.
///
/// Only audiences that can receive raw channel messages get anything; the rest
/// are skipped with a warning.
pub trait Audience {
    fn name(&self) -> String;

    fn as_channel_recipient(&self) -> Option<&dyn ChannelRecipient> {
        None
    }
}

/// A live endpoint that accepts raw payloads on a named channel.
pub trait ChannelRecipient {
    fn send_channel_message(&self, channel: &str, payload: &[u8]) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent { bytes: usize },
    /// The audience cannot receive channel messages.
    Skipped,
}

/// Encode `message` and push it to `audience` on the configured channel.
pub fn send_to(
    message: &DebugMessage,
    audience: &dyn Audience,
    config: &DeliveryConfig,
) -> Result<Delivery, DeliveryError> {
    let Some(recipient) = audience.as_channel_recipient() else {
        warn!(
            "Audience {} cannot receive channel messages, skipping debug message",
            audience.name()
        );
        return Ok(Delivery::Skipped);
    };

    let payload = message.to_bytes()?;
    recipient.send_channel_message(&config.channel, &payload)?;
    debug!(
        "Sent {} operations ({} bytes) to {} on {}",
        message.len(),
        payload.len(),
        audience.name(),
        config.channel
    );
    Ok(Delivery::Sent {
        bytes: payload.len(),
    })
}
