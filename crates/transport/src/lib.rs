//! Hands encoded [`DebugMessage`](debug_shapes_protocol::DebugMessage)s to
//! whatever transport the host provides.

mod delivery;
mod errors;
mod recording;

use std::env::VarError;

use log::warn;
use serde::{Deserialize, Serialize};

pub use delivery::{send_to, Audience, ChannelRecipient, Delivery};
pub use errors::DeliveryError;
pub use recording::RecordingRecipient;

/// Channel the renderer listens on.
pub const CHANNEL: &str = "debug:shapes";

/// Environment variable overriding [`DeliveryConfig::channel`].
pub const CHANNEL_ENV: &str = "DEBUG_SHAPES_CHANNEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub channel: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            channel: CHANNEL.to_string(),
        }
    }
}

impl DeliveryConfig {
    /// Read [`CHANNEL_ENV`]. Unset means the default; an unreadable or
    /// invalid value falls back to the default with a warning.
    pub fn from_env() -> Self {
        match std::env::var(CHANNEL_ENV) {
            Ok(channel) => Self::from_channel(Some(channel)),
            Err(VarError::NotPresent) => Self::default(),
            Err(VarError::NotUnicode(raw)) => {
                warn!(
                    "Ignoring non UTF-8 {} value {:?}, using {}",
                    CHANNEL_ENV, raw, CHANNEL
                );
                Self::default()
            }
        }
    }

    /// Use `channel` if it looks like a `namespace:name` channel, the default
    /// otherwise.
    pub fn from_channel(channel: Option<String>) -> Self {
        match channel {
            Some(channel) if is_channel_name(&channel) => Self { channel },
            Some(channel) => {
                warn!(
                    "Ignoring invalid channel name {:?}, using {}",
                    channel, CHANNEL
                );
                Self::default()
            }
            None => Self::default(),
        }
    }
}

fn is_channel_name(channel: &str) -> bool {
    matches!(channel.split_once(':'), Some((ns, name)) if !ns.is_empty() && !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delivery_config() {
        let config = DeliveryConfig::default();
        assert_eq!(config.channel, "debug:shapes");
    }

    #[test]
    fn channel_override() {
        let config = DeliveryConfig::from_channel(Some("mymod:draw".to_string()));
        assert_eq!(config.channel, "mymod:draw");
    }

    #[test]
    fn invalid_channel_falls_back() {
        for bad in ["", "nocolon", ":name", "ns:"] {
            let config = DeliveryConfig::from_channel(Some(bad.to_string()));
            assert_eq!(config, DeliveryConfig::default(), "{bad:?}");
        }
        assert_eq!(DeliveryConfig::from_channel(None), DeliveryConfig::default());
    }

    // Every test touching the process environment lives here so they
    // cannot race each other.
    #[test]
    fn config_from_env() {
        std::env::remove_var(CHANNEL_ENV);
        assert_eq!(DeliveryConfig::from_env(), DeliveryConfig::default());

        std::env::set_var(CHANNEL_ENV, "mymod:overlay");
        assert_eq!(DeliveryConfig::from_env().channel, "mymod:overlay");

        std::env::set_var(CHANNEL_ENV, "not-a-channel");
        assert_eq!(DeliveryConfig::from_env(), DeliveryConfig::default());

        #[cfg(unix)]
        {
            use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
            std::env::set_var(CHANNEL_ENV, OsStr::from_bytes(b"ns:\xff"));
            assert_eq!(DeliveryConfig::from_env(), DeliveryConfig::default());
        }

        std::env::remove_var(CHANNEL_ENV);
        assert_eq!(DeliveryConfig::from_env(), DeliveryConfig::default());
    }

    #[test]
    fn config_from_json() {
        let config: DeliveryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DeliveryConfig::default());
        let config: DeliveryConfig = serde_json::from_str(r#"{"channel":"a:b"}"#).unwrap();
        assert_eq!(config.channel, "a:b");
    }
}
