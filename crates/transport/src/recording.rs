use std::sync::{Mutex, PoisonError};

use crate::{
    delivery::{Audience, ChannelRecipient},
    errors::DeliveryError,
};

/// A recipient that keeps every payload it is sent, keyed by channel.
#[derive(Debug, Default)]
pub struct RecordingRecipient {
    name: String,
    sent: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingRecipient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded payloads.
    pub fn take(&self) -> Vec<(String, Vec<u8>)> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Audience for RecordingRecipient {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_channel_recipient(&self) -> Option<&dyn ChannelRecipient> {
        Some(self)
    }
}

impl ChannelRecipient for RecordingRecipient {
    fn send_channel_message(&self, channel: &str, payload: &[u8]) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel.to_string(), payload.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains() {
        let recipient = RecordingRecipient::new("r");
        recipient.send_channel_message("a:b", &[1, 2]).unwrap();
        assert_eq!(recipient.take(), vec![("a:b".to_string(), vec![1, 2])]);
        assert!(recipient.sent().is_empty());
    }
}
