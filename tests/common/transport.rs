//! Transport that records everything the bot sends.

use async_trait::async_trait;
use parking_lot::Mutex;
use parley::error::TransportError;
use parley::handlers::core::Transport;
use parley_proto::{ChannelId, InteractionId, OutboundPayload};

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ChannelId, OutboundPayload)>>,
    acks: Mutex<Vec<(InteractionId, bool)>>,
    typing: Mutex<Vec<ChannelId>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<(ChannelId, OutboundPayload)> {
        self.sent.lock().clone()
    }

    /// Payloads only.
    pub fn payloads(&self) -> Vec<OutboundPayload> {
        self.sent.lock().iter().map(|(_, p)| p.clone()).collect()
    }

    /// Interaction acknowledgements as `(id, ephemeral)`.
    pub fn acks(&self) -> Vec<(InteractionId, bool)> {
        self.acks.lock().clone()
    }

    pub fn typing(&self) -> Vec<ChannelId> {
        self.typing.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        channel: &ChannelId,
        payload: OutboundPayload,
    ) -> Result<(), TransportError> {
        self.sent.lock().push((channel.clone(), payload));
        Ok(())
    }

    async fn acknowledge_interaction(
        &self,
        interaction: &InteractionId,
        ephemeral: bool,
    ) -> Result<(), TransportError> {
        self.acks.lock().push((interaction.clone(), ephemeral));
        Ok(())
    }

    async fn trigger_typing(&self, channel: &ChannelId) -> Result<(), TransportError> {
        self.typing.lock().push(channel.clone());
        Ok(())
    }
}
