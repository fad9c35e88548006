//! Console connection - the outbound half of the console gateway.
//!
//! [`ConsoleTransport`] writes replies as text lines. [`OpenCapabilities`]
//! grants every capability except an explicit deny list, which is enough
//! for a single-user console.

use crate::caps::CapabilityChecker;
use crate::error::TransportError;
use crate::handlers::core::Transport;
use async_trait::async_trait;
use parley_proto::{Capability, ChannelId, InteractionId, OutboundPayload, Reference, UserId};
use std::collections::HashSet;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Writes outbound traffic as one line per action.
pub struct ConsoleTransport<W> {
    out: Mutex<W>,
}

impl<W> ConsoleTransport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: AsyncWrite + Unpin + Send> ConsoleTransport<W> {
    async fn write_line(&self, line: String) -> Result<(), TransportError> {
        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes())
            .await
            .and(out.write_all(b"\n").await)
            .and(out.flush().await)
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

/// One console line for a payload.
pub fn format_payload(channel: &ChannelId, payload: &OutboundPayload) -> String {
    let mut line = format!("[{channel}]");
    match &payload.reference {
        Some(Reference::Message(id)) => line.push_str(&format!(" (reply to {id})")),
        Some(Reference::Interaction(id)) => line.push_str(&format!(" (interaction {id})")),
        None => {}
    }
    if payload.ephemeral {
        line.push_str(" (only you)");
    }
    line.push(' ');
    line.push_str(&payload.content);
    line
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Transport for ConsoleTransport<W> {
    async fn send_message(
        &self,
        channel: &ChannelId,
        payload: OutboundPayload,
    ) -> Result<(), TransportError> {
        self.write_line(format_payload(channel, &payload)).await
    }

    async fn acknowledge_interaction(
        &self,
        interaction: &InteractionId,
        ephemeral: bool,
    ) -> Result<(), TransportError> {
        let scope = if ephemeral { "private" } else { "public" };
        self.write_line(format!("[ack {interaction}] {scope}")).await
    }

    async fn trigger_typing(&self, channel: &ChannelId) -> Result<(), TransportError> {
        self.write_line(format!("[{channel}] typing...")).await
    }
}

/// Grants every capability to every subject, except those denied.
#[derive(Debug, Default)]
pub struct OpenCapabilities {
    denied: HashSet<(UserId, Capability)>,
}

impl OpenCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(mut self, subject: impl Into<UserId>, capability: Capability) -> Self {
        self.denied.insert((subject.into(), capability));
        self
    }
}

#[async_trait]
impl CapabilityChecker for OpenCapabilities {
    async fn has_capability(
        &self,
        subject: &UserId,
        _channel: &ChannelId,
        capability: &Capability,
    ) -> bool {
        !self.denied.contains(&(subject.clone(), capability.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_lines() {
        let transport = ConsoleTransport::new(Vec::new());
        let channel = ChannelId::from("general");
        transport
            .send_message(
                &channel,
                OutboundPayload::text("hi").replying_to(Reference::Message("m1".into())),
            )
            .await
            .unwrap();
        transport
            .acknowledge_interaction(&InteractionId::from("i1"), true)
            .await
            .unwrap();

        let out = String::from_utf8(transport.into_inner()).unwrap();
        assert_eq!(out, "[general] (reply to m1) hi\n[ack i1] private\n");
    }

    #[tokio::test]
    async fn test_open_capabilities_deny_list() {
        let caps = OpenCapabilities::new().deny("bot", Capability::EmbedLinks);
        let channel = ChannelId::from("c");
        assert!(caps.has_capability(&"bot".into(), &channel, &Capability::SendMessages).await);
        assert!(!caps.has_capability(&"bot".into(), &channel, &Capability::EmbedLinks).await);
        assert!(caps.has_capability(&"user".into(), &channel, &Capability::EmbedLinks).await);
    }
}
