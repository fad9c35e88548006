//! Traits at the edges of the dispatcher.
//!
//! - [`CommandHandler`]: the code a leaf command runs
//! - [`Transport`]: how replies leave the bot
//!
//! Capability lookups go through
//! [`CapabilityChecker`](crate::caps::CapabilityChecker).

use super::context::InvocationContext;
use crate::error::{HandlerResult, TransportError};
use async_trait::async_trait;
use parley_proto::{ChannelId, InteractionId, OutboundPayload};

/// Body of a leaf command.
///
/// Runs after the permission gate passed for every node on the way down.
/// Errors are logged with the command path; they never reach the user.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult;
}

/// Outbound side of the chat platform connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post a message to a channel.
    async fn send_message(
        &self,
        channel: &ChannelId,
        payload: OutboundPayload,
    ) -> Result<(), TransportError>;

    /// Acknowledge an interaction so the platform shows a pending state.
    ///
    /// With `ephemeral` the eventual response is only visible to the invoker.
    async fn acknowledge_interaction(
        &self,
        interaction: &InteractionId,
        ephemeral: bool,
    ) -> Result<(), TransportError>;

    /// Show a typing indicator. Transports without one may ignore it.
    async fn trigger_typing(&self, _channel: &ChannelId) -> Result<(), TransportError> {
        Ok(())
    }
}
