//! Gateway - reads inbound events from a line stream and dispatches them.
//!
//! Each line is either a JSON-encoded [`InboundEvent`] or plain text, which
//! is treated as a chat message from the configured console user.

use crate::handlers::core::Dispatcher;
use parley_proto::{ChannelId, InboundEvent, MessageEvent, UserId};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Feeds events from a line reader into a [`Dispatcher`].
pub struct Gateway<R> {
    lines: Lines<R>,
    dispatcher: Arc<Dispatcher>,
    console_user: UserId,
    console_channel: ChannelId,
    next_message: u64,
}

impl<R: AsyncBufRead + Unpin> Gateway<R> {
    pub fn new(
        reader: R,
        dispatcher: Arc<Dispatcher>,
        console_user: impl Into<UserId>,
        console_channel: impl Into<ChannelId>,
    ) -> Self {
        Self {
            lines: reader.lines(),
            dispatcher,
            console_user: console_user.into(),
            console_channel: console_channel.into(),
            next_message: 1,
        }
    }

    /// Turn one input line into an event. Blank and undecodable lines
    /// yield nothing.
    pub fn parse_line(&mut self, line: &str) -> Option<InboundEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.starts_with('{') {
            return match serde_json::from_str(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(error = %e, "Discarding undecodable event");
                    None
                }
            };
        }

        let id = self.next_message;
        self.next_message += 1;
        Some(InboundEvent::Message(MessageEvent {
            id: format!("console-{id}").into(),
            author_id: self.console_user.clone(),
            channel_id: self.console_channel.clone(),
            content: line.to_owned(),
            mentioned_user_ids: Vec::new(),
        }))
    }

    /// Dispatch every line until the input closes, then wait for the
    /// invocations still running.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("Gateway reading events");
        let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

        while let Some(line) = self.lines.next_line().await? {
            if let Some(event) = self.parse_line(&line) {
                in_flight.retain(|task| !task.is_finished());
                in_flight.push(self.dispatcher.dispatch(event));
            }
        }

        debug!(pending = in_flight.len(), "Input closed, draining invocations");
        for task in in_flight {
            if let Err(e) = task.await {
                warn!(error = %e, "Invocation task failed");
            }
        }
        info!("Gateway stopped");
        Ok(())
    }
}
