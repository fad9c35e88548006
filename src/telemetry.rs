//! Telemetry utilities for command timing and event correlation.

use parley_proto::InboundEvent;
use std::time::Instant;
use tracing::debug;

/// Guard for timing a handler run.
///
/// Logs the elapsed time when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(command = %self.command, elapsed_ms, "Command finished");
    }
}

/// Short label for an inbound event, used as a span field.
pub fn event_kind(event: &InboundEvent) -> &'static str {
    match event {
        InboundEvent::Message(_) => "message",
        InboundEvent::Interaction(_) => "interaction",
        InboundEvent::Component(_) => "component",
    }
}

/// Standardized span constructors.
pub mod spans {
    use parley_proto::InboundEvent;
    use tracing::{Level, Span, span};

    /// Span wrapping the processing of one inbound event.
    pub fn event(event: &InboundEvent) -> Span {
        span!(
            Level::DEBUG,
            "bot.event",
            kind = super::event_kind(event),
            author = %event.author_id(),
            channel = %event.channel_id(),
        )
    }

    /// Span wrapping a resolved command's handler.
    pub fn command(path: &str, author: &str) -> Span {
        span!(Level::DEBUG, "bot.command", path = %path, author = %author)
    }
}
