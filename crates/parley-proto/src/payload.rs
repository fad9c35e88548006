//! Outbound message payloads.

use crate::id::{InteractionId, MessageId};
use serde::{Deserialize, Serialize};

/// What a reply is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", content = "id", rename_all = "snake_case")]
pub enum Reference {
    /// Reply to a message (shown as a quote by most clients).
    Message(MessageId),
    /// Response to a command interaction.
    Interaction(InteractionId),
}

/// A message the bot sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutboundPayload {
    /// Text body.
    pub content: String,
    /// Only visible to the invoking user (interactions only).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ephemeral: bool,
    /// Reply target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl OutboundPayload {
    /// A plain text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Mark the payload as only visible to the invoker.
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Attach the payload to a message or interaction.
    pub fn replying_to(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }
}

impl From<&str> for OutboundPayload {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for OutboundPayload {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}
