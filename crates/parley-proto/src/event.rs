//! Inbound events delivered by a transport.

use crate::id::{ChannelId, InteractionId, MessageId, UserId};
use crate::option::InteractionOption;
use serde::{Deserialize, Serialize};

/// A plain chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Message id.
    pub id: MessageId,
    /// Author.
    pub author_id: UserId,
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// Raw text.
    pub content: String,
    /// Users mentioned in the text.
    #[serde(default)]
    pub mentioned_user_ids: Vec<UserId>,
}

/// The command part of an interaction: root name plus option tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    /// Root command name.
    pub name: String,
    /// Option tree.
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// A structured command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Interaction id (used to acknowledge).
    pub id: InteractionId,
    /// Invoking user.
    pub author_id: UserId,
    /// Channel the command was used in.
    pub channel_id: ChannelId,
    /// Client locale reported by the platform, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Command name and options.
    pub data: CommandData,
}

/// A click on a button or a select-menu choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEvent {
    /// Interaction id.
    pub id: InteractionId,
    /// Clicking user.
    pub author_id: UserId,
    /// Channel of the message carrying the component.
    pub channel_id: ChannelId,
    /// Developer-assigned component id.
    pub custom_id: String,
    /// Selected values (select menus only).
    #[serde(default)]
    pub values: Vec<String>,
}

/// Any event a transport can deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Free-text message.
    Message(MessageEvent),
    /// Command interaction.
    Interaction(InteractionEvent),
    /// Component interaction.
    Component(ComponentEvent),
}

impl InboundEvent {
    /// Channel the event happened in.
    pub fn channel_id(&self) -> &ChannelId {
        match self {
            Self::Message(m) => &m.channel_id,
            Self::Interaction(i) => &i.channel_id,
            Self::Component(c) => &c.channel_id,
        }
    }

    /// User who caused the event.
    pub fn author_id(&self) -> &UserId {
        match self {
            Self::Message(m) => &m.author_id,
            Self::Interaction(i) => &i.author_id,
            Self::Component(c) => &c.author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_event_roundtrip_shape() {
        let raw = r#"{"kind":"message","id":"m1","author_id":"u1","channel_id":"c1","content":"!ping"}"#;
        let event: InboundEvent = serde_json::from_str(raw).unwrap();
        match &event {
            InboundEvent::Message(m) => {
                assert_eq!(m.content, "!ping");
                assert!(m.mentioned_user_ids.is_empty());
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(event.author_id().as_str(), "u1");
    }

    #[test]
    fn test_interaction_locale_optional() {
        let raw = r#"{"kind":"interaction","id":"i1","author_id":"u1","channel_id":"c1","data":{"name":"test"}}"#;
        let event: InboundEvent = serde_json::from_str(raw).unwrap();
        let InboundEvent::Interaction(i) = event else {
            panic!("expected interaction");
        };
        assert!(i.locale.is_none());
        assert!(i.data.options.is_empty());
    }
}
