//! Platform capability tokens.
//!
//! A capability is a permission the chat platform can grant to a subject
//! (a member or the bot itself) in a channel. The engine never interprets
//! them; it only asks a capability checker whether a subject holds one.
//! Names follow the platform's camelCase permission keys, which also double
//! as the `permissions.<name>` localization keys.

use serde::{Deserialize, Serialize};

/// Known platform capabilities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum Capability {
    /// Full control; implies every other capability on most platforms
    Administrator,
    /// See the channel at all
    ViewChannel,
    /// Post messages
    SendMessages,
    /// Read earlier messages (needed to reply with a reference)
    ReadMessageHistory,
    /// Delete or pin other users' messages
    ManageMessages,
    /// Post link previews
    EmbedLinks,
    /// Upload files
    AttachFiles,
    /// React to messages
    AddReactions,
    /// Use @everyone / @here
    MentionEveryone,
    /// Remove members
    KickMembers,
    /// Ban members
    BanMembers,
    /// Edit channels
    ManageChannels,
    /// Edit roles
    ManageRoles,
    /// Edit server settings
    ManageGuild,
    /// Unknown/custom capability
    Custom(String),
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::Administrator => "administrator",
            Self::ViewChannel => "viewChannel",
            Self::SendMessages => "sendMessages",
            Self::ReadMessageHistory => "readMessageHistory",
            Self::ManageMessages => "manageMessages",
            Self::EmbedLinks => "embedLinks",
            Self::AttachFiles => "attachFiles",
            Self::AddReactions => "addReactions",
            Self::MentionEveryone => "mentionEveryone",
            Self::KickMembers => "kickMembers",
            Self::BanMembers => "banMembers",
            Self::ManageChannels => "manageChannels",
            Self::ManageRoles => "manageRoles",
            Self::ManageGuild => "manageGuild",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "administrator" => Self::Administrator,
            "viewChannel" => Self::ViewChannel,
            "sendMessages" => Self::SendMessages,
            "readMessageHistory" => Self::ReadMessageHistory,
            "manageMessages" => Self::ManageMessages,
            "embedLinks" => Self::EmbedLinks,
            "attachFiles" => Self::AttachFiles,
            "addReactions" => Self::AddReactions,
            "mentionEveryone" => Self::MentionEveryone,
            "kickMembers" => Self::KickMembers,
            "banMembers" => Self::BanMembers,
            "manageChannels" => Self::ManageChannels,
            "manageRoles" => Self::ManageRoles,
            "manageGuild" => Self::ManageGuild,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Capability {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Capability> for String {
    fn from(cap: Capability) -> Self {
        cap.as_ref().to_string()
    }
}
