//! Identifier newtypes.
//!
//! Platforms hand out opaque string ids (snowflakes, UUIDs, ...). Wrapping
//! them keeps a user id from being passed where a channel id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(
        $(#[$meta:meta])*
        $name:ident
    ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                /// Wrap a raw id.
                pub fn new(raw: impl Into<String>) -> Self {
                    Self(raw.into())
                }

                /// Borrow the raw id.
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

string_id! {
    /// A user (or the bot's own account).
    UserId,
    /// A text channel.
    ChannelId,
    /// A message.
    MessageId,
    /// A command or component interaction.
    InteractionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_transparent_strings() {
        let id = UserId::from("1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1234\"");
        let back: ChannelId = serde_json::from_str("\"99\"").unwrap();
        assert_eq!(back.as_str(), "99");
        assert_eq!(back.to_string(), "99");
    }
}
