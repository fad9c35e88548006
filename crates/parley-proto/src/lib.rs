//! # parley-proto
//!
//! The vocabulary a chat transport and the parley command engine exchange.
//!
//! ## Features
//!
//! - Inbound events: free-text messages, structured command interactions and
//!   component (button/select) interactions
//! - The interaction option tree with its numeric type tags
//! - Outbound payloads (content, ephemeral flag, reply reference)
//! - Capability tokens understood by the platform's permission system
//! - Strongly typed id newtypes
//!
//! Everything here is plain data with `serde` support, so a transport can
//! decode its own wire format into these types and hand them over.
//!
//! ## Quick Start
//!
//! ```rust
//! use parley_proto::{InboundEvent, OptionType};
//!
//! let raw = r#"{
//!     "kind": "interaction",
//!     "id": "1",
//!     "author_id": "42",
//!     "channel_id": "7",
//!     "data": {
//!         "name": "test",
//!         "options": [{ "name": "sub", "type": 1 }]
//!     }
//! }"#;
//!
//! let event: InboundEvent = serde_json::from_str(raw).unwrap();
//! if let InboundEvent::Interaction(interaction) = event {
//!     assert_eq!(interaction.data.options[0].kind, OptionType::SubCommand);
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod capability;
pub mod event;
pub mod id;
pub mod option;
pub mod payload;

pub use self::capability::Capability;
pub use self::event::{CommandData, ComponentEvent, InboundEvent, InteractionEvent, MessageEvent};
pub use self::id::{ChannelId, InteractionId, MessageId, UserId};
pub use self::option::{InteractionOption, OptionType, OptionValue, UnknownOptionType};
pub use self::payload::{OutboundPayload, Reference};
