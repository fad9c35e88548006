//! Network module.
//!
//! Contains the console Gateway (inbound events) and its connection
//! (outbound transport and capability lookups).

mod connection;
mod gateway;

pub use connection::{ConsoleTransport, OpenCapabilities, format_payload};
pub use gateway::Gateway;
