//! Integration test common infrastructure.
//!
//! Provides a recording transport, a probe handler and a fully wired test
//! bot with a small localization catalog.

pub mod bot;
pub mod transport;

#[allow(unused_imports)]
pub use bot::{ADMIN, BOT, CHANNEL, Probe, TestBot, USER, test_store};
#[allow(unused_imports)]
pub use transport::RecordingTransport;
