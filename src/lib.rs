//! parley - command resolution and localized replies for chat bots.
//!
//! Inbound events from a transport pass through a priority-ordered
//! middleware pipeline, are resolved against a tree of text and interaction
//! commands with a permission gate at every level, and end in at most one
//! handler run. Replies are rendered from a namespaced localization store
//! with positional and plural placeholders.

pub mod caps;
pub mod commands;
pub mod components;
pub mod config;
pub mod error;
pub mod handlers;
pub mod l10n;
pub mod network;
pub mod state;
pub mod telemetry;
