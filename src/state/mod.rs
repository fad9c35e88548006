//! Shared bot state.
//!
//! [`BotState`] is built once at startup and shared by every invocation
//! behind an `Arc`.

mod admins;
mod plugins;

pub use admins::{AdminRoster, AdminSnapshot};
pub use plugins::{PluginHandle, PluginRole, Plugins};

use crate::caps::PermissionGate;
use crate::handlers::core::traits::Transport;
use std::sync::Arc;

/// Everything an invocation can reach.
pub struct BotState {
    /// Command prefix for text commands.
    pub prefix: String,
    /// Outbound side of the platform connection.
    pub transport: Arc<dyn Transport>,
    /// Permission checks, including the bot's own subject id.
    pub gate: PermissionGate,
    pub admins: AdminRoster,
    pub plugins: Plugins,
}

impl BotState {
    pub fn new(
        prefix: impl Into<String>,
        transport: Arc<dyn Transport>,
        gate: PermissionGate,
        admins: AdminRoster,
        plugins: Plugins,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            transport,
            gate,
            admins,
            plugins,
        }
    }
}
