//! Statically typed plugin handles.
//!
//! The bot has a closed set of plugin roles. Each role maps to one concrete
//! handle, resolved when the bot starts.

use crate::commands::CommandTree;
use crate::components::ComponentRouter;
use crate::l10n::LocalizationStore;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The roles a plugin can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginRole {
    Localization,
    Commands,
    Components,
}

impl PluginRole {
    pub const ALL: [PluginRole; 3] = [Self::Localization, Self::Commands, Self::Components];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localization => "l10n",
            Self::Commands => "commands",
            Self::Components => "components",
        }
    }
}

impl fmt::Display for PluginRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed handle for one role.
#[derive(Clone, Copy)]
pub enum PluginHandle<'a> {
    Localization(&'a Arc<LocalizationStore>),
    Commands(&'a Arc<CommandTree>),
    Components(&'a Arc<ComponentRouter>),
}

impl PluginHandle<'_> {
    pub fn role(&self) -> PluginRole {
        match self {
            Self::Localization(_) => PluginRole::Localization,
            Self::Commands(_) => PluginRole::Commands,
            Self::Components(_) => PluginRole::Components,
        }
    }
}

/// The bot's plugins, one per role.
#[derive(Clone)]
pub struct Plugins {
    localization: Arc<LocalizationStore>,
    commands: Arc<CommandTree>,
    components: Arc<ComponentRouter>,
}

impl Plugins {
    pub fn new(
        localization: Arc<LocalizationStore>,
        commands: Arc<CommandTree>,
        components: Arc<ComponentRouter>,
    ) -> Self {
        Self {
            localization,
            commands,
            components,
        }
    }

    pub fn localization(&self) -> &Arc<LocalizationStore> {
        &self.localization
    }

    pub fn commands(&self) -> &Arc<CommandTree> {
        &self.commands
    }

    pub fn components(&self) -> &Arc<ComponentRouter> {
        &self.components
    }

    pub fn get(&self, role: PluginRole) -> PluginHandle<'_> {
        match role {
            PluginRole::Localization => PluginHandle::Localization(&self.localization),
            PluginRole::Commands => PluginHandle::Commands(&self.commands),
            PluginRole::Components => PluginHandle::Components(&self.components),
        }
    }

    /// Every role with its handle.
    pub fn iter(&self) -> impl Iterator<Item = PluginHandle<'_>> {
        PluginRole::ALL.into_iter().map(|role| self.get(role))
    }
}
