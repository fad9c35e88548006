//! The assembled command tree.
//!
//! Holds the top-level text and interaction commands and offers read-only
//! views for help output and the interaction registration manifest.

use super::builder::{InteractionCommand, TextCommand};
use super::node::{CommandKind, CommandNode, Description, OptionDecl};
use crate::error::TreeError;
use crate::l10n::LocalizationStore;
use parley_proto::OptionType;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Interaction type code of a top-level chat command.
const CHAT_INPUT: u8 = 1;

/// Top-level commands of both flavors.
#[derive(Debug, Default)]
pub struct CommandTree {
    text: Vec<Arc<CommandNode>>,
    interaction: Vec<Arc<CommandNode>>,
}

/// Collects top-level commands for a [`CommandTree`].
#[derive(Default)]
pub struct CommandTreeBuilder {
    text: Vec<TextCommand>,
    interaction: Vec<InteractionCommand>,
}

impl CommandTreeBuilder {
    pub fn text(mut self, command: TextCommand) -> Self {
        self.text.push(command);
        self
    }

    pub fn interaction(mut self, command: InteractionCommand) -> Self {
        self.interaction.push(command);
        self
    }

    /// Validate every command and assemble the tree.
    pub fn build(self) -> Result<CommandTree, TreeError> {
        let text = self
            .text
            .into_iter()
            .map(TextCommand::build)
            .collect::<Result<Vec<_>, _>>()?;
        let interaction = self
            .interaction
            .into_iter()
            .map(InteractionCommand::build)
            .collect::<Result<Vec<_>, _>>()?;

        // Text triggers match case-insensitively at the top level
        let mut seen = HashSet::new();
        for trigger in text.iter().flat_map(|node| node.triggers()) {
            if !seen.insert(trigger.to_lowercase()) {
                return Err(top_level_duplicate(trigger));
            }
        }
        let mut seen = HashSet::new();
        for node in &interaction {
            if !seen.insert(node.name()) {
                return Err(top_level_duplicate(node.name()));
            }
        }

        info!(
            text = text.len(),
            interaction = interaction.len(),
            "Command tree assembled"
        );
        Ok(CommandTree { text, interaction })
    }
}

fn top_level_duplicate(trigger: &str) -> TreeError {
    TreeError::DuplicateTrigger {
        parent: "<root>".to_owned(),
        trigger: trigger.to_owned(),
    }
}

impl CommandTree {
    pub fn builder() -> CommandTreeBuilder {
        CommandTreeBuilder::default()
    }

    /// Top-level text command whose name or alias matches `trigger`,
    /// ignoring case.
    pub fn find_text(&self, trigger: &str) -> Option<&Arc<CommandNode>> {
        let trigger = trigger.to_lowercase();
        self.text
            .iter()
            .find(|node| node.triggers().any(|t| t.to_lowercase() == trigger))
    }

    /// Top-level interaction command named `name`.
    pub fn find_interaction(&self, name: &str) -> Option<&Arc<CommandNode>> {
        self.interaction.iter().find(|node| node.name() == name)
    }

    pub fn text_commands(&self) -> &[Arc<CommandNode>] {
        &self.text
    }

    pub fn interaction_commands(&self) -> &[Arc<CommandNode>] {
        &self.interaction
    }

    /// Summaries of every command, text commands first.
    pub fn view(&self) -> Vec<CommandView> {
        self.text
            .iter()
            .chain(&self.interaction)
            .map(|node| CommandView::of(node))
            .collect()
    }

    /// Registration payload for the interaction commands.
    ///
    /// Descriptions are rendered in the store's default locale; other
    /// locales go to `description_localizations`.
    pub fn deploy_manifest(&self, store: &LocalizationStore) -> Value {
        Value::Array(
            self.interaction
                .iter()
                .map(|node| node_manifest(node, store, true))
                .collect(),
        )
    }
}

/// Read-only summary of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    pub name: String,
    pub path: String,
    pub kind: CommandKind,
    pub description: Description,
    pub aliases: Vec<String>,
    /// Help category of text commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub usage_examples: Vec<String>,
    pub admin_only: bool,
    pub hidden: bool,
    pub invocation_count: u64,
    pub children: Vec<CommandView>,
}

impl CommandView {
    pub fn of(node: &CommandNode) -> Self {
        let text = node.text_spec();
        Self {
            name: node.name().to_owned(),
            path: node.path(),
            kind: node.command_kind(),
            description: node.description().clone(),
            aliases: text.map(|t| t.aliases.clone()).unwrap_or_default(),
            category: text.map(|t| t.category.clone()),
            usage_examples: text.map(|t| t.usage_examples.clone()).unwrap_or_default(),
            admin_only: node.is_admin_only(),
            hidden: node.is_hidden(),
            invocation_count: node.invocation_count(),
            children: node.children().iter().map(|c| Self::of(c)).collect(),
        }
    }

    /// Invocations of this command and everything below it.
    pub fn total_invocations(&self) -> u64 {
        self.invocation_count
            + self
                .children
                .iter()
                .map(CommandView::total_invocations)
                .sum::<u64>()
    }
}

fn node_manifest(node: &CommandNode, store: &LocalizationStore, root: bool) -> Value {
    let kind = if node.is_group() {
        OptionType::SubCommandGroup.code()
    } else if root {
        CHAT_INPUT
    } else {
        OptionType::SubCommand.code()
    };

    let options: Vec<Value> = if node.children().is_empty() {
        node.interaction_spec()
            .map(|spec| spec.options.iter().map(|o| option_manifest(o, store)).collect())
            .unwrap_or_default()
    } else {
        node.children()
            .iter()
            .map(|child| node_manifest(child, store, false))
            .collect()
    };

    let mut manifest = Map::new();
    manifest.insert("name".into(), json!(node.name()));
    insert_description(&mut manifest, node.description(), store);
    manifest.insert("type".into(), json!(kind));
    manifest.insert("options".into(), Value::Array(options));
    Value::Object(manifest)
}

fn option_manifest(option: &OptionDecl, store: &LocalizationStore) -> Value {
    let mut manifest = Map::new();
    manifest.insert("name".into(), json!(option.name));
    insert_description(&mut manifest, &option.description, store);
    manifest.insert("type".into(), json!(option.kind.code()));
    manifest.insert("required".into(), json!(option.required));
    Value::Object(manifest)
}

fn insert_description(manifest: &mut Map<String, Value>, description: &Description, store: &LocalizationStore) {
    let default_locale = store.default_locale();
    manifest.insert(
        "description".into(),
        json!(description.resolve(store, default_locale)),
    );

    let Description::Localized(key) = description else {
        return;
    };
    let Ok(rendered) = store.render_all(key, &[]) else {
        return;
    };

    let localizations: Map<String, Value> = rendered
        .into_iter()
        .filter(|(locale, _)| locale != default_locale)
        .map(|(locale, text)| (locale, Value::String(text)))
        .collect();
    if !localizations.is_empty() {
        manifest.insert(
            "description_localizations".into(),
            Value::Object(localizations),
        );
    }
}
