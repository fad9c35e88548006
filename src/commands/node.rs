//! Command tree nodes.
//!
//! Every command, subcommand and subcommand group is a [`CommandNode`]. The
//! shared attributes live on the node itself; what differs between text and
//! interaction commands is carried by [`NodeKind`].

use crate::handlers::core::traits::CommandHandler;
use crate::l10n::LocalizationStore;
use parley_proto::{Capability, OptionType};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Help text of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Description {
    /// Shown as is.
    Plain(String),
    /// A `"namespace.key"` rendered from the localization store.
    Localized(String),
}

impl Description {
    /// Text for `locale`. A localized description whose key is missing
    /// renders as the key itself.
    pub fn resolve(&self, store: &LocalizationStore, locale: &str) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Localized(key) => store
                .render(key, locale, &[])
                .unwrap_or_else(|_| key.clone()),
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for Description {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for Description {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

/// A positional argument of a text command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalArg {
    pub name: String,
    /// Takes every remaining token, joined with single spaces.
    pub consumes_remainder: bool,
}

impl PositionalArg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            consumes_remainder: false,
        }
    }

    pub fn remainder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            consumes_remainder: true,
        }
    }
}

/// A flag of a text command: `--name` or `-alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSpec {
    pub name: String,
    pub aliases: Vec<String>,
    /// Takes the following token as its value.
    pub accepts_value: bool,
}

impl FlagSpec {
    /// A flag that is either present or not.
    pub fn switch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            accepts_value: false,
        }
    }

    /// A flag followed by a value token.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            accepts_value: true,
            ..Self::switch(name)
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Flags and positional arguments a text command accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextGrammar {
    pub flags: Vec<FlagSpec>,
    pub args: Vec<PositionalArg>,
}

/// Text-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpec {
    pub aliases: Vec<String>,
    pub grammar: TextGrammar,
    /// Help grouping.
    pub category: String,
    pub usage_examples: Vec<String>,
    pub args_help: String,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            aliases: Vec::new(),
            grammar: TextGrammar::default(),
            category: "misc".to_owned(),
            usage_examples: Vec::new(),
            args_help: String::new(),
        }
    }
}

/// A declared option of an interaction command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    pub name: String,
    pub kind: OptionType,
    pub description: Description,
    pub required: bool,
}

impl OptionDecl {
    pub fn new(name: impl Into<String>, kind: OptionType, description: impl Into<Description>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Interaction-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSpec {
    /// Pure routing layer between a root and its subcommands.
    pub is_group: bool,
    pub options: Vec<OptionDecl>,
}

/// Flavor of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Text(TextSpec),
    Interaction(InteractionSpec),
}

/// The flavor tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Text,
    Interaction,
}

/// One command in the tree.
///
/// Nodes are assembled once through the builders in
/// [`builder`](super::builder) and never change shape afterwards. The only
/// mutable part is the invocation counter.
pub struct CommandNode {
    pub(super) name: String,
    pub(super) description: Description,
    pub(super) user_capabilities: BTreeSet<Capability>,
    pub(super) bot_capabilities: BTreeSet<Capability>,
    pub(super) admin_only: bool,
    pub(super) hidden: bool,
    pub(super) kind: NodeKind,
    pub(super) children: Vec<Arc<CommandNode>>,
    pub(super) parent: Weak<CommandNode>,
    pub(super) handler: Option<Arc<dyn CommandHandler>>,
    pub(super) invocations: AtomicU64,
}

impl CommandNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Capabilities the invoking user needs in the channel.
    pub fn required_user_capabilities(&self) -> &BTreeSet<Capability> {
        &self.user_capabilities
    }

    /// Capabilities the bot needs in the channel. Always contains
    /// [`Capability::SendMessages`].
    pub fn required_bot_capabilities(&self) -> &BTreeSet<Capability> {
        &self.bot_capabilities
    }

    pub fn is_admin_only(&self) -> bool {
        self.admin_only
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn command_kind(&self) -> CommandKind {
        match self.kind {
            NodeKind::Text(_) => CommandKind::Text,
            NodeKind::Interaction(_) => CommandKind::Interaction,
        }
    }

    pub fn text_spec(&self) -> Option<&TextSpec> {
        match &self.kind {
            NodeKind::Text(spec) => Some(spec),
            NodeKind::Interaction(_) => None,
        }
    }

    pub fn interaction_spec(&self) -> Option<&InteractionSpec> {
        match &self.kind {
            NodeKind::Interaction(spec) => Some(spec),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.interaction_spec().is_some_and(|spec| spec.is_group)
    }

    pub fn children(&self) -> &[Arc<CommandNode>] {
        &self.children
    }

    pub fn parent(&self) -> Option<Arc<CommandNode>> {
        self.parent.upgrade()
    }

    pub fn handler(&self) -> Option<&Arc<dyn CommandHandler>> {
        self.handler.as_ref()
    }

    /// Name plus aliases for text nodes, the name alone otherwise.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        let aliases = self
            .text_spec()
            .map(|spec| spec.aliases.as_slice())
            .unwrap_or_default();
        std::iter::once(self.name.as_str()).chain(aliases.iter().map(String::as_str))
    }

    /// Child whose name or alias is exactly `token`.
    pub fn child_by_trigger(&self, token: &str) -> Option<&Arc<CommandNode>> {
        self.children
            .iter()
            .find(|child| child.triggers().any(|t| t == token))
    }

    /// Child named exactly `name`.
    pub fn child(&self, name: &str) -> Option<&Arc<CommandNode>> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Space separated names from the root down to this node, e.g. `dev eval`.
    pub fn path(&self) -> String {
        let mut names = vec![self.name.clone()];
        let mut current = self.parent.upgrade();
        while let Some(node) = current {
            names.push(node.name.clone());
            current = node.parent.upgrade();
        }
        names.reverse();
        names.join(" ")
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.upgrade();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.upgrade();
        }
        depth
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Count one handler run; returns the new total.
    pub(crate) fn record_invocation(&self) -> u64 {
        self.invocations.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("path", &self.path())
            .field("kind", &self.command_kind())
            .field("admin_only", &self.admin_only)
            .field("has_handler", &self.handler.is_some())
            .field(
                "children",
                &self.children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
