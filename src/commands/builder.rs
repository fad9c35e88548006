//! Typed command builders.
//!
//! A [`TextCommand`] only accepts text subcommands and an
//! [`InteractionCommand`] only interaction subcommands, so a node's kind is
//! fixed by the builder it came from and every descendant shares it.
//! `build` validates the whole subtree before anything is allocated.

use super::node::{
    CommandNode, Description, FlagSpec, InteractionSpec, NodeKind, OptionDecl, PositionalArg,
    TextSpec,
};
use crate::error::TreeError;
use crate::handlers::core::traits::CommandHandler;
use parley_proto::Capability;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Weak};

/// Attributes every builder shares.
#[derive(Default)]
struct Common {
    name: String,
    description: Description,
    user_capabilities: BTreeSet<Capability>,
    bot_capabilities: BTreeSet<Capability>,
    admin_only: bool,
    hidden: bool,
    handler: Option<Arc<dyn CommandHandler>>,
}

impl Common {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn into_node(
        mut self,
        kind: NodeKind,
        parent: Weak<CommandNode>,
        children: Vec<Arc<CommandNode>>,
    ) -> CommandNode {
        // Every reply needs it; a set keeps the union idempotent
        self.bot_capabilities.insert(Capability::SendMessages);

        CommandNode {
            name: self.name,
            description: self.description,
            user_capabilities: self.user_capabilities,
            bot_capabilities: self.bot_capabilities,
            admin_only: self.admin_only,
            hidden: self.hidden,
            kind,
            children,
            parent,
            handler: self.handler,
            invocations: AtomicU64::new(0),
        }
    }
}

macro_rules! common_setters {
    () => {
        pub fn description(mut self, description: impl Into<Description>) -> Self {
            self.common.description = description.into();
            self
        }

        /// Description rendered from a `"namespace.key"` localization key.
        pub fn localized_description(mut self, key: impl Into<String>) -> Self {
            self.common.description = Description::Localized(key.into());
            self
        }

        pub fn user_capability(mut self, capability: Capability) -> Self {
            self.common.user_capabilities.insert(capability);
            self
        }

        pub fn bot_capability(mut self, capability: Capability) -> Self {
            self.common.bot_capabilities.insert(capability);
            self
        }

        pub fn admin_only(mut self) -> Self {
            self.common.admin_only = true;
            self
        }

        pub fn hidden(mut self) -> Self {
            self.common.hidden = true;
            self
        }

        pub fn handler(mut self, handler: impl CommandHandler + 'static) -> Self {
            self.common.handler = Some(Arc::new(handler));
            self
        }
    };
}

// ============================================================================
// Text commands
// ============================================================================

/// Builder for a text command and its subcommands.
pub struct TextCommand {
    common: Common,
    spec: TextSpec,
    children: Vec<TextCommand>,
}

impl TextCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: Common::named(name),
            spec: TextSpec::default(),
            children: Vec::new(),
        }
    }

    common_setters!();

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.push(alias.into());
        self
    }

    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.spec.grammar.args.push(PositionalArg::new(name));
        self
    }

    /// The last argument, taking all remaining words.
    pub fn remainder(mut self, name: impl Into<String>) -> Self {
        self.spec.grammar.args.push(PositionalArg::remainder(name));
        self
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.spec.grammar.flags.push(flag);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.spec.category = category.into();
        self
    }

    pub fn usage_example(mut self, example: impl Into<String>) -> Self {
        self.spec.usage_examples.push(example.into());
        self
    }

    pub fn args_help(mut self, help: impl Into<String>) -> Self {
        self.spec.args_help = help.into();
        self
    }

    pub fn subcommand(mut self, child: TextCommand) -> Self {
        self.children.push(child);
        self
    }

    /// Validate and assemble this command as a tree root.
    pub fn build(self) -> Result<Arc<CommandNode>, TreeError> {
        self.validate()?;
        Ok(self.assemble(Weak::new()))
    }

    pub(super) fn triggers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.common.name.as_str()).chain(self.spec.aliases.iter().map(String::as_str))
    }

    fn validate(&self) -> Result<(), TreeError> {
        if self.common.name.trim().is_empty() {
            return Err(TreeError::EmptyName);
        }

        let args = &self.spec.grammar.args;
        if let Some(pos) = args.iter().position(|a| a.consumes_remainder)
            && pos + 1 != args.len()
        {
            return Err(TreeError::RemainderNotLast {
                command: self.common.name.clone(),
                arg: args[pos].name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for child in &self.children {
            for trigger in child.triggers() {
                if !seen.insert(trigger) {
                    return Err(TreeError::DuplicateTrigger {
                        parent: self.common.name.clone(),
                        trigger: trigger.to_owned(),
                    });
                }
            }
            child.validate()?;
        }
        Ok(())
    }

    fn assemble(self, parent: Weak<CommandNode>) -> Arc<CommandNode> {
        let Self {
            mut common,
            spec,
            children,
        } = self;
        if common.admin_only {
            common.hidden = true;
        }

        Arc::new_cyclic(|me| {
            let children = children
                .into_iter()
                .map(|child| child.assemble(me.clone()))
                .collect();
            common.into_node(NodeKind::Text(spec), parent, children)
        })
    }
}

// ============================================================================
// Interaction commands
// ============================================================================

/// Builder for an interaction command, subcommand group or subcommand.
///
/// Interaction trees nest at most `root > group > subcommand`, and groups
/// only sit directly under a root.
pub struct InteractionCommand {
    common: Common,
    spec: InteractionSpec,
    children: Vec<InteractionCommand>,
}

impl InteractionCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: Common::named(name),
            spec: InteractionSpec::default(),
            children: Vec::new(),
        }
    }

    /// A subcommand group.
    pub fn group(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.spec.is_group = true;
        builder
    }

    common_setters!();

    pub fn option(mut self, option: OptionDecl) -> Self {
        self.spec.options.push(option);
        self
    }

    pub fn subcommand(mut self, child: InteractionCommand) -> Self {
        self.children.push(child);
        self
    }

    /// Validate and assemble this command as a tree root.
    pub fn build(self) -> Result<Arc<CommandNode>, TreeError> {
        self.validate(0)?;
        Ok(self.assemble(Weak::new()))
    }

    pub(super) fn name(&self) -> &str {
        &self.common.name
    }

    fn validate(&self, depth: usize) -> Result<(), TreeError> {
        let name = &self.common.name;
        if name.trim().is_empty() {
            return Err(TreeError::EmptyName);
        }
        if self.spec.is_group && depth != 1 {
            return Err(TreeError::MisplacedGroup {
                command: name.clone(),
            });
        }

        // Only a root, or a group under it, may route further
        let may_route = depth == 0 || self.spec.is_group;
        if !self.children.is_empty() && !may_route {
            return Err(TreeError::NestingTooDeep {
                command: name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for child in &self.children {
            if !seen.insert(child.name()) {
                return Err(TreeError::DuplicateTrigger {
                    parent: name.clone(),
                    trigger: child.name().to_owned(),
                });
            }
            child.validate(depth + 1)?;
        }
        Ok(())
    }

    fn assemble(self, parent: Weak<CommandNode>) -> Arc<CommandNode> {
        let Self {
            common,
            spec,
            children,
        } = self;

        Arc::new_cyclic(|me| {
            let children = children
                .into_iter()
                .map(|child| child.assemble(me.clone()))
                .collect();
            common.into_node(NodeKind::Interaction(spec), parent, children)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::node::CommandKind;

    #[test]
    fn test_parent_links_and_path() {
        let dev = TextCommand::new("dev")
            .admin_only()
            .subcommand(TextCommand::new("eval").remainder("code"))
            .build()
            .unwrap();

        let eval = &dev.children()[0];
        assert_eq!(eval.path(), "dev eval");
        assert_eq!(eval.depth(), 1);
        assert_eq!(eval.parent().unwrap().name(), "dev");
        assert_eq!(eval.command_kind(), CommandKind::Text);
        assert!(dev.is_hidden(), "admin-only text commands are hidden");
    }

    #[test]
    fn test_send_messages_added_once() {
        let node = TextCommand::new("say")
            .bot_capability(Capability::SendMessages)
            .bot_capability(Capability::EmbedLinks)
            .build()
            .unwrap();
        let caps: Vec<_> = node.required_bot_capabilities().iter().cloned().collect();
        assert_eq!(
            caps.iter().filter(|c| **c == Capability::SendMessages).count(),
            1
        );
        assert!(caps.contains(&Capability::EmbedLinks));
    }

    #[test]
    fn test_duplicate_trigger_rejected() {
        let err = TextCommand::new("root")
            .subcommand(TextCommand::new("a").alias("x"))
            .subcommand(TextCommand::new("x"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateTrigger {
                parent: "root".into(),
                trigger: "x".into()
            }
        );
    }

    #[test]
    fn test_remainder_must_be_last() {
        let err = TextCommand::new("say")
            .remainder("text")
            .arg("target")
            .build()
            .unwrap_err();
        assert!(matches!(err, TreeError::RemainderNotLast { .. }));
    }

    #[test]
    fn test_interaction_nesting_rules() {
        assert!(
            InteractionCommand::new("test")
                .subcommand(InteractionCommand::group("g").subcommand(InteractionCommand::new("s")))
                .subcommand(InteractionCommand::new("sub"))
                .build()
                .is_ok()
        );

        let err = InteractionCommand::new("test")
            .subcommand(InteractionCommand::new("sub").subcommand(InteractionCommand::new("x")))
            .build()
            .unwrap_err();
        assert!(matches!(err, TreeError::NestingTooDeep { .. }));

        let err = InteractionCommand::group("g").build().unwrap_err();
        assert!(matches!(err, TreeError::MisplacedGroup { .. }));

        let err = InteractionCommand::new("test")
            .subcommand(InteractionCommand::group("g").subcommand(InteractionCommand::group("h")))
            .build()
            .unwrap_err();
        assert!(matches!(err, TreeError::MisplacedGroup { .. }));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(TextCommand::new(" ").build().unwrap_err(), TreeError::EmptyName);
    }
}
