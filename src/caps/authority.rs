//! The permission gate.
//!
//! [`PermissionGate`] decides whether an invocation may enter a command
//! node. It is the only place that issues [`Clearance`] tokens. Checks run
//! in a fixed order and stop at the first failure:
//!
//! 1. admin-only nodes refuse non-admin callers
//! 2. the bot must hold every required bot capability in the channel
//! 3. non-admin callers must hold every required user capability
//!
//! The gate never changes the node or the context, so checking twice gives
//! the same answer.

use super::tokens::Clearance;
use crate::commands::CommandNode;
use crate::error::PermissionDenied;
use crate::handlers::core::context::InvocationContext;
use async_trait::async_trait;
use parley_proto::{Capability, ChannelId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Answers capability questions for a subject in a channel.
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    async fn has_capability(
        &self,
        subject: &UserId,
        channel: &ChannelId,
        capability: &Capability,
    ) -> bool;
}

/// Evaluates node requirements against the capability checker.
#[derive(Clone)]
pub struct PermissionGate {
    bot_id: UserId,
    checker: Arc<dyn CapabilityChecker>,
}

impl PermissionGate {
    #[inline]
    pub fn new(bot_id: UserId, checker: Arc<dyn CapabilityChecker>) -> Self {
        Self { bot_id, checker }
    }

    /// The bot's own subject id.
    pub fn bot_id(&self) -> &UserId {
        &self.bot_id
    }

    /// Check whether `ctx` may enter `node`.
    pub async fn check(
        &self,
        node: &CommandNode,
        ctx: &InvocationContext,
    ) -> Result<Clearance, PermissionDenied> {
        let path = node.path();
        let author = ctx.author_id();
        let channel = ctx.channel_id();

        if node.is_admin_only() && !ctx.is_admin() {
            self.log_denial(&path, author, "admin_only");
            return Err(PermissionDenied::admin_only());
        }

        let missing = self
            .missing(&self.bot_id, channel, node.required_bot_capabilities())
            .await;
        if !missing.is_empty() {
            self.log_denial(&path, &self.bot_id, "no_bot_permissions");
            return Err(PermissionDenied::bot(missing));
        }

        if !ctx.is_admin() {
            let missing = self
                .missing(author, channel, node.required_user_capabilities())
                .await;
            if !missing.is_empty() {
                self.log_denial(&path, author, "no_user_permissions");
                return Err(PermissionDenied::user(missing));
            }
        }

        debug!(command = %path, user = %author, admin = ctx.is_admin(), "Command cleared");
        Ok(Clearance::new(path, ctx.is_admin()))
    }

    /// Whether the bot itself holds `capability` in `channel`.
    pub async fn bot_has(&self, channel: &ChannelId, capability: &Capability) -> bool {
        self.checker
            .has_capability(&self.bot_id, channel, capability)
            .await
    }

    /// The unmet subset of `required`, in capability order.
    async fn missing(
        &self,
        subject: &UserId,
        channel: &ChannelId,
        required: &BTreeSet<Capability>,
    ) -> Vec<Capability> {
        let mut missing = Vec::new();
        for capability in required {
            if !self
                .checker
                .has_capability(subject, channel, capability)
                .await
            {
                missing.push(capability.clone());
            }
        }
        missing
    }

    fn log_denial(&self, path: &str, subject: &UserId, reason: &str) {
        trace!(command = %path, subject = %subject, reason, "Command denied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandTree, TextCommand};
    use crate::components::ComponentRouter;
    use crate::error::DenyReason;
    use crate::handlers::core::{InvocationContext, Origin};
    use crate::l10n::LocalizationStore;
    use crate::network::{ConsoleTransport, OpenCapabilities};
    use crate::state::{AdminRoster, BotState, Plugins};
    use parley_proto::MessageEvent;

    const BOT: &str = "bot";
    const ADMIN: &str = "admin";
    const USER: &str = "user";

    fn gate(capabilities: OpenCapabilities) -> PermissionGate {
        PermissionGate::new(UserId::from(BOT), Arc::new(capabilities))
    }

    fn context(author: &str, gate: PermissionGate) -> InvocationContext {
        let plugins = Plugins::new(
            Arc::new(LocalizationStore::empty("en_US")),
            Arc::new(CommandTree::default()),
            Arc::new(ComponentRouter::new()),
        );
        let state = BotState::new(
            "!",
            Arc::new(ConsoleTransport::new(Vec::<u8>::new())),
            gate,
            AdminRoster::new([UserId::from(ADMIN)]),
            plugins,
        );
        let message = MessageEvent {
            id: "1".into(),
            author_id: author.into(),
            channel_id: "general".into(),
            content: "!kick".into(),
            mentioned_user_ids: Vec::new(),
        };
        InvocationContext::new(Origin::Message(message), Arc::new(state))
    }

    fn kick() -> Arc<CommandNode> {
        TextCommand::new("kick")
            .bot_capability(Capability::SendMessages)
            .bot_capability(Capability::KickMembers)
            .user_capability(Capability::KickMembers)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_check_is_idempotent() {
        let gate = gate(OpenCapabilities::new());
        let ctx = context(USER, gate.clone());
        let node = kick();
        let before = node.required_bot_capabilities().clone();

        let first = gate.check(&node, &ctx).await.unwrap();
        let second = gate.check(&node, &ctx).await.unwrap();

        assert_eq!(first.path(), second.path());
        assert_eq!(first.as_admin(), second.as_admin());
        assert_eq!(node.required_bot_capabilities(), &before);
        let sends = node
            .required_bot_capabilities()
            .iter()
            .filter(|c| **c == Capability::SendMessages)
            .count();
        assert_eq!(sends, 1);
    }

    #[tokio::test]
    async fn test_repeated_denial_is_identical() {
        let gate = gate(OpenCapabilities::new().deny(USER, Capability::KickMembers));
        let ctx = context(USER, gate.clone());
        let node = kick();

        let first = gate.check(&node, &ctx).await.unwrap_err();
        let second = gate.check(&node, &ctx).await.unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first, PermissionDenied::user(vec![Capability::KickMembers]));
    }

    #[tokio::test]
    async fn test_bot_checked_before_user() {
        let gate = gate(
            OpenCapabilities::new()
                .deny(BOT, Capability::KickMembers)
                .deny(USER, Capability::KickMembers),
        );
        let ctx = context(USER, gate.clone());

        let denied = gate.check(&kick(), &ctx).await.unwrap_err();
        assert_eq!(denied, PermissionDenied::bot(vec![Capability::KickMembers]));
    }

    #[tokio::test]
    async fn test_admin_skips_user_capabilities() {
        let gate = gate(OpenCapabilities::new().deny(ADMIN, Capability::KickMembers));
        let ctx = context(ADMIN, gate.clone());

        let clearance = gate.check(&kick(), &ctx).await.unwrap();
        assert_eq!(clearance.path(), "kick");
        assert!(clearance.as_admin());
    }

    #[tokio::test]
    async fn test_admin_only_denial_lists_nothing() {
        let gate = gate(OpenCapabilities::new().deny(BOT, Capability::SendMessages));
        let node = TextCommand::new("dev").admin_only().build().unwrap();

        let denied = gate.check(&node, &context(USER, gate.clone())).await.unwrap_err();
        assert_eq!(denied.reason, DenyReason::AdminOnly);
        assert!(denied.missing.is_empty());
        assert_eq!(denied.reply_key(), None);

        // Admins pass the admin-only check but the bot still needs its capabilities
        let denied = gate.check(&node, &context(ADMIN, gate.clone())).await.unwrap_err();
        assert_eq!(denied, PermissionDenied::bot(vec![Capability::SendMessages]));
    }
}
