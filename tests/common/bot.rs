//! A fully wired bot for dispatch tests.

use super::transport::RecordingTransport;
use async_trait::async_trait;
use parking_lot::Mutex;
use parley::caps::PermissionGate;
use parley::commands::CommandTree;
use parley::components::ComponentRouter;
use parley::error::{DispatchError, HandlerResult};
use parley::handlers::core::{CommandHandler, Dispatched, Dispatcher, InvocationContext};
use parley::l10n::{LocalizationStore, StaticSource};
use parley::network::OpenCapabilities;
use parley::state::{AdminRoster, BotState, Plugins};
use parley_proto::{
    CommandData, ComponentEvent, InboundEvent, InteractionEvent, InteractionOption, MessageEvent,
    UserId,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub const BOT: &str = "bot";
pub const ADMIN: &str = "admin";
pub const USER: &str = "user";
pub const CHANNEL: &str = "general";

/// Catalog used by every dispatch test.
pub fn test_store() -> LocalizationStore {
    let source = StaticSource::default()
        .with("en_US", "common.NO_BOT_PERMISSIONS_ERROR", "I need: {0}")
        .with("en_US", "common.NO_USER_PERMISSIONS_ERROR", "You need: {0}")
        .with("en_US", "common.PONG", "pong")
        .with("en_US", "permissions.embedLinks", "Embed Links")
        .with("en_US", "permissions.kickMembers", "Kick Members")
        .with("en_US", "permissions.banMembers", "Ban Members")
        .with("ru_RU", "common.NO_USER_PERMISSIONS_ERROR", "Вам нужны права: {0}")
        .with("ru_RU", "permissions.banMembers", "Бан участников");
    LocalizationStore::load("en_US", &source).unwrap()
}

/// Handler that records a copy of every context it runs with.
#[derive(Clone, Default)]
pub struct Probe {
    seen: Arc<Mutex<Vec<InvocationContext>>>,
}

#[allow(dead_code)]
impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    /// The most recent context.
    pub fn last(&self) -> InvocationContext {
        self.seen.lock().last().cloned().expect("probe never ran")
    }
}

#[async_trait]
impl CommandHandler for Probe {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        self.seen.lock().push(ctx.clone());
        Ok(())
    }
}

pub struct TestBot {
    pub dispatcher: Arc<Dispatcher>,
    pub transport: Arc<RecordingTransport>,
    next_id: AtomicU64,
}

#[allow(dead_code)]
impl TestBot {
    pub fn new(tree: CommandTree) -> Self {
        Self::with_capabilities(tree, OpenCapabilities::new())
    }

    pub fn with_capabilities(tree: CommandTree, capabilities: OpenCapabilities) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let plugins = Plugins::new(
            Arc::new(test_store()),
            Arc::new(tree),
            Arc::new(ComponentRouter::new()),
        );
        let state = BotState::new(
            "!",
            transport.clone(),
            PermissionGate::new(UserId::from(BOT), Arc::new(capabilities)),
            AdminRoster::new([UserId::from(ADMIN)]),
            plugins,
        );

        Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::new(state))),
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    fn id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    pub fn message(&self, author: &str, content: &str) -> InboundEvent {
        InboundEvent::Message(MessageEvent {
            id: self.id().into(),
            author_id: author.into(),
            channel_id: CHANNEL.into(),
            content: content.to_owned(),
            mentioned_user_ids: Vec::new(),
        })
    }

    pub fn interaction(
        &self,
        author: &str,
        name: &str,
        options: Vec<InteractionOption>,
    ) -> InboundEvent {
        InboundEvent::Interaction(InteractionEvent {
            id: self.id().into(),
            author_id: author.into(),
            channel_id: CHANNEL.into(),
            locale: None,
            data: CommandData {
                name: name.to_owned(),
                options,
            },
        })
    }

    pub fn component(&self, author: &str, custom_id: &str) -> InboundEvent {
        InboundEvent::Component(ComponentEvent {
            id: self.id().into(),
            author_id: author.into(),
            channel_id: CHANNEL.into(),
            custom_id: custom_id.to_owned(),
            values: Vec::new(),
        })
    }

    pub async fn process(&self, event: InboundEvent) -> Result<Dispatched, DispatchError> {
        self.dispatcher.process(event).await
    }
}
