//! Per-invocation context.
//!
//! One [`InvocationContext`] is built for every inbound command event. It
//! travels through the middleware pipeline and into the leaf handler, and is
//! never shared between invocations.
//!
//! The origin (message or interaction) is fixed when the context is built.
//! Parsed arguments and flags are replaced as a whole on every parse, so
//! nothing from an earlier parse survives into a later one.

use crate::commands::{CommandNode, FlagValue, Flags};
use crate::error::{L10nError, TransportError};
use crate::l10n::LocalizationStore;
use crate::state::BotState;
use parley_proto::{
    Capability, ChannelId, InteractionEvent, InteractionOption, MessageEvent, OutboundPayload,
    Reference, UserId,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where an invocation came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Message(MessageEvent),
    Interaction(InteractionEvent),
}

impl Origin {
    pub fn author_id(&self) -> &UserId {
        match self {
            Self::Message(m) => &m.author_id,
            Self::Interaction(i) => &i.author_id,
        }
    }

    pub fn channel_id(&self) -> &ChannelId {
        match self {
            Self::Message(m) => &m.channel_id,
            Self::Interaction(i) => &i.channel_id,
        }
    }
}

/// Parsed arguments of the resolved command.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Args {
    #[default]
    None,
    /// Positional values of a text command.
    Text(BTreeMap<String, String>),
    /// Option list of an interaction leaf.
    Interaction(Vec<InteractionOption>),
}

/// Tokens a text command has not consumed yet, kept in the scratch bag.
///
/// Set to everything after the top-level trigger when the context is built;
/// after argument binding it holds the tokens past the last argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs(pub Vec<String>);

/// State threaded through middleware into the handler.
#[derive(Clone)]
pub struct InvocationContext {
    origin: Origin,
    command: Option<Arc<CommandNode>>,
    args: Args,
    flags: Flags,
    /// Open bag for middleware to pass derived values forward.
    pub scratch: http::Extensions,
    caller_is_admin: bool,
    admin_version: u64,
    locale: String,
    state: Arc<BotState>,
}

impl InvocationContext {
    /// Build a context, snapshotting the admin roster.
    pub fn new(origin: Origin, state: Arc<BotState>) -> Self {
        let admins = state.admins.snapshot();
        let caller_is_admin = admins.contains(origin.author_id());

        let store = state.plugins.localization();
        let locale = match &origin {
            Origin::Interaction(i) => i.locale.clone(),
            Origin::Message(_) => None,
        }
        .unwrap_or_else(|| store.default_locale().to_owned());

        Self {
            origin,
            command: None,
            args: Args::None,
            flags: Flags::new(),
            scratch: http::Extensions::new(),
            caller_is_admin,
            admin_version: admins.version(),
            locale,
            state,
        }
    }

    // ------------------------------------------------------------------
    // Origin
    // ------------------------------------------------------------------

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn message(&self) -> Option<&MessageEvent> {
        match &self.origin {
            Origin::Message(m) => Some(m),
            Origin::Interaction(_) => None,
        }
    }

    pub fn interaction(&self) -> Option<&InteractionEvent> {
        match &self.origin {
            Origin::Interaction(i) => Some(i),
            Origin::Message(_) => None,
        }
    }

    pub fn is_interaction(&self) -> bool {
        matches!(self.origin, Origin::Interaction(_))
    }

    pub fn author_id(&self) -> &UserId {
        self.origin.author_id()
    }

    pub fn channel_id(&self) -> &ChannelId {
        self.origin.channel_id()
    }

    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }

    /// Whether the caller was an admin when this context was built.
    pub fn is_admin(&self) -> bool {
        self.caller_is_admin
    }

    /// Roster version the admin flag was computed from.
    pub fn admin_version(&self) -> u64 {
        self.admin_version
    }

    // ------------------------------------------------------------------
    // Resolution results
    // ------------------------------------------------------------------

    /// The leaf command, once resolved.
    pub fn command(&self) -> Option<&Arc<CommandNode>> {
        self.command.as_ref()
    }

    pub(crate) fn set_command(&mut self, node: Arc<CommandNode>) {
        self.command = Some(node);
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Replace the arguments.
    pub fn set_args(&mut self, args: Args) {
        self.args = args;
    }

    /// A positional value of a text command.
    pub fn text_arg(&self, name: &str) -> Option<&str> {
        match &self.args {
            Args::Text(values) => values.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// An option of an interaction leaf.
    pub fn option(&self, name: &str) -> Option<&InteractionOption> {
        match &self.args {
            Args::Interaction(options) => options.iter().find(|o| o.name == name),
            _ => None,
        }
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Replace the flags.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    // ------------------------------------------------------------------
    // Localization
    // ------------------------------------------------------------------

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Override the locale, e.g. from a user preference lookup.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn l10n(&self) -> &LocalizationStore {
        self.state.plugins.localization()
    }

    /// Render `key` in the invocation's locale.
    pub fn t(&self, key: &str, variables: &[&str]) -> Result<String, L10nError> {
        self.l10n().render(key, &self.locale, variables)
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Reply to the invocation.
    ///
    /// Interaction replies answer the interaction. Message replies quote the
    /// invoking message when the bot may read message history.
    pub async fn reply(&self, payload: impl Into<OutboundPayload>) -> Result<(), TransportError> {
        let mut payload = payload.into();

        match &self.origin {
            Origin::Interaction(i) => {
                payload.reference = Some(Reference::Interaction(i.id.clone()));
            }
            Origin::Message(m) => {
                let quotable = self
                    .state
                    .gate
                    .bot_has(&m.channel_id, &Capability::ReadMessageHistory)
                    .await;
                if quotable {
                    payload.reference = Some(Reference::Message(m.id.clone()));
                }
            }
        }

        self.state
            .transport
            .send_message(self.channel_id(), payload)
            .await
    }

    /// Make the eventual interaction response visible to the invoker only.
    /// Does nothing for messages.
    pub async fn defer_private(&self) -> Result<(), TransportError> {
        match &self.origin {
            Origin::Interaction(i) => self.state.transport.acknowledge_interaction(&i.id, true).await,
            Origin::Message(_) => Ok(()),
        }
    }

    /// Signal that a response is being prepared.
    pub async fn think(&self) -> Result<(), TransportError> {
        match &self.origin {
            Origin::Interaction(i) => {
                self.state
                    .transport
                    .acknowledge_interaction(&i.id, false)
                    .await
            }
            Origin::Message(m) => self.state.transport.trigger_typing(&m.channel_id).await,
        }
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("origin", &self.origin)
            .field("command", &self.command.as_ref().map(|c| c.path()))
            .field("args", &self.args)
            .field("flags", &self.flags)
            .field("caller_is_admin", &self.caller_is_admin)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
