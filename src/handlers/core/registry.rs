//! Inbound event dispatch.
//!
//! The [`Dispatcher`] turns every inbound event into at most one handler run:
//!
//! 1. messages without the prefix or with an unknown trigger are ignored
//!    before any context is built
//! 2. a context is built and passed through the middleware pipeline
//! 3. the command is resolved, with the permission gate at every node
//! 4. the leaf handler runs, or nothing happens if it has none
//!
//! Component events bypass commands and go to the component router.
//! Nothing here panics or returns an error to the transport; failures are
//! logged and denials get a best-effort localized reply.

use super::context::{Args, InvocationContext, Origin, RawArgs};
use super::middleware::{Middleware, MiddlewarePipeline};
use crate::caps::Clearance;
use crate::commands::interaction::{self, InteractionOutcome};
use crate::commands::text::{self, TextOutcome};
use crate::commands::{CommandNode, CommandTree, split_content};
use crate::error::{DispatchError, PermissionDenied};
use crate::state::BotState;
use crate::telemetry::{CommandTimer, spans};
use parley_proto::{ComponentEvent, InboundEvent, InteractionEvent, MessageEvent, OutboundPayload};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, trace, warn};

/// What a processed event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Not a command: no prefix, or an unknown trigger.
    Ignored,
    /// The leaf has no handler; nothing ran.
    NoHandler { path: String },
    /// The leaf handler ran and succeeded.
    Executed { path: String },
    /// A component event reached this many listeners.
    Components { matched: usize },
}

/// Routes inbound events to command handlers and component listeners.
pub struct Dispatcher {
    state: Arc<BotState>,
    middleware: MiddlewarePipeline,
}

impl Dispatcher {
    pub fn new(state: Arc<BotState>) -> Self {
        Self {
            state,
            middleware: MiddlewarePipeline::new(),
        }
    }

    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }

    pub fn command_tree(&self) -> &Arc<CommandTree> {
        self.state.plugins.commands()
    }

    pub fn middleware(&self) -> &MiddlewarePipeline {
        &self.middleware
    }

    /// Add a middleware step. Applies to events processed afterwards.
    pub fn register_middleware(&self, step: impl Middleware + 'static) {
        self.middleware.register(Arc::new(step));
    }

    /// Process `event` on its own task.
    ///
    /// Invocations are independent; a slow handler never delays another
    /// event.
    pub fn dispatch(self: &Arc<Self>, event: InboundEvent) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.process(event).await {
                debug!(error = %e, code = e.error_code(), "Event not handled");
            }
        })
    }

    /// Process one event to completion.
    pub async fn process(&self, event: InboundEvent) -> Result<Dispatched, DispatchError> {
        let span = spans::event(&event);
        async move {
            match event {
                InboundEvent::Message(message) => self.process_message(message).await,
                InboundEvent::Interaction(interaction) => {
                    self.process_interaction(interaction).await
                }
                InboundEvent::Component(component) => Ok(self.process_component(component).await),
            }
        }
        .instrument(span)
        .await
    }

    async fn process_message(&self, message: MessageEvent) -> Result<Dispatched, DispatchError> {
        let Some(mut tokens) = split_content(&message.content, &self.state.prefix) else {
            return Ok(Dispatched::Ignored);
        };
        let trigger = tokens.remove(0);

        let Some(root) = self.command_tree().find_text(&trigger).cloned() else {
            trace!(trigger = %trigger, "Unknown text command");
            return Ok(Dispatched::Ignored);
        };

        let mut ctx = InvocationContext::new(Origin::Message(message), Arc::clone(&self.state));
        ctx.scratch.insert(RawArgs(tokens));
        let mut ctx = self.middleware.run(ctx).await;

        let rest = ctx
            .scratch
            .get::<RawArgs>()
            .map(|raw| raw.0.clone())
            .unwrap_or_default();

        match text::resolve(&root, rest, &ctx, &self.state.gate).await {
            TextOutcome::Denied { node, denied } => Err(self.deny(&ctx, &node, denied).await),
            TextOutcome::Leaf {
                node,
                clearance,
                rest,
            } => {
                text::bind_arguments(&node, &rest, &mut ctx);
                self.run_leaf(node, clearance, ctx).await
            }
        }
    }

    async fn process_interaction(
        &self,
        interaction: InteractionEvent,
    ) -> Result<Dispatched, DispatchError> {
        let Some(root) = self
            .command_tree()
            .find_interaction(&interaction.data.name)
            .cloned()
        else {
            warn!(command = %interaction.data.name, "Interaction for unknown command");
            return Err(DispatchError::UnresolvedCommand(interaction.data.name));
        };

        let options = interaction.data.options.clone();
        let ctx = InvocationContext::new(Origin::Interaction(interaction), Arc::clone(&self.state));
        let mut ctx = self.middleware.run(ctx).await;

        let outcome = interaction::resolve(&root, &options, &ctx, &self.state.gate)
            .await
            .inspect_err(|e| warn!(error = %e, "Malformed interaction option tree"))?;

        match outcome {
            InteractionOutcome::Denied { node, denied } => Err(self.deny(&ctx, &node, denied).await),
            InteractionOutcome::Leaf {
                node,
                clearance,
                options,
            } => {
                ctx.set_args(Args::Interaction(options));
                self.run_leaf(node, clearance, ctx).await
            }
        }
    }

    async fn process_component(&self, component: ComponentEvent) -> Dispatched {
        let matched = self
            .state
            .plugins
            .components()
            .route(&component, &self.state)
            .await;
        trace!(custom_id = %component.custom_id, matched, "Component event routed");
        Dispatched::Components { matched }
    }

    async fn run_leaf(
        &self,
        node: Arc<CommandNode>,
        clearance: Clearance,
        mut ctx: InvocationContext,
    ) -> Result<Dispatched, DispatchError> {
        let path = clearance.path().to_owned();
        ctx.set_command(Arc::clone(&node));

        let Some(handler) = node.handler().cloned() else {
            debug!(command = %path, "Command has no handler");
            return Ok(Dispatched::NoHandler { path });
        };

        let count = node.record_invocation();
        trace!(command = %path, count, as_admin = clearance.as_admin(), "Running handler");

        let _timer = CommandTimer::new(&path);
        let span = spans::command(&path, ctx.author_id().as_str());
        match handler.handle(&mut ctx).instrument(span).await {
            Ok(()) => Ok(Dispatched::Executed { path }),
            Err(source) => {
                error!(
                    command = %path,
                    error = %source,
                    code = source.error_code(),
                    "Command handler failed"
                );
                Err(DispatchError::HandlerFailure { path, source })
            }
        }
    }

    /// Reply to a denial where appropriate and turn it into an error.
    async fn deny(
        &self,
        ctx: &InvocationContext,
        node: &CommandNode,
        denied: PermissionDenied,
    ) -> DispatchError {
        debug!(command = %node.path(), reason = denied.reason.code(), "Permission denied");
        send_denial(ctx, &denied).await;
        DispatchError::PermissionDenied(denied)
    }
}

/// Best-effort localized reply naming the missing capabilities.
///
/// Admin-only denials stay silent.
async fn send_denial(ctx: &InvocationContext, denied: &PermissionDenied) {
    let Some(key) = denied.reply_key() else {
        return;
    };

    let names: Vec<String> = denied
        .missing
        .iter()
        .map(|capability| {
            ctx.t(&format!("permissions.{capability}"), &[])
                .unwrap_or_else(|_| capability.to_string())
        })
        .collect();
    let list = names.join(", ");

    let text = match ctx.t(key, &[list.as_str()]) {
        Ok(text) => text,
        Err(e) => {
            warn!(key, error = %e, "No denial message to send");
            return;
        }
    };

    let payload = if ctx.is_interaction() {
        OutboundPayload::text(text).ephemeral()
    } else {
        OutboundPayload::text(text)
    };
    if let Err(e) = ctx.reply(payload).await {
        warn!(error = %e, "Failed to send denial reply");
    }
}
