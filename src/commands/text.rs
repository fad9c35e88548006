//! Text command resolution.
//!
//! Starting at a top-level node, the gate runs for the current node and the
//! next token is compared against its children's triggers. A match consumes
//! the token and descends; otherwise the current node is the leaf and the
//! remaining tokens belong to its grammar.

use super::args;
use super::node::CommandNode;
use crate::caps::{Clearance, PermissionGate};
use crate::error::PermissionDenied;
use crate::handlers::core::context::{Args, InvocationContext, RawArgs};
use std::sync::Arc;
use tracing::trace;

/// Where a text walk stopped.
#[derive(Debug)]
pub enum TextOutcome {
    /// The leaf, its clearance and the tokens after its trigger.
    Leaf {
        node: Arc<CommandNode>,
        clearance: Clearance,
        rest: Vec<String>,
    },
    /// The gate refused `node`.
    Denied {
        node: Arc<CommandNode>,
        denied: PermissionDenied,
    },
}

/// Walk from `root` using `tokens` (everything after the top-level trigger).
pub async fn resolve(
    root: &Arc<CommandNode>,
    tokens: Vec<String>,
    ctx: &InvocationContext,
    gate: &PermissionGate,
) -> TextOutcome {
    let mut node = Arc::clone(root);
    let mut rest = tokens.into_iter().peekable();

    loop {
        let clearance = match gate.check(&node, ctx).await {
            Ok(clearance) => clearance,
            Err(denied) => return TextOutcome::Denied { node, denied },
        };

        let next = rest
            .peek()
            .and_then(|token| node.child_by_trigger(token))
            .cloned();
        match next {
            Some(child) => {
                rest.next();
                trace!(from = %node.name(), to = %child.name(), "Descending into subcommand");
                node = child;
            }
            None => {
                return TextOutcome::Leaf {
                    node,
                    clearance,
                    rest: rest.collect(),
                };
            }
        }
    }
}

/// Parse `rest` with the leaf's grammar and store the result in `ctx`.
///
/// Flags and arguments are replaced outright. Tokens past the last argument
/// stay available as [`RawArgs`].
pub fn bind_arguments(node: &CommandNode, rest: &[String], ctx: &mut InvocationContext) {
    let Some(spec) = node.text_spec() else {
        return;
    };

    let parsed = args::parse(rest, &spec.grammar);
    ctx.set_flags(parsed.flags);
    ctx.set_args(Args::Text(parsed.args));
    ctx.scratch.insert(RawArgs(parsed.unconsumed));
}
