//! Admin and demo commands.

use super::core::{CommandHandler, InvocationContext};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;

/// Handler for `dev echo [--upper|-u] <text...>`.
pub struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let text = ctx
            .text_arg("text")
            .ok_or_else(|| HandlerError::MissingArgument("text".into()))?;

        let reply = if ctx.has_flag("upper") {
            text.to_uppercase()
        } else {
            text.to_owned()
        };
        ctx.reply(reply).await?;
        Ok(())
    }
}

/// Handler for the `test sub` interaction: repeats its `text` option.
///
/// With `private: true` the response is only shown to the invoker.
pub struct SayHandler;

#[async_trait]
impl CommandHandler for SayHandler {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let text = ctx
            .option("text")
            .and_then(|o| o.value.as_ref())
            .map(ToString::to_string)
            .ok_or_else(|| HandlerError::MissingArgument("text".into()))?;

        let private = ctx
            .option("private")
            .and_then(|o| o.value.as_ref())
            .is_some_and(|v| v.to_string() == "true");
        if private {
            ctx.defer_private().await?;
        } else {
            ctx.think().await?;
        }

        ctx.reply(text).await?;
        Ok(())
    }
}
