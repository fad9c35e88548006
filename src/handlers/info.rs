//! Informational commands: PING, HELP, STATS.

use super::core::{CommandHandler, InvocationContext};
use crate::commands::{CommandKind, CommandView};
use crate::error::HandlerResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Handler for `ping`.
pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let pong = ctx.t("common.PONG", &[])?;
        ctx.reply(pong).await?;
        Ok(())
    }
}

/// Handler for `help [command]`.
///
/// Without an argument, lists visible text commands by category. With one,
/// describes that command.
pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let tree = ctx.state().plugins.commands();

        let reply = match ctx.text_arg("command") {
            Some(name) => match tree.find_text(name).filter(|node| !node.is_hidden()) {
                Some(node) => describe(ctx, &CommandView::of(node))?,
                None => ctx.t("common.HELP_UNKNOWN", &[name])?,
            },
            None => overview(ctx, &tree.view())?,
        };

        ctx.reply(reply).await?;
        Ok(())
    }
}

fn overview(ctx: &InvocationContext, views: &[CommandView]) -> Result<String, crate::error::L10nError> {
    let mut by_category: BTreeMap<&str, Vec<&CommandView>> = BTreeMap::new();
    for view in views
        .iter()
        .filter(|v| v.kind == CommandKind::Text && !v.hidden)
    {
        let category = view.category.as_deref().unwrap_or("misc");
        by_category.entry(category).or_default().push(view);
    }

    let count = by_category.values().map(Vec::len).sum::<usize>().to_string();
    let mut out = ctx.t("common.HELP_HEADER", &[count.as_str()])?;
    for (category, views) in by_category {
        let _ = write!(out, "\n[{category}]");
        for view in views {
            let description = view.description.resolve(ctx.l10n(), ctx.locale());
            let _ = write!(out, "\n  {} - {}", view.name, description);
        }
    }
    Ok(out)
}

fn describe(ctx: &InvocationContext, view: &CommandView) -> Result<String, crate::error::L10nError> {
    let mut out = format!(
        "{} - {}",
        view.name,
        view.description.resolve(ctx.l10n(), ctx.locale())
    );
    if !view.aliases.is_empty() {
        let aliases = view.aliases.join(", ");
        let _ = write!(out, "\n{}", ctx.t("common.HELP_ALIASES", &[aliases.as_str()])?);
    }
    for example in &view.usage_examples {
        let _ = write!(out, "\n  {}{}", ctx.state().prefix, example);
    }
    let visible: Vec<&str> = view
        .children
        .iter()
        .filter(|c| !c.hidden)
        .map(|c| c.name.as_str())
        .collect();
    if !visible.is_empty() {
        let names = visible.join(", ");
        let _ = write!(out, "\n{}", ctx.t("common.HELP_SUBCOMMANDS", &[names.as_str()])?);
    }
    Ok(out)
}

/// Handler for `stats`.
///
/// Reports total invocations, the admin count and the loaded plugin roles.
pub struct StatsHandler;

#[async_trait]
impl CommandHandler for StatsHandler {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let state = ctx.state();
        let total: u64 = state
            .plugins
            .commands()
            .view()
            .iter()
            .map(CommandView::total_invocations)
            .sum();
        let admins = state.admins.snapshot().len();
        let plugins: Vec<String> = state
            .plugins
            .iter()
            .map(|handle| handle.role().to_string())
            .collect();

        let (total, admins, plugins) = (total.to_string(), admins.to_string(), plugins.join(", "));
        let reply = ctx.t("common.STATS", &[total.as_str(), admins.as_str(), plugins.as_str()])?;
        ctx.reply(reply).await?;
        Ok(())
    }
}
