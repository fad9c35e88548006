//! Integration tests for text command dispatch: resolution, gating, argument
//! binding and denial replies.

mod common;

use async_trait::async_trait;
use common::{ADMIN, BOT, Probe, TestBot, USER};
use parley::commands::{CommandTree, FlagSpec, FlagValue, TextCommand};
use parley::error::{DenyReason, DispatchError, HandlerError, HandlerResult};
use parley::handlers::core::{Args, CommandHandler, Dispatched, InvocationContext, RawArgs};
use parley::network::OpenCapabilities;
use parley_proto::{Capability, Reference};

struct Pong;

#[async_trait]
impl CommandHandler for Pong {
    async fn handle(&self, ctx: &mut InvocationContext) -> HandlerResult {
        let text = ctx.t("common.PONG", &[])?;
        ctx.reply(text).await?;
        Ok(())
    }
}

struct Crash;

#[async_trait]
impl CommandHandler for Crash {
    async fn handle(&self, _ctx: &mut InvocationContext) -> HandlerResult {
        Err(HandlerError::Internal("evaluation blew up".into()))
    }
}

fn denial(result: Result<Dispatched, DispatchError>) -> (DenyReason, Vec<Capability>) {
    match result {
        Err(DispatchError::PermissionDenied(denied)) => (denied.reason, denied.missing),
        other => panic!("expected a permission denial, got {other:?}"),
    }
}

#[tokio::test]
async fn test_admin_only_denied_silently_before_parsing() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("dev")
                .admin_only()
                .subcommand(TextCommand::new("eval").remainder("code").handler(probe.clone())),
        )
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    let result = bot.process(bot.message(USER, "!dev eval 1 + 1")).await;
    assert_eq!(denial(result), (DenyReason::AdminOnly, vec![]));
    assert!(bot.transport.sent().is_empty());
    assert_eq!(probe.calls(), 0);

    let result = bot.process(bot.message(ADMIN, "!dev eval 1 + 1")).await;
    assert_eq!(result.unwrap(), Dispatched::Executed { path: "dev eval".into() });
    assert_eq!(probe.last().text_arg("code"), Some("1 + 1"));
}

#[tokio::test]
async fn test_flags_and_args_bound() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("echo")
                .flag(FlagSpec::switch("upper").alias("u"))
                .flag(FlagSpec::value("times").alias("t"))
                .arg("first")
                .remainder("rest")
                .handler(probe.clone()),
        )
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    bot.process(bot.message(USER, "!echo -u --times 3 hello big world"))
        .await
        .unwrap();

    let ctx = probe.last();
    assert_eq!(ctx.flag("upper"), Some(&FlagValue::Switch));
    assert_eq!(ctx.flag("times"), Some(&FlagValue::Value("3".into())));
    assert_eq!(ctx.text_arg("first"), Some("hello"));
    assert_eq!(ctx.text_arg("rest"), Some("big world"));
    assert_eq!(ctx.command().unwrap().path(), "echo");
}

#[tokio::test]
async fn test_extra_tokens_stay_raw() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(TextCommand::new("pick").arg("one").handler(probe.clone()))
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    bot.process(bot.message(USER, "!pick a b c")).await.unwrap();

    let ctx = probe.last();
    assert_eq!(ctx.text_arg("one"), Some("a"));
    assert_eq!(
        ctx.scratch.get::<RawArgs>(),
        Some(&RawArgs(vec!["b".into(), "c".into()]))
    );
}

#[tokio::test]
async fn test_trigger_case_and_aliases() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(TextCommand::new("ping").alias("p").handler(probe.clone()))
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    bot.process(bot.message(USER, "!PING")).await.unwrap();
    bot.process(bot.message(USER, "!p")).await.unwrap();
    assert_eq!(probe.calls(), 2);
}

#[tokio::test]
async fn test_unknown_and_unprefixed_ignored() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(TextCommand::new("ping").handler(probe.clone()))
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    assert_eq!(bot.process(bot.message(USER, "ping")).await.unwrap(), Dispatched::Ignored);
    assert_eq!(bot.process(bot.message(USER, "!nope")).await.unwrap(), Dispatched::Ignored);
    assert_eq!(bot.process(bot.message(USER, "!")).await.unwrap(), Dispatched::Ignored);
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn test_leaf_without_handler_is_noop() {
    let tree = CommandTree::builder()
        .text(TextCommand::new("config").subcommand(TextCommand::new("show").handler(Probe::new())))
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    let result = bot.process(bot.message(USER, "!config")).await.unwrap();
    assert_eq!(result, Dispatched::NoHandler { path: "config".into() });

    // Unknown subcommand words are just arguments of the parent
    let result = bot.process(bot.message(USER, "!config edit")).await.unwrap();
    assert_eq!(result, Dispatched::NoHandler { path: "config".into() });
    assert!(bot.transport.sent().is_empty());

    let config = bot.dispatcher.command_tree().find_text("config").unwrap();
    assert_eq!(config.invocation_count(), 0);
}

#[tokio::test]
async fn test_invocation_count() {
    let tree = CommandTree::builder()
        .text(TextCommand::new("ping").handler(Probe::new()))
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    for _ in 0..3 {
        bot.process(bot.message(USER, "!ping")).await.unwrap();
    }
    let ping = bot.dispatcher.command_tree().find_text("ping").unwrap();
    assert_eq!(ping.invocation_count(), 3);
}

#[tokio::test]
async fn test_bot_permission_denial_reply() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("embed")
                .bot_capability(Capability::EmbedLinks)
                .handler(probe.clone()),
        )
        .build()
        .unwrap();
    let bot = TestBot::with_capabilities(
        tree,
        OpenCapabilities::new().deny(BOT, Capability::EmbedLinks),
    );

    let event = bot.message(USER, "!embed");
    let message_id = match &event {
        parley_proto::InboundEvent::Message(m) => m.id.clone(),
        _ => unreachable!(),
    };
    let result = bot.process(event).await;
    assert_eq!(
        denial(result),
        (DenyReason::NoBotPermissions, vec![Capability::EmbedLinks])
    );

    let sent = bot.transport.payloads();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "I need: Embed Links");
    assert_eq!(sent[0].reference, Some(Reference::Message(message_id)));
    assert!(!sent[0].ephemeral);
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn test_denial_names_fall_back_to_capability_key() {
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("deploy")
                .user_capability(Capability::KickMembers)
                .user_capability(Capability::Custom("deployBots".into()))
                .handler(Probe::new()),
        )
        .build()
        .unwrap();
    let bot = TestBot::with_capabilities(
        tree,
        OpenCapabilities::new()
            .deny(USER, Capability::KickMembers)
            .deny(USER, Capability::Custom("deployBots".into())),
    );

    let (reason, missing) = denial(bot.process(bot.message(USER, "!deploy")).await);
    assert_eq!(reason, DenyReason::NoUserPermissions);
    assert_eq!(missing.len(), 2);
    assert_eq!(
        bot.transport.payloads()[0].content,
        "You need: Kick Members, deployBots"
    );
}

#[tokio::test]
async fn test_reply_without_history_has_no_reference() {
    let tree = CommandTree::builder()
        .text(TextCommand::new("ping").handler(Pong))
        .build()
        .unwrap();
    let bot = TestBot::with_capabilities(
        tree,
        OpenCapabilities::new().deny(BOT, Capability::ReadMessageHistory),
    );

    bot.process(bot.message(USER, "!ping")).await.unwrap();
    let sent = bot.transport.payloads();
    assert_eq!(sent[0].content, "pong");
    assert_eq!(sent[0].reference, None);
}

#[tokio::test]
async fn test_every_level_is_gated() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("mod")
                .user_capability(Capability::KickMembers)
                .subcommand(
                    TextCommand::new("ban")
                        .user_capability(Capability::BanMembers)
                        .arg("target")
                        .handler(probe.clone()),
                ),
        )
        .build()
        .unwrap();
    let bot = TestBot::with_capabilities(
        tree,
        OpenCapabilities::new().deny(USER, Capability::BanMembers),
    );

    let (reason, missing) = denial(bot.process(bot.message(USER, "!mod ban someone")).await);
    assert_eq!(reason, DenyReason::NoUserPermissions);
    assert_eq!(missing, vec![Capability::BanMembers]);
    assert_eq!(bot.transport.payloads()[0].content, "You need: Ban Members");

    // Admins skip user capability checks
    bot.process(bot.message(ADMIN, "!mod ban someone")).await.unwrap();
    assert_eq!(probe.last().text_arg("target"), Some("someone"));
    assert!(probe.last().is_admin());
}

#[tokio::test]
async fn test_args_replaced_on_each_invocation() {
    let probe = Probe::new();
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("say")
                .flag(FlagSpec::switch("loud"))
                .arg("word")
                .handler(probe.clone()),
        )
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    bot.process(bot.message(USER, "!say --loud hi")).await.unwrap();
    bot.process(bot.message(USER, "!say")).await.unwrap();

    let ctx = probe.last();
    assert!(!ctx.has_flag("loud"));
    assert_eq!(ctx.args(), &Args::Text(Default::default()));
}

#[tokio::test]
async fn test_handler_failure_reported_with_full_path() {
    let tree = CommandTree::builder()
        .text(
            TextCommand::new("dev")
                .admin_only()
                .subcommand(TextCommand::new("eval").remainder("code").handler(Crash)),
        )
        .build()
        .unwrap();
    let bot = TestBot::new(tree);

    let result = bot.process(bot.message(ADMIN, "!dev eval 1 + 1")).await;
    match result {
        Err(DispatchError::HandlerFailure { path, source }) => {
            assert_eq!(path, "dev eval");
            assert!(matches!(source, HandlerError::Internal(_)));
        }
        other => panic!("expected a handler failure, got {other:?}"),
    }
    assert!(bot.transport.sent().is_empty());

    let eval = bot
        .dispatcher
        .command_tree()
        .find_text("dev")
        .and_then(|dev| dev.child_by_trigger("eval"))
        .unwrap();
    assert_eq!(eval.invocation_count(), 1);
}
