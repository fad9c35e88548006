//! Command handlers.
//!
//! [`core`] holds the dispatch machinery. The remaining modules are the
//! commands the bot ships with; [`builtin_commands`] wires them into a tree.

pub mod admin;
pub mod core;
pub mod info;

pub use admin::{EchoHandler, SayHandler};
pub use info::{HelpHandler, PingHandler, StatsHandler};

use crate::commands::{CommandTree, CommandTreeBuilder, FlagSpec, InteractionCommand, OptionDecl, TextCommand};
use parley_proto::OptionType;

/// The bundled commands, ready for more to be added before `build()`.
pub fn builtin_commands() -> CommandTreeBuilder {
    CommandTree::builder()
        .text(
            TextCommand::new("ping")
                .localized_description("commands.PING")
                .category("info")
                .usage_example("ping")
                .handler(PingHandler),
        )
        .text(
            TextCommand::new("help")
                .alias("h")
                .localized_description("commands.HELP")
                .category("info")
                .arg("command")
                .usage_example("help")
                .usage_example("help ping")
                .handler(HelpHandler),
        )
        .text(
            TextCommand::new("stats")
                .localized_description("commands.STATS")
                .category("info")
                .handler(StatsHandler),
        )
        .text(
            TextCommand::new("dev")
                .admin_only()
                .category("admin")
                .subcommand(
                    TextCommand::new("echo")
                        .localized_description("commands.ECHO")
                        .flag(FlagSpec::switch("upper").alias("u"))
                        .remainder("text")
                        .usage_example("dev echo --upper hello there")
                        .handler(EchoHandler),
                ),
        )
        .interaction(
            InteractionCommand::new("test")
                .localized_description("commands.TEST")
                .subcommand(
                    InteractionCommand::new("sub")
                        .localized_description("commands.TEST_SUB")
                        .option(OptionDecl::new("text", OptionType::String, "Text to repeat").required())
                        .option(OptionDecl::new("private", OptionType::Boolean, "Only show it to me"))
                        .handler(SayHandler),
                ),
        )
}
