//! Command tree, argument grammar and resolution.
//!
//! Commands come in two flavors. Text commands are triggered by a prefixed
//! chat message and parse their own arguments; interaction commands arrive
//! with a structured option tree. Both are built with the builders in
//! [`builder`], validated once, and shared read-only afterwards.

pub mod args;
pub mod builder;
pub mod interaction;
pub mod node;
pub mod text;
pub mod tree;

pub use args::{FlagValue, Flags, ParsedInput, split_content};
pub use builder::{InteractionCommand, TextCommand};
pub use node::{
    CommandKind, CommandNode, Description, FlagSpec, InteractionSpec, NodeKind, OptionDecl,
    PositionalArg, TextGrammar, TextSpec,
};
pub use tree::{CommandTree, CommandTreeBuilder, CommandView};
