//! Text argument parsing.
//!
//! Parsing runs in two passes over whitespace-separated tokens. The flag
//! pass picks out `--name` / `-alias` tokens (and the value token following
//! a value flag); the positional pass assigns what is left to the declared
//! arguments in order.

use super::node::{FlagSpec, PositionalArg, TextGrammar};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Value of a flag that was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A flag without a value.
    Switch,
    Value(String),
}

impl FlagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Switch => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Flags by canonical name.
pub type Flags = BTreeMap<String, FlagValue>;

/// Result of the flag pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagPass {
    pub flags: Flags,
    /// Indices of tokens the flags took, including value tokens.
    pub used: BTreeSet<usize>,
}

/// Result of the positional pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positionals {
    pub values: BTreeMap<String, String>,
    /// Tokens past the last declared argument.
    pub unconsumed: Vec<String>,
}

/// Both passes together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub flags: Flags,
    pub args: BTreeMap<String, String>,
    pub unconsumed: Vec<String>,
}

/// Strip `prefix` from message content and split the rest on whitespace.
///
/// Returns `None` when the content does not start with the prefix or has
/// nothing after it.
pub fn split_content(content: &str, prefix: &str) -> Option<Vec<String>> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let tokens: Vec<String> = rest.split_whitespace().map(str::to_owned).collect();
    (!tokens.is_empty()).then_some(tokens)
}

/// Parse `tokens` against a command's grammar.
pub fn parse<T: AsRef<str>>(tokens: &[T], grammar: &TextGrammar) -> ParsedInput {
    let FlagPass { flags, used } = parse_flags(tokens, &grammar.flags);

    let remaining: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| !used.contains(i))
        .map(|(_, t)| t.as_ref())
        .collect();
    let Positionals { values, unconsumed } = parse_positionals(&remaining, &grammar.args);

    ParsedInput {
        flags,
        args: values,
        unconsumed,
    }
}

/// The flag pass.
///
/// `--name` matches a flag by its name, `-x` by one of its aliases. A value
/// flag takes the next token, which is then not looked at as a flag itself;
/// with no next token the flag is dropped. Dash tokens that match nothing
/// stay positional.
pub fn parse_flags<T: AsRef<str>>(tokens: &[T], specs: &[FlagSpec]) -> FlagPass {
    let mut pass = FlagPass::default();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();
        let spec = if let Some(name) = token.strip_prefix("--") {
            specs.iter().find(|f| f.name == name)
        } else if let Some(alias) = token.strip_prefix('-') {
            specs.iter().find(|f| f.aliases.iter().any(|a| a == alias))
        } else {
            None
        };

        let Some(spec) = spec else {
            i += 1;
            continue;
        };

        pass.used.insert(i);
        if spec.accepts_value {
            if let Some(value) = tokens.get(i + 1) {
                pass.flags
                    .insert(spec.name.clone(), FlagValue::Value(value.as_ref().to_owned()));
                pass.used.insert(i + 1);
                i += 1;
            }
        } else {
            pass.flags.insert(spec.name.clone(), FlagValue::Switch);
        }
        i += 1;
    }

    pass
}

/// The positional pass.
///
/// A token opening with `"` or `'` starts a quoted value that runs to the
/// next token ending with the same quote (the opening token may close
/// itself). An unterminated quote runs to the end of input.
pub fn parse_positionals<T: AsRef<str>>(tokens: &[T], args: &[PositionalArg]) -> Positionals {
    let mut values = BTreeMap::new();
    let mut t = 0;

    for arg in args {
        if t >= tokens.len() {
            break;
        }

        if arg.consumes_remainder {
            values.insert(arg.name.clone(), join(&tokens[t..]));
            t = tokens.len();
            break;
        }

        let token = tokens[t].as_ref();
        let Some(quote) = opening_quote(token) else {
            values.insert(arg.name.clone(), token.to_owned());
            t += 1;
            continue;
        };

        let closing = (t..tokens.len()).find(|&j| {
            let candidate = tokens[j].as_ref();
            let body = if j == t { &candidate[1..] } else { candidate };
            body.ends_with(quote)
        });

        let value = match closing {
            Some(end) => {
                let span = join(&tokens[t..=end]);
                t = end + 1;
                strip_quote(&span, quote, true)
            }
            None => {
                let span = join(&tokens[t..]);
                t = tokens.len();
                strip_quote(&span, quote, false)
            }
        };
        values.insert(arg.name.clone(), value);
    }

    Positionals {
        values,
        unconsumed: tokens[t..].iter().map(|s| s.as_ref().to_owned()).collect(),
    }
}

fn opening_quote(token: &str) -> Option<char> {
    token.chars().next().filter(|c| matches!(c, '"' | '\''))
}

fn strip_quote(span: &str, quote: char, closed: bool) -> String {
    let inner = span.strip_prefix(quote).unwrap_or(span);
    let inner = if closed {
        inner.strip_suffix(quote).unwrap_or(inner)
    } else {
        inner
    };
    inner.to_owned()
}

fn join<T: AsRef<str>>(tokens: &[T]) -> String {
    tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}
