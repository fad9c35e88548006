//! Interaction option trees.
//!
//! A command interaction carries its arguments as a tree. The first level
//! may be a subcommand group (whose single child is a subcommand), a bare
//! subcommand, or the root command's own value options.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Numeric option type tags as the platform sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OptionType {
    /// A subcommand; its `options` are the leaf's arguments
    SubCommand,
    /// A group of subcommands; holds exactly one `SubCommand`
    SubCommandGroup,
    /// Free text
    String,
    /// Whole number
    Integer,
    /// true/false
    Boolean,
    /// User reference
    User,
    /// Channel reference
    Channel,
    /// Role reference
    Role,
    /// User or role reference
    Mentionable,
    /// Floating point number
    Number,
    /// Uploaded file reference
    Attachment,
}

impl OptionType {
    /// The numeric wire tag.
    pub const fn code(self) -> u8 {
        match self {
            Self::SubCommand => 1,
            Self::SubCommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
            Self::Number => 10,
            Self::Attachment => 11,
        }
    }

    /// Whether this option only routes to another command.
    pub const fn is_routing(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}

/// An option type tag outside the known range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown option type {0}")]
pub struct UnknownOptionType(pub u8);

impl TryFrom<u8> for OptionType {
    type Error = UnknownOptionType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            other => return Err(UnknownOptionType(other)),
        })
    }
}

impl From<OptionType> for u8 {
    fn from(kind: OptionType) -> Self {
        kind.code()
    }
}

/// A scalar option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Number(f64),
    /// String value (also ids of users, channels, roles, attachments)
    String(String),
}

impl OptionValue {
    /// The value as text, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// One node of an interaction's option tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOption {
    /// Option (or subcommand/group) name.
    pub name: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Scalar value for non-routing options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue>,
    /// Nested options for subcommands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionOption>,
}

impl InteractionOption {
    /// A routing option (subcommand or group) with nested options.
    pub fn routing(kind: OptionType, name: impl Into<String>, options: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
            options,
        }
    }

    /// A scalar option.
    pub fn value(kind: OptionType, name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Some(value),
            options: Vec::new(),
        }
    }
}
