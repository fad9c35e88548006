//! Unified error handling for parley.
//!
//! This module provides the error hierarchy for the command engine, with
//! automatic conversions, localized reply keys, and log labels.

use parley_proto::Capability;
use thiserror::Error;

// ============================================================================
// Localization Errors
// ============================================================================

/// Errors raised by the localization store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum L10nError {
    /// Unknown namespace or entry.
    #[error("localization key not found: {0}")]
    NotFound(String),

    /// An entry was assembled without a default-locale translation.
    #[error("{key} has no translation for default locale {locale}")]
    MissingDefault { key: String, locale: String },

    /// A plural placeholder lists the wrong number of forms for its locale.
    #[error("{key} ({locale}): plural placeholder has {found} forms, rule needs {expected}")]
    MalformedTemplate {
        key: String,
        locale: String,
        expected: usize,
        found: usize,
    },

    /// Locale data could not be read or decoded.
    #[error("failed to load locale data from {path}: {reason}")]
    Load { path: String, reason: String },
}

impl L10nError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MissingDefault { .. } => "missing_default",
            Self::MalformedTemplate { .. } => "malformed_template",
            Self::Load { .. } => "load_failed",
        }
    }
}

// ============================================================================
// Permission Errors
// ============================================================================

/// Why the permission gate refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// The command is admin-only and the caller is not an admin.
    AdminOnly,
    /// The bot lacks capabilities in the channel.
    NoBotPermissions,
    /// The caller lacks capabilities in the channel.
    NoUserPermissions,
}

impl DenyReason {
    /// Static label for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AdminOnly => "admin_only",
            Self::NoBotPermissions => "no_bot_permissions",
            Self::NoUserPermissions => "no_user_permissions",
        }
    }
}

/// A failed permission check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("permission denied ({}), missing: {missing:?}", reason.code())]
pub struct PermissionDenied {
    /// Which check failed.
    pub reason: DenyReason,
    /// The unmet subset of required capabilities (empty for `AdminOnly`).
    pub missing: Vec<Capability>,
}

impl PermissionDenied {
    pub fn admin_only() -> Self {
        Self {
            reason: DenyReason::AdminOnly,
            missing: Vec::new(),
        }
    }

    pub fn bot(missing: Vec<Capability>) -> Self {
        Self {
            reason: DenyReason::NoBotPermissions,
            missing,
        }
    }

    pub fn user(missing: Vec<Capability>) -> Self {
        Self {
            reason: DenyReason::NoUserPermissions,
            missing,
        }
    }

    /// Localization key of the user-visible reply.
    ///
    /// Returns `None` for admin-only denials: admin commands must not reveal
    /// that they exist.
    pub fn reply_key(&self) -> Option<&'static str> {
        match self.reason {
            DenyReason::AdminOnly => None,
            DenyReason::NoBotPermissions => Some("common.NO_BOT_PERMISSIONS_ERROR"),
            DenyReason::NoUserPermissions => Some("common.NO_USER_PERMISSIONS_ERROR"),
        }
    }
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Failures reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,

    #[error("send failed: {0}")]
    Send(String),
}

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur inside a command handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    L10n(#[from] L10nError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Transport(_) => "transport_error",
            Self::L10n(e) => e.error_code(),
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Middleware Errors
// ============================================================================

/// A middleware step refused or failed to transform an invocation.
#[derive(Debug, Error)]
pub enum MiddlewareError {
    #[error("rejected: {0}")]
    Rejected(String),

    /// The step returned a context for a different event.
    #[error("step replaced the invocation origin")]
    OriginChanged,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    L10n(#[from] L10nError),
}

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Outcome of a dispatch that did not reach a successful handler run.
///
/// None of these escape to the transport; the dispatcher logs them and, for
/// permission denials, sends a best-effort localized reply.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The interaction's option tree names no known command.
    #[error("unresolved command: {0}")]
    UnresolvedCommand(String),

    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    /// A leaf handler failed.
    #[error("command `{path}` failed: {source}")]
    HandlerFailure {
        path: String,
        #[source]
        source: HandlerError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedCommand(_) => "unresolved_command",
            Self::PermissionDenied(denied) => denied.reason.code(),
            Self::HandlerFailure { .. } => "handler_failure",
            Self::Transport(_) => "transport_error",
        }
    }
}

// ============================================================================
// Command Tree Errors (assembly-time validation)
// ============================================================================

/// Invalid command tree definitions, caught when the tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("trigger `{trigger}` is used twice under `{parent}`")]
    DuplicateTrigger { parent: String, trigger: String },

    #[error("`{command}`: remainder argument `{arg}` must be the last argument")]
    RemainderNotLast { command: String, arg: String },

    #[error("`{command}`: interaction commands nest at most root > group > subcommand")]
    NestingTooDeep { command: String },

    #[error("`{command}`: subcommand groups may only appear directly under a root command")]
    MisplacedGroup { command: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(L10nError::NotFound("x.y".into()).error_code(), "not_found");
        assert_eq!(
            HandlerError::MissingArgument("code".into()).error_code(),
            "missing_argument"
        );
        assert_eq!(
            HandlerError::L10n(L10nError::NotFound("a.b".into())).error_code(),
            "not_found"
        );
        assert_eq!(
            DispatchError::PermissionDenied(PermissionDenied::admin_only()).error_code(),
            "admin_only"
        );
    }

    #[test]
    fn test_admin_only_has_no_reply() {
        assert!(PermissionDenied::admin_only().reply_key().is_none());
        assert_eq!(
            PermissionDenied::bot(vec![Capability::EmbedLinks]).reply_key(),
            Some("common.NO_BOT_PERMISSIONS_ERROR")
        );
        assert_eq!(
            PermissionDenied::user(vec![Capability::KickMembers]).reply_key(),
            Some("common.NO_USER_PERMISSIONS_ERROR")
        );
    }
}
