//! Command permissions.
//!
//! The system has three parts:
//!
//! 1. **[`CapabilityChecker`]**: the platform-side lookup answering "does
//!    subject X hold capability C in channel Y?".
//! 2. **[`PermissionGate`]**: evaluates a command node's admin, bot and user
//!    requirements through the checker.
//! 3. **[`Clearance`]**: the token the gate issues when a check passes.
//!    Only the gate can mint one.

mod authority;
mod tokens;

pub use authority::{CapabilityChecker, PermissionGate};
pub use tokens::Clearance;
