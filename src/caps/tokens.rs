//! Clearance tokens.
//!
//! A [`Clearance`] proves the permission gate passed for a command node. It
//! can only be minted inside the `caps` module, so code holding one knows
//! the checks ran.

use std::fmt;

/// Proof that the gate let an invocation through a node.
///
/// Not `Clone` or `Copy`: each check yields one token.
pub struct Clearance {
    /// Path of the cleared node.
    path: String,
    /// The caller bypassed user capability checks as an admin.
    as_admin: bool,
}

impl Clearance {
    #[inline]
    pub(super) fn new(path: String, as_admin: bool) -> Self {
        Self { path, as_admin }
    }

    /// Path of the node this clearance was issued for.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether user capability checks were skipped for an admin.
    #[inline]
    pub fn as_admin(&self) -> bool {
        self.as_admin
    }
}

impl fmt::Debug for Clearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clearance")
            .field("path", &self.path)
            .field("as_admin", &self.as_admin)
            .finish()
    }
}

impl fmt::Display for Clearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clearance({})", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearance_accessors() {
        let c = Clearance::new("dev eval".to_string(), true);
        assert_eq!(c.path(), "dev eval");
        assert!(c.as_admin());
        assert_eq!(c.to_string(), "Clearance(dev eval)");
        assert!(format!("{c:?}").contains("dev eval"));
    }
}
