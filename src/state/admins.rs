//! The bot admin roster.
//!
//! One owned, versioned set of admin user ids. Contexts take a snapshot when
//! they are built, so a change made while an invocation runs only affects
//! later invocations.

use parking_lot::RwLock;
use parley_proto::UserId;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// An immutable view of the roster at one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSnapshot {
    version: u64,
    ids: BTreeSet<UserId>,
}

impl AdminSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.ids.iter()
    }
}

/// The admin roster. All changes go through [`update`](Self::update).
#[derive(Debug, Default)]
pub struct AdminRoster {
    current: RwLock<Arc<AdminSnapshot>>,
}

impl AdminRoster {
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            current: RwLock::new(Arc::new(AdminSnapshot {
                version: 0,
                ids: ids.into_iter().collect(),
            })),
        }
    }

    /// The current roster.
    pub fn snapshot(&self) -> Arc<AdminSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Apply `change` and publish the result as a new version.
    ///
    /// Returns the new version number.
    pub fn update(&self, change: impl FnOnce(&mut BTreeSet<UserId>)) -> u64 {
        let mut current = self.current.write();
        let mut ids = current.ids.clone();
        change(&mut ids);

        let next = AdminSnapshot {
            version: current.version + 1,
            ids,
        };
        info!(version = next.version, admins = next.ids.len(), "Admin roster updated");
        let version = next.version;
        *current = Arc::new(next);
        version
    }

    pub fn add(&self, id: UserId) -> u64 {
        self.update(|ids| {
            ids.insert(id);
        })
    }

    pub fn remove(&self, id: &UserId) -> u64 {
        self.update(|ids| {
            ids.remove(id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_are_isolated() {
        let roster = AdminRoster::new([UserId::from("1")]);
        let before = roster.snapshot();

        assert_eq!(roster.add(UserId::from("2")), 1);
        let after = roster.snapshot();

        assert!(!before.contains(&UserId::from("2")));
        assert_eq!(before.version(), 0);
        assert!(after.contains(&UserId::from("2")));
        assert_eq!(after.len(), 2);

        assert_eq!(roster.remove(&UserId::from("1")), 2);
        assert!(!roster.snapshot().contains(&UserId::from("1")));
    }
}
