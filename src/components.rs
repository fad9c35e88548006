//! Component interaction routing.
//!
//! Buttons and select menus carry a developer-assigned custom id. Listeners
//! subscribe with a matcher and run for every component event whose custom
//! id it accepts.

use crate::error::HandlerError;
use crate::state::BotState;
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::join_all;
use parley_proto::ComponentEvent;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle returned by [`ComponentRouter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which custom ids a listener accepts.
#[derive(Debug, Clone)]
pub enum CustomIdMatcher {
    /// The whole id must equal this string. Use `Pattern` for substring or
    /// regex matching.
    Exact(String),
    Pattern(Regex),
    /// Accepts an id if any member does.
    Any(Vec<CustomIdMatcher>),
}

impl CustomIdMatcher {
    pub fn matches(&self, custom_id: &str) -> bool {
        match self {
            Self::Exact(id) => id == custom_id,
            Self::Pattern(re) => re.is_match(custom_id),
            Self::Any(all) => all.iter().any(|m| m.matches(custom_id)),
        }
    }
}

/// A plain string is an exact id, never a pattern.
impl From<&str> for CustomIdMatcher {
    fn from(id: &str) -> Self {
        Self::Exact(id.to_owned())
    }
}

impl From<String> for CustomIdMatcher {
    fn from(id: String) -> Self {
        Self::Exact(id)
    }
}

impl From<Regex> for CustomIdMatcher {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl<T: Into<CustomIdMatcher>> From<Vec<T>> for CustomIdMatcher {
    fn from(all: Vec<T>) -> Self {
        Self::Any(all.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
pub trait ComponentListener: Send + Sync {
    async fn on_component(&self, event: &ComponentEvent, state: &Arc<BotState>) -> Result<(), HandlerError>;
}

struct Subscription {
    matcher: CustomIdMatcher,
    listener: Arc<dyn ComponentListener>,
}

/// Custom-id based listener registry.
#[derive(Default)]
pub struct ComponentRouter {
    subscriptions: DashMap<SubscriptionId, Subscription>,
}

impl ComponentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        matcher: impl Into<CustomIdMatcher>,
        listener: impl ComponentListener + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.insert(
            id,
            Subscription {
                matcher: matcher.into(),
                listener: Arc::new(listener),
            },
        );
        debug!(subscription = %id, "Component listener subscribed");
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    pub fn clear(&self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Run every listener that accepts the event's custom id, concurrently.
    /// Returns how many ran. Listener failures are logged.
    pub async fn route(&self, event: &ComponentEvent, state: &Arc<BotState>) -> usize {
        // Release the map shards before awaiting
        let listeners: Vec<Arc<dyn ComponentListener>> = self
            .subscriptions
            .iter()
            .filter(|entry| entry.matcher.matches(&event.custom_id))
            .map(|entry| Arc::clone(&entry.listener))
            .collect();

        let results = join_all(listeners.iter().map(|l| l.on_component(event, state))).await;
        for error in results.into_iter().filter_map(Result::err) {
            warn!(
                custom_id = %event.custom_id,
                error = %error,
                code = error.error_code(),
                "Component listener failed"
            );
        }
        listeners.len()
    }
}

impl fmt::Debug for ComponentRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRouter")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
