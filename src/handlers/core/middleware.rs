//! Middleware pipeline.
//!
//! Steps run in ascending priority before a command is resolved. Each step
//! takes the context produced by the previous one and returns a new one.
//!
//! # Partial failure
//!
//! A failing step stops the pipeline. The failure is logged and the context
//! from the last successful step is handed on; nothing is rolled back and
//! nothing is retried. A step that returns a context for a different event
//! counts as failed.

use super::context::InvocationContext;
use crate::error::MiddlewareError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, trace};

/// One pipeline step.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Lower runs first.
    fn priority(&self) -> i32;

    async fn apply(&self, ctx: InvocationContext) -> Result<InvocationContext, MiddlewareError>;
}

/// A step built from an async closure.
pub struct FnMiddleware<F> {
    name: String,
    priority: i32,
    step: F,
}

/// Wrap an async closure as a [`Middleware`].
pub fn middleware_fn<F, Fut>(name: impl Into<String>, priority: i32, step: F) -> FnMiddleware<F>
where
    F: Fn(InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<InvocationContext, MiddlewareError>> + Send + 'static,
{
    FnMiddleware {
        name: name.into(),
        priority,
        step,
    }
}

#[async_trait]
impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<InvocationContext, MiddlewareError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn apply(&self, ctx: InvocationContext) -> Result<InvocationContext, MiddlewareError> {
        (self.step)(ctx).await
    }
}

/// Ordered middleware steps.
#[derive(Default)]
pub struct MiddlewarePipeline {
    /// Kept sorted by priority; equal priorities keep insertion order.
    steps: RwLock<Vec<Arc<dyn Middleware>>>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step. Takes effect for the next run.
    pub fn register(&self, step: Arc<dyn Middleware>) {
        let mut steps = self.steps.write();
        steps.push(step);
        // Stable, so ties stay in insertion order
        steps.sort_by_key(|s| s.priority());
    }

    pub fn len(&self) -> usize {
        self.steps.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.read().is_empty()
    }

    /// Run every step in order.
    pub async fn run(&self, ctx: InvocationContext) -> InvocationContext {
        // Never hold the lock across an await
        let steps: Vec<Arc<dyn Middleware>> = self.steps.read().clone();

        let mut current = ctx;
        for step in steps {
            trace!(step = step.name(), priority = step.priority(), "Applying middleware");

            let result = match step.apply(current.clone()).await {
                Ok(next) if next.origin() != current.origin() => {
                    Err(MiddlewareError::OriginChanged)
                }
                other => other,
            };

            match result {
                Ok(next) => current = next,
                Err(e) => {
                    error!(
                        step = step.name(),
                        priority = step.priority(),
                        error = %e,
                        "Middleware failed, pipeline stopped"
                    );
                    return current;
                }
            }
        }
        current
    }
}
