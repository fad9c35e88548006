//! Core handler infrastructure.
//!
//! - [`context`]: the per-invocation [`InvocationContext`]
//! - [`middleware`]: the priority-ordered [`MiddlewarePipeline`]
//! - [`registry`]: the [`Dispatcher`] that ties resolution, the permission
//!   gate and handlers together
//! - [`traits`]: [`CommandHandler`] and [`Transport`]

pub mod context;
pub mod middleware;
pub mod registry;
pub mod traits;

pub use context::{Args, InvocationContext, Origin, RawArgs};
pub use middleware::{FnMiddleware, Middleware, MiddlewarePipeline, middleware_fn};
pub use registry::{Dispatched, Dispatcher};
pub use traits::{CommandHandler, Transport};
