//! Middleware layer.
//!
//! Middleware wraps route handlers. Each layer receives the request and a
//! [`Next`] it may run to reach the layers behind it and, finally, the route
//! handler. It can rewrite the request before calling `next`, rewrite the
//! response after, or answer on its own without calling `next` at all.
//!
//! ```rust,no_run
//! use keycase::middleware::{self, KeyInflection, Next};
//! use keycase::{Request, Response, Router};
//!
//! async fn log_path(req: Request, next: Next) -> Response {
//!     let path = req.path().to_owned();
//!     let res = next.run(req).await;
//!     tracing::info!(%path, status = %res.status_code(), "handled");
//!     res
//! }
//!
//! let app = Router::new()
//!     .layer(middleware::from_fn(log_path))
//!     .layer(KeyInflection::new());
//! ```
//!
//! Layers run in registration order: the first one registered sees the
//! request first and the response last.
//!
//! Built-in middleware:
//! - [`KeyInflection`]: JSON key case translation between client and backend

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;
use crate::response::Response;

pub mod key_inflection;

pub use key_inflection::{KeyInflection, KeyInflectionBuilder};

/// A request/response interceptor.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

/// A type-erased middleware shared across concurrent requests.
pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The rest of the chain behind the current layer.
pub struct Next {
    layers: Arc<[BoxedMiddleware]>,
    index: usize,
    handler: BoxedHandler,
}

impl Next {
    pub(crate) fn new(layers: Arc<[BoxedMiddleware]>, handler: BoxedHandler) -> Self {
        Self { layers, index: 0, handler }
    }

    /// Runs the remaining layers and the route handler.
    pub async fn run(self, req: Request) -> Response {
        match self.layers.get(self.index).cloned() {
            Some(layer) => {
                let next = Self { index: self.index + 1, ..self };
                layer.call(req, next).await
            }
            None => self.handler.call(req).await,
        }
    }
}

/// Adapts an async function into a [`Middleware`].
///
/// ```text
/// async fn name(req: Request, next: Next) -> Response
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    FromFn(f)
}

/// Middleware returned by [`from_fn`].
pub struct FromFn<F>(F);

impl<F, Fut> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin((self.0)(req, next))
    }
}
