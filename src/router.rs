//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; middleware registered with [`Router::layer`] wraps every
//! route.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Arc<[BoxedMiddleware]>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Arc::new([]) }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use http::Method;
    /// # use keycase::{Request, Response, Router};
    /// # async fn show_post(_: Request) -> Response { Response::text("") }
    /// # async fn update_post(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET, "/posts/{postId}", show_post)
    ///     .on(Method::PUT, "/posts/{postId}", update_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with one
    /// already registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Wrap every route in `middleware`.
    ///
    /// Layers run in registration order: the first one added is outermost.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(Arc::new(middleware));
        self.layers = layers.into();
        self
    }

    /// Routes one request through the layers and its handler.
    ///
    /// Unknown routes get `404 Not Found` without running any layer.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        match self.lookup(req.method(), req.uri().path()) {
            Some((handler, params)) => {
                Next::new(Arc::clone(&self.layers), handler)
                    .run(Request::new(req, params))
                    .await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::middleware::{self, Next};

    fn get(path: &str) -> http::Request<Bytes> {
        http::Request::builder().uri(path).body(Bytes::new()).unwrap()
    }

    #[tokio::test]
    async fn routes_by_method_and_binds_path_params() {
        let app = Router::new()
            .on(Method::GET, "/posts/{postId}", |req: Request| async move {
                format!("post {}", req.param("postId").unwrap_or_default())
            });

        let found = app.handle(get("/posts/42")).await;
        let missing = app.handle(get("/users/42")).await;
        let wrong_method = app
            .handle(http::Request::builder().method(Method::POST).uri("/posts/42").body(Bytes::new()).unwrap())
            .await;

        assert_eq!(found.body(), "post 42");
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(wrong_method.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn layers_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let tag = |name: &'static str, seen: Arc<Mutex<Vec<&'static str>>>| {
            middleware::from_fn(move |req: Request, next: Next| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(name);
                    next.run(req).await
                }
            })
        };

        let app = Router::new()
            .on(Method::GET, "/", |_req: Request| async { "ok" })
            .layer(tag("outer", Arc::clone(&seen)))
            .layer(tag("inner", Arc::clone(&seen)));

        let res = app.handle(get("/")).await;

        assert_eq!(res.body(), "ok");
        assert_eq!(*seen.lock().unwrap(), ["outer", "inner"]);
    }

    #[tokio::test]
    async fn layers_do_not_run_for_unknown_routes() {
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);

        let app = Router::new()
            .on(Method::GET, "/", |_req: Request| async { "ok" })
            .layer(middleware::from_fn(move |req: Request, next: Next| {
                *counter.lock().unwrap() += 1;
                next.run(req)
            }));

        app.handle(get("/nowhere")).await;

        assert_eq!(*hits.lock().unwrap(), 0);
    }
}
