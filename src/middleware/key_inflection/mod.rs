//! Key-inflection middleware.
//!
//! Frontends tend to speak `camelCase` or `dash-case`; Rust backends speak
//! `snake_case`. [`KeyInflection`] sits between the two:
//!
//! 1. **Inbound**: when the client names an inflection (`X-Key-Inflection:
//!    camel`) and sent JSON, the body and query parameter containers are
//!    rewritten to `snake_case` before the handler sees them. Path
//!    parameters are left alone.
//! 2. The inner handler runs.
//! 3. **Outbound**: when the response is JSON, each body chunk is parsed and
//!    its keys rewritten into the client's inflection. A chunk that is not
//!    valid JSON is sent unchanged.
//!
//! ```rust,no_run
//! use http::Method;
//! use keycase::middleware::KeyInflection;
//! use keycase::{Inflection, Request, Response, Router};
//!
//! async fn show(_req: Request) -> Response {
//!     Response::json(r#"{"post":{"author_name":"Adam Smith"}}"#)
//! }
//!
//! let app = Router::new()
//!     .on(Method::GET, "/posts/{id}", show)
//!     .layer(
//!         KeyInflection::builder()
//!             .default_inflection(Inflection::Camel)
//!             .exclude_params(|req| req.path().starts_with("/webhooks"))
//!             .build(),
//!     );
//! ```
//!
//! Nothing here fails: unknown inflections, non-JSON content and malformed
//! bodies all mean "leave the data as it is".

use std::sync::Arc;

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::handler::BoxFuture;
use crate::inflection::case::to_snake_case;
use crate::inflection::{Inflection, transform_keys};
use crate::middleware::{Middleware, Next};
use crate::request::{Request, RequestHead};
use crate::response::Response;

pub mod policy;

pub use policy::{ContentTypeCheck, ExcludeParams, ExcludeResponse, Policy};

/// A key converter, e.g. a replacement for the built-in camel-casing.
pub type Converter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The key-inflection middleware. See the [module docs](self).
///
/// Configuration is fixed at [`build`](KeyInflectionBuilder::build) time and
/// shared read-only by every request; cloning is an `Arc` bump.
#[derive(Clone)]
pub struct KeyInflection {
    inner: Arc<Inner>,
}

struct Inner {
    policy: Policy,
    camelize: Converter,
    dasherize: Converter,
    pascalize: Converter,
}

impl KeyInflection {
    /// All defaults: header `x-key-inflection`, no default inflection, JSON
    /// content types only, `/rails*` responses excluded.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> KeyInflectionBuilder {
        KeyInflectionBuilder {
            policy: Policy::default(),
            camelize: None,
            dasherize: None,
            pascalize: None,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.inner.policy
    }

    /// The converter used on the outbound leg for `inflection`.
    pub fn converter(&self, inflection: Inflection) -> Converter {
        match inflection {
            Inflection::Snake  => Arc::new(to_snake_case),
            Inflection::Camel  => Arc::clone(&self.inner.camelize),
            Inflection::Dash   => Arc::clone(&self.inner.dasherize),
            Inflection::Pascal => Arc::clone(&self.inner.pascalize),
        }
    }

    async fn intercept(self, mut req: Request, next: Next) -> Response {
        let Some(inflection) = self.inner.policy.resolve_inflection(req.head()) else {
            return next.run(req).await;
        };

        if self.inner.policy.should_transform_inbound(&req) {
            debug!(%inflection, path = req.path(), "normalising request params to snake_case");
            normalize_params(&mut req);
        }

        let head: RequestHead = req.head().clone();
        let mut res = next.run(req).await;

        if self.inner.policy.should_transform_outbound(&head, &res) {
            trace!(%inflection, path = head.path(), "translating response keys");
            let convert = self.converter(inflection);
            rewrite_body(&mut res, convert.as_ref());
        }
        res
    }
}

impl Default for KeyInflection {
    fn default() -> Self { Self::new() }
}

impl Middleware for KeyInflection {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(self.clone().intercept(req, next))
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`KeyInflection`]. Every option has a default.
pub struct KeyInflectionBuilder {
    policy: Policy,
    camelize: Option<Converter>,
    dasherize: Option<Converter>,
    pascalize: Option<Converter>,
}

impl KeyInflectionBuilder {
    /// Name of the selector header. Default `x-key-inflection`.
    pub fn header_name(mut self, name: &str) -> Self {
        self.policy.header_name = name.to_ascii_lowercase();
        self
    }

    /// Inflection used when the request carries no selector header.
    /// [`Inflection::Snake`] means no translation.
    pub fn default_inflection(mut self, inflection: Inflection) -> Self {
        self.policy.default_inflection = Some(inflection);
        self
    }

    pub fn camelize(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.camelize = Some(Arc::new(f));
        self
    }

    pub fn dasherize(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.dasherize = Some(Arc::new(f));
        self
    }

    pub fn pascalize(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.pascalize = Some(Arc::new(f));
        self
    }

    /// Replaces the JSON media-type check, applied to the request on the way
    /// in and to the response on the way out.
    pub fn content_type_check(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.policy.content_type_check = Arc::new(f);
        self
    }

    /// Skips the inbound leg when `f` returns true.
    pub fn exclude_params(mut self, f: impl Fn(&Request) -> bool + Send + Sync + 'static) -> Self {
        self.policy.exclude_params = Arc::new(f);
        self
    }

    /// Skips the outbound leg when `f` returns true. Replaces the default
    /// reserved-path exclusion.
    pub fn exclude_response(
        mut self,
        f: impl Fn(&RequestHead, &Response) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.policy.exclude_response = Arc::new(f);
        self
    }

    pub fn build(self) -> KeyInflection {
        let builtin = |inflection: Inflection| -> Converter { Arc::new(inflection.converter()) };
        KeyInflection {
            inner: Arc::new(Inner {
                policy: self.policy,
                camelize: self.camelize.unwrap_or_else(|| builtin(Inflection::Camel)),
                dasherize: self.dasherize.unwrap_or_else(|| builtin(Inflection::Dash)),
                pascalize: self.pascalize.unwrap_or_else(|| builtin(Inflection::Pascal)),
            }),
        }
    }
}

// ── Legs ──────────────────────────────────────────────────────────────────────

/// Rewrites the body and query containers of `req` to `snake_case` keys.
/// Path parameters are not touched.
pub fn normalize_params(req: &mut Request) {
    if let Some(body) = req.body_params_mut() {
        *body = transform_keys(std::mem::take(body), &to_snake_case);
    }

    let query = std::mem::take(req.query_params_mut());
    *req.query_params_mut() = match transform_keys(Value::Object(query), &to_snake_case) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
}

/// Rewrites every JSON chunk of the response body with `convert`.
///
/// Chunks that do not parse are left as they are. If anything was rewritten
/// a stale `content-length` is dropped; the transport sets the real one.
pub fn rewrite_body(res: &mut Response, convert: &dyn Fn(&str) -> String) {
    let mut rewritten = false;
    for chunk in res.chunks_mut() {
        if let Some(out) = rewrite_chunk(chunk, convert) {
            *chunk = out;
            rewritten = true;
        }
    }
    if rewritten {
        res.remove_header("content-length");
    }
}

fn rewrite_chunk(chunk: &[u8], convert: &dyn Fn(&str) -> String) -> Option<Bytes> {
    let root: Value = match serde_json::from_slice(chunk) {
        Ok(value) => value,
        Err(error) => {
            debug!(%error, "response chunk is not JSON, passing it through");
            return None;
        }
    };

    // Array roots: every element is translated as a root of its own.
    let root = match root {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| transform_keys(item, convert)).collect())
        }
        other => transform_keys(other, convert),
    };

    serde_json::to_vec(&root).ok().map(Bytes::from)
}
