//! Incoming HTTP request type.
//!
//! A [`Request`] carries three separate parameter containers:
//!
//! - **path params** bound by the router (`/posts/{postId}`), read-only;
//! - **body params**, decoded from the body once at construction;
//! - **query params**, decoded from the query string once at construction.
//!
//! Middleware may rewrite the body and query containers in place. The raw
//! body bytes are never rewritten.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, header};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::params::parse_nested_query;

/// Method, path, query string and headers of a request.
///
/// Cheap to clone relative to a full request; outbound middleware logic keeps
/// one around after the request itself has been handed to the next layer.
#[derive(Clone, Debug)]
pub struct RequestHead {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: HeaderMap,
}

impl RequestHead {
    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query_string(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(header::CONTENT_TYPE.as_str())
    }
}

/// An incoming HTTP request, after routing.
#[derive(Debug)]
pub struct Request {
    pub(crate) head: RequestHead,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) body_params: Option<Value>,
    pub(crate) query_params: Map<String, Value>,
}

impl Request {
    pub(crate) fn new(req: http::Request<Bytes>, params: HashMap<String, String>) -> Self {
        let (parts, body) = req.into_parts();
        let head = RequestHead {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
        };

        let query_params = head.query.as_deref().map(parse_nested_query).unwrap_or_default();
        let body_params = decode_body(head.content_type(), &body);

        Self { head, body, params, body_params, query_params }
    }

    pub fn head(&self) -> &RequestHead { &self.head }
    pub fn method(&self) -> &Method { &self.head.method }
    pub fn path(&self) -> &str { &self.head.path }
    pub fn query_string(&self) -> Option<&str> { self.head.query_string() }
    pub fn headers(&self) -> &HeaderMap { &self.head.headers }

    /// The body exactly as received.
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.header(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.head.content_type()
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> { &self.params }

    /// Parameters decoded from the body: JSON, or a url-encoded form.
    /// `None` when the body is empty or could not be decoded.
    pub fn body_params(&self) -> Option<&Value> { self.body_params.as_ref() }
    pub fn body_params_mut(&mut self) -> Option<&mut Value> { self.body_params.as_mut() }

    /// Parameters decoded from the query string. Empty when there is none.
    pub fn query_params(&self) -> &Map<String, Value> { &self.query_params }
    pub fn query_params_mut(&mut self) -> &mut Map<String, Value> { &mut self.query_params }

    /// Deserializes the body parameters, falling back to the raw body.
    ///
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct NewPost { author_name: String }
    ///
    /// async fn create(req: Request) -> Response {
    ///     match req.json::<NewPost>() {
    ///         Ok(post) => Response::text(post.author_name),
    ///         Err(_)   => Response::status(StatusCode::UNPROCESSABLE_ENTITY),
    ///     }
    /// }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match &self.body_params {
            Some(value) => Ok(T::deserialize(value)?),
            None => Ok(serde_json::from_slice(&self.body)?),
        }
    }

    /// Deserializes the query parameters.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(T::deserialize(&Value::Object(self.query_params.clone()))?)
    }
}

fn decode_body(content_type: Option<&str>, body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    if content_type.is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded")) {
        let form = std::str::from_utf8(body).ok()?;
        return Some(Value::Object(parse_nested_query(form)));
    }
    serde_json::from_slice(body).ok()
}
