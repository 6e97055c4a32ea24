//! When to translate keys, and into what.
//!
//! Each leg is decided on its own:
//!
//! | Leg | Needs |
//! |---|---|
//! | inbound | an inflection, a matching *request* content type, `exclude_params` false |
//! | outbound | an inflection, a matching *response* content type, `exclude_response` false |
//!
//! The inflection comes from the selector header when it is present, or the
//! configured default when it is not. A present header with an unknown value
//! turns translation off for that request.

use std::sync::Arc;

use crate::inflection::Inflection;
use crate::request::{Request, RequestHead};
use crate::response::Response;

/// Predicate over a media type (`content-type` value, `""` when absent).
pub type ContentTypeCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Vetoes the inbound leg for a request.
pub type ExcludeParams = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Vetoes the outbound leg for a request/response pair.
pub type ExcludeResponse = Arc<dyn Fn(&RequestHead, &Response) -> bool + Send + Sync>;

/// Conventional header selecting the client's inflection.
pub const DEFAULT_HEADER: &str = "x-key-inflection";

/// Path prefixes whose responses are never translated by default.
///
/// Framework-internal endpoints (direct uploads, mailbox ingress, …) speak
/// a fixed wire format that clients parse verbatim.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/rails"];

const JSON_MEDIA_TYPES: &[&str] = &["application/json", "application/vnd.api+json"];

/// Default content-type check: `application/json` or
/// `application/vnd.api+json` anywhere in the value, parameters ignored.
pub fn is_json(content_type: &str) -> bool {
    JSON_MEDIA_TYPES.iter().any(|media| content_type.contains(media))
}

/// Default response exclusion: the request path starts with one of
/// [`DEFAULT_EXCLUDED_PREFIXES`].
pub fn is_reserved_path(head: &RequestHead, _res: &Response) -> bool {
    DEFAULT_EXCLUDED_PREFIXES.iter().any(|prefix| head.path().starts_with(prefix))
}

/// The per-request decision logic. Immutable once built.
#[derive(Clone)]
pub struct Policy {
    pub(crate) header_name: String,
    pub(crate) default_inflection: Option<Inflection>,
    pub(crate) content_type_check: ContentTypeCheck,
    pub(crate) exclude_params: ExcludeParams,
    pub(crate) exclude_response: ExcludeResponse,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_HEADER.to_owned(),
            default_inflection: None,
            content_type_check: Arc::new(is_json),
            exclude_params: Arc::new(|_: &Request| false),
            exclude_response: Arc::new(is_reserved_path),
        }
    }
}

impl Policy {
    /// The client's inflection, if any.
    ///
    /// `snake` is the backend's own convention, not one a client can ask
    /// for: it resolves to `None` like any other unrecognised value.
    pub fn resolve_inflection(&self, head: &RequestHead) -> Option<Inflection> {
        let inflection = match head.headers().get(self.header_name.as_str()) {
            Some(value) => value.to_str().ok().and_then(|v| v.parse().ok()),
            None => self.default_inflection,
        };
        inflection.filter(|&i| i != Inflection::Snake)
    }

    pub fn should_transform_inbound(&self, req: &Request) -> bool {
        self.resolve_inflection(req.head()).is_some()
            && (self.content_type_check)(req.content_type().unwrap_or_default())
            && !(self.exclude_params)(req)
    }

    pub fn should_transform_outbound(&self, head: &RequestHead, res: &Response) -> bool {
        self.resolve_inflection(head).is_some()
            && (self.content_type_check)(res.content_type().unwrap_or_default())
            && !(self.exclude_response)(head, res)
    }
}
