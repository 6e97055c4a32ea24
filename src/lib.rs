//! # keycase
//!
//! JSON key-case translation between frontend clients and Rust backends, on
//! a minimal hyper-based HTTP framework.
//!
//! ## The contract
//!
//! Clients say which convention they speak with one header:
//!
//! ```text
//! X-Key-Inflection: camel | dash | pascal
//! ```
//!
//! The [`KeyInflection`](middleware::KeyInflection) middleware then:
//!
//! - rewrites body and query parameter keys to `snake_case` before your
//!   handler runs, so handlers only ever deal with one convention;
//! - rewrites the keys of JSON responses into the client's convention on the
//!   way out.
//!
//! Path parameters, string values, array order and anything that is not JSON
//! pass through untouched. Requests without the header (and no configured
//! default) are not touched at all.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::Method;
//! use keycase::middleware::KeyInflection;
//! use keycase::{Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .on(Method::PUT, "/posts/{postId}", update_post)
//!         .layer(KeyInflection::new());
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn update_post(req: Request) -> Response {
//!     // `{"post":{"authorName":"Ada"}}` from a camel client arrives as
//!     // `{"post":{"author_name":"Ada"}}`.
//!     let author = req.body_params()
//!         .and_then(|p| p["post"]["author_name"].as_str())
//!         .unwrap_or("unknown");
//!
//!     // ...and this goes back out as `{"postAuthorName":"Ada"}`.
//!     Response::json(format!(r#"{{"post_author_name":"{author}"}}"#))
//! }
//! ```
//!
//! The case converters and the tree rewrite are usable on their own, see
//! [`inflection`].

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod inflection;
pub mod middleware;
pub mod params;

pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use inflection::{Inflection, transform_keys};
pub use request::{Request, RequestHead};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
