//! Minimal keycase example: a JSON post endpoint behind key inflection.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -X PUT 'http://localhost:3000/posts/1234?categoryFilter[categoryName][]=food' \
//!        -H 'content-type: application/json' \
//!        -H 'x-key-inflection: camel' \
//!        -d '{"post":{"authorName":"John Smith"}}'
//!   → {"postId":"1234","postAuthorName":"John Smith","categoryFilterName":["food"]}
//!
//!   Same request with `x-key-inflection: dash`, or without the header.

use http::{Method, StatusCode};
use keycase::middleware::{self, KeyInflection, Next};
use keycase::{Request, Response, Router, Server};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .on(Method::PUT, "/posts/{postId}", update_post)
        .on(Method::GET, "/posts", list_posts)
        .layer(middleware::from_fn(access_log))
        .layer(KeyInflection::new());

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.path().to_owned();
    let res = next.run(req).await;
    info!(%method, %path, status = %res.status_code(), "request");
    res
}

// PUT /posts/{postId}
//
// Handlers read snake_case keys no matter what the client sent. The path
// parameter keeps its original name.
async fn update_post(req: Request) -> Response {
    let Some(params) = req.body_params() else {
        return Response::status(StatusCode::BAD_REQUEST);
    };

    let payload = json!({
        "post_id": req.param("postId"),
        "post_author_name": params["post"]["author_name"],
        "category_filter_name": req.query_params()
            .get("category_filter")
            .and_then(|filter| filter.get("category_name")),
    });

    Response::json(payload.to_string())
}

// GET /posts
async fn list_posts(_req: Request) -> Response {
    Response::json(r#"[{"post_id":1,"author_name":"Ada"},{"post_id":2,"author_name":"Grace"}]"#)
}
