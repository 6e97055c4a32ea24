//! One real HTTP/1.1 round trip through the server and the middleware.

use http::Method;
use keycase::middleware::KeyInflection;
use keycase::{Request, Response, Router, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn echo_author(req: Request) -> Response {
    let author = req
        .body_params()
        .and_then(|p| p["post"]["author_name"].as_str())
        .unwrap_or("missing")
        .to_owned();
    let post_id = req.param("postId").unwrap_or("missing").to_owned();
    Response::json(format!(r#"{{"post_id":"{post_id}","post_author_name":"{author}"}}"#))
}

#[tokio::test]
async fn translates_keys_over_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .on(Method::PUT, "/posts/{postId}", echo_author)
        .layer(KeyInflection::new());
    let server = tokio::spawn(Server::serve_listener(listener, app));

    let body = r#"{"post":{"authorName":"John Smith"}}"#;
    let request = format!(
        "PUT /posts/1234 HTTP/1.1\r\n\
         host: {addr}\r\n\
         content-type: application/json\r\n\
         x-key-inflection: camel\r\n\
         content-length: {}\r\n\
         connection: close\r\n\
         \r\n\
         {body}",
        body.len(),
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    server.abort();

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "unexpected response: {raw}");
    assert!(raw.contains("content-type: application/json"), "unexpected response: {raw}");
    assert!(raw.ends_with(r#"{"postId":"1234","postAuthorName":"John Smith"}"#), "unexpected response: {raw}");
}
