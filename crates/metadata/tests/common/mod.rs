#![allow(dead_code)]

use wiremock::{MockServer, Request};

/// Requests the mock server received, oldest first.
pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

pub async fn last_request(server: &MockServer) -> Request {
    requests(server)
        .await
        .pop()
        .expect("mock server received no request")
}

pub fn query(req: &Request, key: &str) -> Option<String> {
    req.url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn header(req: &Request, key: &str) -> Option<String> {
    req.headers
        .get(key)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn body(req: &Request) -> String {
    String::from_utf8_lossy(&req.body).into_owned()
}
