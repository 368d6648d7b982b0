//! Shared helpers for integration tests: serve stub upstream services on
//! ephemeral ports inside the test runtime.

use axum::http::{header, HeaderMap};
use axum::Router;

/// Serve a stub router on an ephemeral port, returning its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{}", addr)
}

/// Whether the request carries `token` as a bearer header or TOKEN cookie.
#[allow(dead_code)]
pub fn authorized(headers: &HeaderMap, token: &str) -> bool {
    let bearer = format!("Bearer {}", token);
    let cookie = format!("TOKEN={}", token);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == bearer)
        .unwrap_or(false)
        || headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split("; ").any(|c| c == cookie))
            .unwrap_or(false)
}
