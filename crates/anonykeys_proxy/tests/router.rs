use std::sync::Arc;

use anonykeys_engine::{FetchSettings, ReqwestFetcher, INCOGNITO_USER_AGENT};
use anonykeys_proxy::router;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app() -> Router {
    router(Arc::new(ReqwestFetcher::new(FetchSettings::default())))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[tokio::test]
async fn options_returns_preflight_headers() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type, X-User-Id"
    );
    assert_eq!(response.headers()["access-control-max-age"], "86400");
}

#[tokio::test]
async fn post_is_method_not_allowed() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/?url=example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    // Port 9 (discard) on localhost is not expected to accept connections.
    let target = encode("http://127.0.0.1:9/");
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/?url={target}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Proxy error: "));
}

#[tokio::test]
async fn get_proxies_and_rewrites_with_privacy_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .and(header("user-agent", INCOGNITO_USER_AGENT))
        .and(header("dnt", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/about">about</a>"#, "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let target = encode(&format!("{}/home", server.uri()));
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/?url={target}&incognito=true&vpn=TRUE"))
                .header("user-agent", "Tester/1.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers["x-proxied"], "true");
    assert_eq!(headers["x-vpn-active"], "True");
    assert_eq!(headers["x-incognito-active"], "True");
    assert_eq!(headers["x-upstream-status"], "200");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        body_text(response).await,
        format!(r#"<a href="{}/about">about</a>"#, server.uri())
    );

    let requests = server.received_requests().await.unwrap();
    let forwarded = requests[0].headers["x-forwarded-for"].to_str().unwrap();
    assert!(forwarded.starts_with("142."));
}

#[tokio::test]
async fn upstream_status_is_reported_not_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("busy", "text/plain"))
        .mount(&server)
        .await;

    let target = encode(&server.uri());
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/?url={target}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-upstream-status"], "503");
    assert_eq!(response.headers()["x-vpn-active"], "False");
    assert_eq!(body_text(response).await, "busy");
}
