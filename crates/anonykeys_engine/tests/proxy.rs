use std::sync::Mutex;

use anonykeys_engine::{
    handle_proxy_request, FailureKind, FetchError, FetchMetadata, FetchOutput, FetchRequest,
    FetchSettings, Fetcher, LoadId, ProgressSink, ProxyRequest, ReqwestFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers every fetch with a canned result and remembers what it was asked.
struct StubFetcher {
    result: Result<FetchOutput, FetchError>,
    seen: Mutex<Vec<FetchRequest>>,
}

impl StubFetcher {
    fn answering(result: Result<FetchOutput, FetchError>) -> Self {
        Self {
            result,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<FetchRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(
        &self,
        _load_id: LoadId,
        request: &FetchRequest,
        _sink: &dyn ProgressSink,
    ) -> Result<FetchOutput, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

fn page(status: u16, content_type: &str, body: &[u8]) -> FetchOutput {
    FetchOutput {
        bytes: body.to_vec(),
        metadata: FetchMetadata {
            original_url: "https://example.com/".into(),
            final_url: "https://example.com/".into(),
            status,
            redirect_count: 0,
            content_type: Some(content_type.into()),
            byte_len: body.len() as u64,
        },
    }
}

fn get(url: &str) -> ProxyRequest {
    ProxyRequest::from_query("GET", [("url", url)], None)
}

fn json_error(body: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(body).unwrap();
    value["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn preflight_answers_with_cors_headers_only() {
    let fetcher = StubFetcher::answering(Ok(page(200, "text/html", b"")));
    let response =
        handle_proxy_request(&fetcher, ProxyRequest::from_query("OPTIONS", [("url", "x")], None))
            .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        response.header("Access-Control-Allow-Methods"),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(response.header("Access-Control-Max-Age"), Some("86400"));
    assert!(response.body.is_empty());
    assert!(fetcher.seen().is_empty());
}

#[tokio::test]
async fn other_methods_are_refused() {
    let fetcher = StubFetcher::answering(Ok(page(200, "text/html", b"")));
    let response = handle_proxy_request(
        &fetcher,
        ProxyRequest::from_query("POST", [("url", "example.com")], None),
    )
    .await;

    assert_eq!(response.status, 405);
    assert_eq!(json_error(&response.body), "Method not allowed");
    assert!(fetcher.seen().is_empty());
}

#[tokio::test]
async fn missing_or_blank_url_is_a_bad_request() {
    let fetcher = StubFetcher::answering(Ok(page(200, "text/html", b"")));

    let missing =
        handle_proxy_request(&fetcher, ProxyRequest::from_query("GET", [("vpn", "true")], None))
            .await;
    assert_eq!(missing.status, 400);
    assert_eq!(json_error(&missing.body), "URL parameter is required");
    assert_eq!(missing.header("content-type"), Some("application/json"));

    let blank = handle_proxy_request(&fetcher, get("   ")).await;
    assert_eq!(blank.status, 400);
    assert!(fetcher.seen().is_empty());
}

#[tokio::test]
async fn target_gets_https_and_privacy_flags_travel_with_it() {
    let fetcher = StubFetcher::answering(Ok(page(200, "text/plain", b"hi")));
    let request = ProxyRequest::from_query(
        "GET",
        [("url", "example.com/a"), ("vpn", "true"), ("incognito", "false")],
        Some("Tester/1.0"),
    );

    let response = handle_proxy_request(&fetcher, request).await;

    let seen = fetcher.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].url, "https://example.com/a");
    assert!(seen[0].privacy.vpn);
    assert!(!seen[0].privacy.incognito);
    assert_eq!(seen[0].client_user_agent.as_deref(), Some("Tester/1.0"));

    assert_eq!(response.header("X-VPN-Active"), Some("True"));
    assert_eq!(response.header("X-Incognito-Active"), Some("False"));
}

#[tokio::test]
async fn timeout_maps_to_gateway_timeout() {
    let fetcher = StubFetcher::answering(Err(FetchError {
        kind: FailureKind::Timeout,
        message: "deadline elapsed".into(),
    }));
    let response = handle_proxy_request(&fetcher, get("example.com")).await;

    assert_eq!(response.status, 504);
    assert_eq!(json_error(&response.body), "Request timeout");
}

#[tokio::test]
async fn other_failures_map_to_bad_gateway_with_message() {
    let fetcher = StubFetcher::answering(Err(FetchError {
        kind: FailureKind::Network,
        message: "connection refused".into(),
    }));
    let response = handle_proxy_request(&fetcher, get("example.com")).await;

    assert_eq!(response.status, 502);
    assert_eq!(json_error(&response.body), "Proxy error: connection refused");
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn upstream_error_status_is_passed_through_as_header() {
    let fetcher = StubFetcher::answering(Ok(page(404, "text/plain", b"nope")));
    let response = handle_proxy_request(&fetcher, get("example.com")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("X-Upstream-Status"), Some("404"));
    assert_eq!(response.header("X-Proxied"), Some("true"));
    assert_eq!(response.body, b"nope");
}

#[tokio::test]
async fn non_html_bodies_are_forwarded_untouched() {
    let body = br#"{"href":"/x"}"#;
    let fetcher = StubFetcher::answering(Ok(page(200, "application/json", body)));
    let response = handle_proxy_request(&fetcher, get("https://api.example.com/v1")).await;

    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.body, body);
}

#[tokio::test]
async fn html_is_rewritten_against_the_target_origin() {
    let html = r#"<a href="/about">About</a><img src='/logo.png'><a href="//cdn.example.com/x">x</a>"#;
    let fetcher = StubFetcher::answering(Ok(page(200, "text/html", html.as_bytes())));
    let response = handle_proxy_request(&fetcher, get("http://example.com:8080/deep/page")).await;

    assert_eq!(
        response.header("content-type"),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        r#"<a href="http://example.com:8080/about">About</a><img src='http://example.com:8080/logo.png'><a href="//cdn.example.com/x">x</a>"#
    );
}

#[tokio::test]
async fn legacy_charset_html_is_reencoded_as_utf8() {
    // "<p>Мир</p>" with the Cyrillic in windows-1251.
    let mut body = b"<p>".to_vec();
    body.extend_from_slice(&[0xCC, 0xE8, 0xF0]);
    body.extend_from_slice(b"</p>");
    let fetcher = StubFetcher::answering(Ok(page(
        200,
        "text/html; charset=windows-1251",
        &body,
    )));

    let response = handle_proxy_request(&fetcher, get("example.ru")).await;

    assert_eq!(String::from_utf8(response.body).unwrap(), "<p>Мир</p>");
}

#[tokio::test]
async fn proxies_a_live_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<link href="/style.css">"#, "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/index.html", server.uri());
    let response = handle_proxy_request(
        &fetcher,
        ProxyRequest::from_query("GET", [("url", url.as_str()), ("incognito", "true")], None),
    )
    .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("X-Incognito-Active"), Some("True"));
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        format!(r#"<link href="{}/style.css">"#, server.uri())
    );
}
