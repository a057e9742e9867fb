//! HTTP proxy semantics, independent of any server framework.
//!
//! [`handle_proxy_request`] turns a [`ProxyRequest`] into a complete
//! [`ProxyResponse`]; every failure is already mapped to a status code and a
//! JSON `{"error": …}` body.

use serde_json::json;
use shell_logging::{shell_info, shell_warn};
use url::Url;

use crate::decode::{decode_body, media_type_of};
use crate::privacy::PrivacyOptions;
use crate::rewrite::{origin_of, rewrite_root_relative};
use crate::{FailureKind, FetchRequest, Fetcher, NullProgressSink};

const DEFAULT_CONTENT_TYPE: &str = "text/html";
const JSON_CONTENT_TYPE: &str = "application/json";

const CORS_PREFLIGHT_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, X-User-Id"),
    ("Access-Control-Max-Age", "86400"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    /// HTTP method name, e.g. `"GET"`.
    pub method: String,
    pub url: Option<String>,
    pub privacy: PrivacyOptions,
    pub client_user_agent: Option<String>,
}

impl ProxyRequest {
    /// Builds a request from query parameters `url`, `vpn` and `incognito`.
    ///
    /// A flag is on only when its value is `true` (any case).
    pub fn from_query<'a, I>(method: &str, params: I, client_user_agent: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut url = None;
        let mut privacy = PrivacyOptions::default();
        for (name, value) in params {
            match name {
                "url" => url = Some(value.to_string()),
                "vpn" => privacy.vpn = is_true(value),
                "incognito" => privacy.incognito = is_true(value),
                _ => {}
            }
        }

        Self {
            method: method.to_ascii_uppercase(),
            url,
            privacy,
            client_user_agent: client_user_agent.map(str::to_string),
        }
    }
}

fn is_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Prefixes `https://` unless the target already starts with `http://` or `https://`.
///
/// Unlike the address bar's `normalize_target`, the scheme check is case-sensitive:
/// the proxy's query contract prefixes `HTTP://x` like any other bare target, and
/// clients of the proxy rely on that.
pub fn normalize_proxy_target(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    fn json_error(status: u16, message: &str) -> Self {
        let mut response = Self::new(status)
            .with_header("Content-Type", JSON_CONTENT_TYPE)
            .with_header("Access-Control-Allow-Origin", "*");
        response.body = json!({ "error": message }).to_string().into_bytes();
        response
    }

    /// First header called `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub async fn handle_proxy_request(fetcher: &dyn Fetcher, request: ProxyRequest) -> ProxyResponse {
    match request.method.as_str() {
        "OPTIONS" => {
            return CORS_PREFLIGHT_HEADERS
                .iter()
                .fold(ProxyResponse::new(200), |response, (name, value)| {
                    response.with_header(name, *value)
                });
        }
        "GET" => {}
        _ => return ProxyResponse::json_error(405, "Method not allowed"),
    }

    let target = match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => normalize_proxy_target(url),
        _ => return ProxyResponse::json_error(400, "URL parameter is required"),
    };

    let fetch_request = FetchRequest::new(target.clone())
        .with_privacy(request.privacy)
        .with_client_user_agent(request.client_user_agent);

    let output = match fetcher.fetch(0, &fetch_request, &NullProgressSink).await {
        Ok(output) => output,
        Err(err) if err.kind == FailureKind::Timeout => {
            shell_warn!("Proxy fetch of {} timed out: {}", target, err.message);
            return ProxyResponse::json_error(504, "Request timeout");
        }
        Err(err) => {
            shell_warn!("Proxy fetch of {} failed: {}", target, err);
            return ProxyResponse::json_error(502, &format!("Proxy error: {}", err.message));
        }
    };

    let content_type = output
        .metadata
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let (content_type, body) = if media_type_of(&content_type) == "text/html" {
        let decoded = decode_body(&output.bytes, Some(&content_type));
        let html = match Url::parse(&target).ok().as_ref().and_then(origin_of) {
            Some(origin) => rewrite_root_relative(&decoded.text, &origin),
            None => decoded.text,
        };
        // The body is re-encoded as UTF-8 whatever the upstream charset was.
        ("text/html; charset=utf-8".to_string(), html.into_bytes())
    } else {
        (content_type, output.bytes)
    };

    shell_info!(
        "Proxied {} status={} bytes={} vpn={} incognito={}",
        target,
        output.metadata.status,
        body.len(),
        request.privacy.vpn,
        request.privacy.incognito
    );

    let mut response = ProxyResponse::new(200)
        .with_header("Content-Type", content_type)
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("X-Proxied", "true")
        .with_header("X-VPN-Active", title_case_bool(request.privacy.vpn))
        .with_header("X-Incognito-Active", title_case_bool(request.privacy.incognito))
        .with_header("X-Upstream-Status", output.metadata.status.to_string());
    response.body = body;
    response
}

/// `True` / `False`, the spelling existing proxy clients expect in the flag headers.
fn title_case_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
