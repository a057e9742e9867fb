//! HTTP front end for `anonykeys_engine::proxy`.
//!
//! Every method on `/` goes to one handler; the engine decides the status code,
//! so the handler only translates between axum and the engine's types.
pub mod config;

use std::sync::Arc;
use std::time::Instant;

use anonykeys_engine::{handle_proxy_request, Fetcher, ProxyRequest, ProxyResponse};
use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use shell_logging::{shell_info, shell_warn};

pub use config::ProxyConfig;

#[derive(Clone)]
pub struct ProxyState {
    fetcher: Arc<dyn Fetcher>,
}

pub fn router(fetcher: Arc<dyn Fetcher>) -> Router {
    Router::new()
        .route("/", any(proxy_handler))
        .layer(middleware::from_fn(access_log))
        .with_state(ProxyState { fetcher })
}

async fn proxy_handler(
    State(state): State<ProxyState>,
    method: Method,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());
    let request = ProxyRequest::from_query(
        method.as_str(),
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        user_agent,
    );
    into_response(handle_proxy_request(state.fetcher.as_ref(), request).await)
}

fn into_response(proxied: ProxyResponse) -> Response {
    let mut response = Response::new(Body::from(proxied.body));
    *response.status_mut() = StatusCode::from_u16(proxied.status).unwrap_or(StatusCode::BAD_GATEWAY);
    for (name, value) in proxied.headers {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => shell_warn!("Dropped an upstream header that is not valid HTTP"),
        }
    }
    response
}

async fn access_log(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    shell_info!(
        "\"{} {}\" {} {}ms",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
