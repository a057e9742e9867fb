//! Outgoing request headers for the proxy's "incognito" and "vpn" options.
//!
//! Neither option anonymizes anything: incognito swaps in a generic desktop
//! browser fingerprint and sends `DNT`, vpn adds forwarding headers claiming a
//! Canadian client address. The connection itself is untouched.

use std::net::Ipv4Addr;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

pub const DEFAULT_USER_AGENT: &str = "AnonyKeys-Browser/1.0";

pub const INCOGNITO_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const INCOGNITO_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const INCOGNITO_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// First octet of the spoofed forwarding address.
const CANADIAN_FIRST_OCTET: u8 = 142;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";
pub const DNT: &str = "dnt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivacyOptions {
    pub incognito: bool,
    pub vpn: bool,
}

/// Builds the request headers for one upstream fetch.
///
/// Without incognito the caller's user agent is forwarded, or
/// [`DEFAULT_USER_AGENT`] when there is none (or it is not a valid header value).
pub fn privacy_headers<R: Rng + ?Sized>(
    options: PrivacyOptions,
    client_user_agent: Option<&str>,
    rng: &mut R,
) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if options.incognito {
        headers.insert(USER_AGENT, HeaderValue::from_static(INCOGNITO_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(INCOGNITO_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(INCOGNITO_ACCEPT_LANGUAGE),
        );
        headers.insert(DNT, HeaderValue::from_static("1"));
    } else {
        let agent = client_user_agent
            .and_then(|value| HeaderValue::from_str(value).ok())
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, agent);
    }

    if options.vpn {
        let address = spoofed_canadian_address(rng).to_string();
        if let Ok(value) = HeaderValue::from_str(&address) {
            headers.insert(X_FORWARDED_FOR, value.clone());
            headers.insert(X_REAL_IP, value);
        }
    }

    headers
}

/// A random `142.a.b.c` address with each of `a`, `b`, `c` in `1..=255`.
pub fn spoofed_canadian_address<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    Ipv4Addr::new(
        CANADIAN_FIRST_OCTET,
        rng.random_range(1..=255),
        rng.random_range(1..=255),
        rng.random_range(1..=255),
    )
}
