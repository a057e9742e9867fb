use url::Url;

/// Attribute openings whose root-relative values are pointed back at the origin.
const ROOT_RELATIVE_ATTRIBUTES: [&str; 4] = ["href=\"/", "href='/", "src=\"/", "src='/"];

/// `scheme://host[:port]` of `url`, or `None` for URLs without a host.
pub fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Rewrites `href="/…"`, `href='/…'`, `src="/…"` and `src='/…'` so they point at
/// `origin`. Protocol-relative `//host/…` references are left untouched.
///
/// This is a textual rewrite, not an HTML parse; markup that spells the
/// attributes differently (spaces around `=`, unquoted values) passes through.
pub fn rewrite_root_relative(html: &str, origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    ROOT_RELATIVE_ATTRIBUTES
        .iter()
        .fold(html.to_string(), |text, prefix| {
            rewrite_attribute(&text, prefix, origin)
        })
}

fn rewrite_attribute(html: &str, prefix: &str, origin: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut copied = 0;
    for (start, matched) in html.match_indices(prefix) {
        let slash = start + matched.len() - 1;
        out.push_str(&html[copied..slash]);
        if !html[slash..].starts_with("//") {
            out.push_str(origin);
        }
        copied = slash;
    }
    out.push_str(&html[copied..]);
    out
}
