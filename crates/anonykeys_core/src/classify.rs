use url::Url;

use crate::Language;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Number of placeholder entries produced for a search.
pub const PLACEHOLDER_RESULT_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

/// What the user meant by the text in the address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIntent {
    /// Blank input; nothing should happen.
    Empty,
    /// Navigate the frame to this (scheme-prefixed) address.
    Navigate(String),
    /// Treat the trimmed text as a search query.
    Search(String),
}

/// Classifies raw address-bar text.
///
/// The text is trimmed, `https://` is prefixed when it carries no http(s) scheme,
/// and the candidate is parsed. Anything that does not parse into an absolute URL
/// with a host falls back to search without reporting an error.
pub fn classify(raw: &str) -> InputIntent {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return InputIntent::Empty;
    }

    let candidate = normalize_target(trimmed);
    if is_navigable(&candidate) {
        InputIntent::Navigate(candidate)
    } else {
        InputIntent::Search(trimmed.to_string())
    }
}

/// Prefixes `https://` unless the text already starts with `http://` or `https://`.
///
/// The input is returned unchanged (apart from trimming) when a scheme is present.
pub fn normalize_target(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    }
}

pub fn has_http_scheme(text: &str) -> bool {
    starts_with_ignore_ascii_case(text, "http://") || starts_with_ignore_ascii_case(text, "https://")
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn is_navigable(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

/// Builds the fixed-shape placeholder list for a search query.
///
/// Titles combine the query with the language's static decorations; targets are
/// static domains. Nothing here comes from a real search index.
pub fn placeholder_results(query: &str, language: Language) -> Vec<SearchResult> {
    let templates = &language.translations().results;
    vec![
        SearchResult {
            title: query.to_string(),
            url: "https://wikipedia.org".to_string(),
        },
        SearchResult {
            title: format!("{query}{}", templates.encyclopedia_suffix),
            url: format!("https://{}.wikipedia.org", language.tag()),
        },
        SearchResult {
            title: format!("{}{query}", templates.shop_prefix),
            url: "https://amazon.com".to_string(),
        },
        SearchResult {
            title: format!("{query}{}", templates.manual_suffix),
            url: "https://youtube.com".to_string(),
        },
    ]
}
