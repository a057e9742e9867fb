use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use url::Url;

const DEFAULT_MAX_LINKS: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Hyperlink,
    Image,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLink {
    pub url: String,
    pub text: Option<String>,
    pub kind: LinkKind,
}

/// A page flattened for display: readable text with `[n]` markers after each
/// hyperlink, and the links those markers refer to (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameDocument {
    pub title: Option<String>,
    pub text: String,
    pub links: Vec<FrameLink>,
}

impl FrameDocument {
    /// Wraps non-HTML content as-is.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
            links: Vec::new(),
        }
    }
}

pub struct DocumentRenderer {
    max_links: usize,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self::with_max_links(DEFAULT_MAX_LINKS)
    }

    pub fn with_max_links(max_links: usize) -> Self {
        Self { max_links }
    }

    pub fn render(&self, html: &str, base_url: Option<&str>) -> FrameDocument {
        let document = Html::parse_document(html);
        let base_url = base_url.and_then(|b| Url::parse(b).ok());
        let mut ctx = RenderContext::new(base_url, self.max_links);

        for child in document.root_element().children() {
            self.visit_node(child, &mut ctx);
        }

        ctx.into_document()
    }

    fn visit_node(&self, node: NodeRef<'_, Node>, ctx: &mut RenderContext) {
        match node.value() {
            Node::Text(text) => ctx.append_text(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, ctx);
                }
            }
            _ => {
                for child in node.children() {
                    self.visit_node(child, ctx);
                }
            }
        }
    }

    fn visit_element(&self, element: ElementRef<'_>, ctx: &mut RenderContext) {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "title" => {
                let title = element.text().collect::<String>();
                let title = collapse_whitespace(&title);
                if ctx.title.is_none() && !title.is_empty() {
                    ctx.title = Some(title);
                }
            }
            "a" => self.handle_anchor(element, ctx),
            "img" => self.handle_image(element, ctx),
            "br" => ctx.ensure_newline(),
            "hr" => {
                ctx.ensure_newline();
                ctx.append_text("---");
                ctx.ensure_newline();
            }
            "li" => {
                ctx.ensure_newline();
                ctx.append_text("• ");
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "main"
            | "aside" | "figure" | "figcaption" | "table" | "tr" | "blockquote" | "address"
            | "ul" | "ol" | "pre" | "form" => {
                ctx.ensure_newline();
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            "td" | "th" => {
                self.visit_children(element, ctx);
                ctx.append_text(" ");
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                ctx.ensure_newline();
                ctx.append_text(&"#".repeat(level));
                ctx.append_text(" ");
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            "script" | "style" | "noscript" | "iframe" | "template" | "svg" | "head" => {
                // <title> lives in <head>; pick it up without rendering the rest.
                if tag == "head" {
                    for child in element.children() {
                        if let Some(title) = ElementRef::wrap(child)
                            .filter(|child| child.value().name().eq_ignore_ascii_case("title"))
                        {
                            self.visit_element(title, ctx);
                        }
                    }
                }
            }
            _ => self.visit_children(element, ctx),
        }
    }

    fn visit_children(&self, element: ElementRef<'_>, ctx: &mut RenderContext) {
        for child in element.children() {
            self.visit_node(child, ctx);
        }
    }

    fn handle_anchor(&self, element: ElementRef<'_>, ctx: &mut RenderContext) {
        let href = element.value().attr("href").map(str::trim);
        let start = ctx.builder.len();
        self.visit_children(element, ctx);
        let end = ctx.builder.len();
        if let Some(url) = href.and_then(|raw| resolve_url(raw, ctx.base_url.as_ref())) {
            let text = ctx.extract_substring(start, end);
            let kind = if url.scheme() == "mailto" {
                LinkKind::Email
            } else {
                LinkKind::Hyperlink
            };
            if let Some(number) = ctx.add_link(url.into(), text, kind) {
                ctx.append_text(&format!("[{number}]"));
            }
        }
    }

    fn handle_image(&self, element: ElementRef<'_>, ctx: &mut RenderContext) {
        if let Some(src) = element.value().attr("src").map(str::trim) {
            if let Some(url) = resolve_url(src, ctx.base_url.as_ref()) {
                let alt = element.value().attr("alt").unwrap_or_default();
                ctx.add_link(url.into(), collapse_whitespace(alt), LinkKind::Image);
            }
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || lower.starts_with("data:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct RenderContext {
    builder: String,
    title: Option<String>,
    links: Vec<FrameLink>,
    base_url: Option<Url>,
    max_links: usize,
    last_char: Option<char>,
}

impl RenderContext {
    fn new(base_url: Option<Url>, max_links: usize) -> Self {
        Self {
            builder: String::new(),
            title: None,
            links: Vec::new(),
            base_url,
            max_links,
            last_char: None,
        }
    }

    fn into_document(self) -> FrameDocument {
        FrameDocument {
            title: self.title,
            text: self.builder.trim().to_string(),
            links: self.links,
        }
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char.is_none()
                    || self.last_char == Some(' ')
                    || self.last_char == Some('\n')
                {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn ensure_newline(&mut self) {
        if self.last_char == Some('\n') || self.builder.is_empty() {
            return;
        }
        if self.last_char == Some(' ') {
            self.builder.pop();
        }
        self.push_char('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.builder.push(ch);
        self.last_char = Some(ch);
    }

    fn extract_substring(&self, start: usize, end: usize) -> String {
        self.builder[start..end].trim().to_string()
    }

    /// Records a link and returns its 1-based number, or `None` past the cap.
    fn add_link(&mut self, url: String, text: String, kind: LinkKind) -> Option<usize> {
        if self.links.len() >= self.max_links {
            return None;
        }

        let text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };

        self.links.push(FrameLink { url, text, kind });
        Some(self.links.len())
    }
}
