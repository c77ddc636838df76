//! HTML parser for extracting the title, visible text, and outgoing links

use scraper::{Html, Selector};
use url::Url;

/// A link found on a page, with the anchor text that labeled it
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    /// Absolute URL, resolved against the page it was found on
    pub url: Url,

    /// Anchor text, when the element had any
    pub anchor: Option<String>,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedHtml {
    /// The page title (from the `<title>` tag)
    pub title: Option<String>,

    /// Visible text with whitespace collapsed
    pub text: String,

    /// All followable links on the page
    pub links: Vec<DiscoveredLink>,
}

/// Parses HTML content and extracts the title, visible text, and links.
///
/// Parsing is best-effort: malformed markup yields whatever could be read,
/// never an error.
///
/// # Link Extraction Rules
///
/// Included: `<a href="...">` elements, resolved against `base_url`.
/// Excluded: `download` links, `javascript:`/`mailto:`/`tel:` schemes,
/// data URIs, fragment-only anchors, and anything that is not http(s)
/// after resolution.
pub fn parse_html(html: &str, base_url: &Url) -> ParsedHtml {
    let document = Html::parse_document(html);

    ParsedHtml {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Collects the visible text of the document.
///
/// Script, style, and noscript subtrees are skipped; runs of whitespace
/// collapse to single spaces.
fn extract_text(document: &Html) -> String {
    let mut collected = String::new();

    for node in document.tree.root().descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .map(|element| matches!(element.name(), "script" | "style" | "noscript"))
                .unwrap_or(false);
            if !hidden {
                collected.push_str(text);
                collected.push(' ');
            }
        }
    }

    collected.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<DiscoveredLink> {
    let mut links = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            // Download links point at files, not pages
            if element.value().attr("download").is_some() {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(url) = resolve_link(href, base_url) else {
                continue;
            };

            let anchor = element.text().collect::<String>().trim().to_string();
            links.push(DiscoveredLink {
                url,
                anchor: (!anchor.is_empty()).then_some(anchor),
            });
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - invalid URLs or non-http(s) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_extract_text_collapses_whitespace() {
        let html = "<html><body><p>Hello\n   crawler</p>  <p>world</p></body></html>";
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.text, "Hello crawler world");
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let html = r#"
            <html><head><style>body { color: red; }</style></head>
            <body><p>Visible</p><script>var hidden = 1;</script></body></html>
        "#;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.text.contains("Visible"));
        assert!(!parsed.text.contains("hidden"));
        assert!(!parsed.text.contains("color"));
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].url.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].url.as_str(), "https://example.com/other");
    }

    #[test]
    fn test_anchor_text_captured() {
        let html = r#"<html><body><a href="/other">Read <b>more</b></a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links[0].anchor.as_deref(), Some("Read more"));
    }

    #[test]
    fn test_empty_anchor_text_is_none() {
        let html = r#"<html><body><a href="/other"><img src="x.png"></a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links[0].anchor, None);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:test@example.com">Email</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,<h1>Test</h1>">Data</a>
            </body></html>
        "#;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_follow_nofollow_links() {
        let html = r#"<html><body><a href="/page2" rel="nofollow">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html><body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="/another-valid">Valid</a>
            </body></html>
        "#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 2);
    }

    #[test]
    fn test_malformed_html_is_best_effort() {
        let html = "<html><body><p>Unclosed <a href='/still-found'>link";
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert!(parsed.text.contains("Unclosed"));
    }
}
