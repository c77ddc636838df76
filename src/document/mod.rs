//! Content classification and index document construction
//!
//! A fetched page becomes one of three content shapes (HTML, plain text, or
//! binary) and each shape maps to a fixed set of index document fields.
//! Binary content extraction is an explicit stub: such documents carry only
//! their identity fields.

use crate::crawler::parser::{parse_html, DiscoveredLink};
use crate::frontier::UrlRecord;
use serde::Serialize;
use url::Url;

/// Parsed representation of a fetched page, by content shape
#[derive(Debug, Clone)]
pub enum PageContent {
    /// An HTML page: title, extracted text, and outgoing links
    Html {
        title: Option<String>,
        text: String,
        links: Vec<DiscoveredLink>,
    },

    /// A non-HTML textual resource
    PlainText { text: String },

    /// Anything else; no content extraction is attempted
    Binary,
}

/// Normalized record submitted to the search index for one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDocument {
    /// Discovery-order id of the page
    pub id: u64,

    /// The fetched URL
    pub url: String,

    /// Content-Type as reported by the server
    pub content_type: String,

    /// Coarse classification: the content type up to its first `/`
    pub category: String,

    /// Page title; HTML pages only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Extracted text; HTML and plain-text pages only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Number of outgoing links, for diagnostics; HTML pages only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing_links: Option<usize>,
}

/// Classifies a fetched body into its parsed representation.
///
/// Dispatch starts from the MIME essence (parameters stripped): HTML types
/// are fully parsed, other `text/*` types are decoded as text, everything
/// else stays binary. Decoding is lossy: a body that is not quite valid
/// UTF-8 still yields a best-effort document.
pub fn classify_content(content_type: &str, body: &[u8], base_url: &Url) -> PageContent {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if essence == "text/html" || essence == "application/xhtml+xml" {
        let html = String::from_utf8_lossy(body);
        let parsed = parse_html(&html, base_url);
        PageContent::Html {
            title: parsed.title,
            text: parsed.text,
            links: parsed.links,
        }
    } else if essence.starts_with("text/") {
        PageContent::PlainText {
            text: String::from_utf8_lossy(body).into_owned(),
        }
    } else {
        PageContent::Binary
    }
}

/// Builds the index document for a fetched page
pub fn build_document(
    record: &UrlRecord,
    content_type: &str,
    content: &PageContent,
) -> IndexDocument {
    let mut document = IndexDocument {
        id: record.doc_id,
        url: record.url.clone(),
        content_type: content_type.to_string(),
        category: category_from_content_type(content_type),
        title: None,
        text: None,
        outgoing_links: None,
    };

    match content {
        PageContent::Html { title, text, links } => {
            document.title = title.clone();
            document.text = Some(text.clone());
            document.outgoing_links = Some(links.len());
        }
        PageContent::PlainText { text } => {
            document.text = Some(text.clone());
        }
        PageContent::Binary => {}
    }

    document
}

/// Truncates a content type at the first `/` to produce the coarse category.
///
/// An empty or absent content type yields an empty category; a content type
/// without a `/` is its own category.
pub fn category_from_content_type(content_type: &str) -> String {
    if content_type.is_empty() {
        return String::new();
    }
    match content_type.find('/') {
        Some(slash) => content_type[..slash].to_string(),
        None => content_type.to_string(),
    }
}
