// ABOUTME: HTML extraction helpers: visible text, ordered headings and same-host image URLs.
// ABOUTME: All functions are pure over their HTML input.

//! Extraction module.
//!
//! Text extraction drops everything under non-visible elements and flattens
//! the rest into a single whitespace-normalised line. Heading extraction
//! walks `h1`..`h6` in document order.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::{Html, Node, Selector};
use serde::{Serialize, Serializer};
use url::Url;

/// Elements whose text never reaches the reader.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "svg", "iframe"];

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// A heading element: level 1 to 6 plus its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Lowercase tag name, e.g. `h2`.
    pub fn tag(&self) -> String {
        format!("h{}", self.level)
    }
}

// Serialized as a `[tag, text]` pair.
impl Serialize for Heading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.tag(), &self.text).serialize(serializer)
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hidden(node: NodeRef<'_, Node>) -> bool {
    node.ancestors().any(|a| match a.value() {
        Node::Element(el) => HIDDEN_TAGS.contains(&el.name()),
        _ => false,
    })
}

/// Visible text of `html` as one whitespace-normalised string.
pub fn visible_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let doc = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        if !is_hidden(node) {
            parts.push(&**text);
        }
    }
    normalize_spaces(&parts.join(" "))
}

/// Non-empty headings of `html` in document order.
///
/// Heading text is whitespace-normalised like [`visible_text`]: inner runs of
/// spaces and newlines collapse to one space, not just the ends trimmed.
pub fn headings(html: &str) -> Vec<Heading> {
    if html.is_empty() {
        return Vec::new();
    }
    let doc = Html::parse_document(html);
    doc.select(&HEADING_SELECTOR)
        .filter_map(|el| {
            let level = el.value().name()[1..].parse::<u8>().ok()?;
            let text = normalize_spaces(&el.text().collect::<Vec<_>>().join(" "));
            if text.is_empty() {
                None
            } else {
                Some(Heading::new(level, text))
            }
        })
        .collect()
}

/// Absolute URLs of `<img src>` elements that live on the same host and port as `page`.
pub fn same_host_images(html: &str, page: &Url) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&IMG_SELECTOR)
        .filter_map(|el| el.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .filter_map(|src| page.join(src).ok())
        .filter(|img| {
            img.host_str() == page.host_str()
                && img.port_or_known_default() == page.port_or_known_default()
        })
        .map(|img| img.to_string())
        .collect()
}
