// ABOUTME: PageRecord, the per-URL result of fetching and extracting a competitor page.
// ABOUTME: Failed fetches produce a record with empty HTML, text and headings.

use url::Url;

use crate::extract::{headings, visible_text, Heading};

/// One fetched page with its extracted text and headings.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub url: String,
    pub domain: String,
    pub html: String,
    pub text: String,
    pub headings: Vec<Heading>,
}

impl PageRecord {
    /// Extract text and headings from `html` fetched from `url`.
    pub fn from_html(url: &str, html: String) -> Self {
        Self {
            url: url.to_string(),
            domain: domain_of(url),
            text: visible_text(&html),
            headings: headings(&html),
            html,
        }
    }

    /// Length of the extracted text in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// All heading texts joined by single spaces.
    pub fn heading_text(&self) -> String {
        self.headings
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Host part of `url`, or an empty string when it has none.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html() {
        let page = PageRecord::from_html(
            "https://www.example.com:8443/a?b=c",
            "<h1>Title</h1><h2>Sub</h2><p>Body text é</p>".to_string(),
        );
        assert_eq!(page.domain, "www.example.com");
        assert_eq!(page.text, "Title Sub Body text é");
        assert_eq!(page.text_len(), 21);
        assert_eq!(page.heading_text(), "Title Sub");
    }

    #[test]
    fn test_failed_fetch_record() {
        let page = PageRecord::from_html("not a url", String::new());
        assert_eq!(page.domain, "");
        assert_eq!(page.text_len(), 0);
        assert!(page.headings.is_empty());
        assert_eq!(page.heading_text(), "");
    }
}
