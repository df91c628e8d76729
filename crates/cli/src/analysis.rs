// ABOUTME: The competitor analysis pipeline: fetch each page, then score page and heading n-grams.
// ABOUTME: Pages are fetched one at a time with a fixed pause between requests.

use std::time::Duration;

use seokit_pages::{Client, PageRecord};
use seokit_text::{CorpusScorer, NgramRange, ScoredTerm, ScoringMethod};
use tracing::info;

/// Terms kept per page from the page-text scores.
pub const PAGE_TOP_K: usize = 30;
/// Terms kept per page from the heading scores.
pub const HEADING_TOP_K: usize = 20;
/// Heading terms kept when heading scoring falls back to frequency counts.
pub const HEADING_FALLBACK_TOP_K: usize = 10;

/// Everything the reports are written from, one entry per input URL.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub pages: Vec<PageRecord>,
    pub method: ScoringMethod,
    pub page_terms: Vec<Vec<ScoredTerm>>,
    pub heading_terms: Vec<Vec<ScoredTerm>>,
    /// `None` when no page had any heading text.
    pub heading_method: Option<ScoringMethod>,
}

/// Fetch `urls` in order, pausing between requests, and score the results.
pub async fn analyze_urls(
    client: &Client,
    urls: &[String],
    range: NgramRange,
    pause: Duration,
) -> Analysis {
    let mut pages = Vec::with_capacity(urls.len());
    for (idx, url) in urls.iter().enumerate() {
        info!("fetch ({}/{}) {}", idx + 1, urls.len(), url);
        pages.push(client.fetch_page(url).await);
        if idx + 1 < urls.len() && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }
    analyze_pages(pages, range)
}

/// Score already-fetched pages.
pub fn analyze_pages(pages: Vec<PageRecord>, range: NgramRange) -> Analysis {
    let texts: Vec<&str> = pages.iter().map(|p| p.text.as_str()).collect();
    let scores = CorpusScorer::new(range, PAGE_TOP_K).score(&texts);

    let heading_texts: Vec<String> = pages.iter().map(|p| p.heading_text()).collect();
    let (heading_terms, heading_method) = if heading_texts.iter().any(|t| !t.is_empty()) {
        let scores = CorpusScorer::new(NgramRange::UP_TO_BIGRAMS, HEADING_TOP_K)
            .fallback_top_k(HEADING_FALLBACK_TOP_K)
            .score(&heading_texts);
        (scores.rows, Some(scores.method))
    } else {
        (vec![Vec::new(); pages.len()], None)
    };

    Analysis {
        pages,
        method: scores.method,
        page_terms: scores.rows,
        heading_terms,
        heading_method,
    }
}
