// ABOUTME: The Client struct for seokit that owns the HTTP client and retry policy.
// ABOUTME: Provides strict single-attempt fetches, retried best-effort fetches and HEAD status checks.

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::options::{ClientBuilder, FetchOptions};
use crate::page::PageRecord;
use crate::resource::{fetch, fetch_any_status, head_status, FetchResult};

/// HTTP client shared by every seokit tool.
#[derive(Debug, Clone)]
pub struct Client {
    opts: FetchOptions,
    http_client: reqwest::Client,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Build the reqwest client unless `opts` already carries one.
    pub fn new(opts: FetchOptions) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// The underlying reqwest client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Fetch `url` once and decode the body. Non-200 responses are errors.
    pub async fn get_html(&self, url: &str) -> Result<String, FetchError> {
        let result = fetch(&self.http_client, url, &self.opts.headers).await?;
        Ok(result.text())
    }

    /// Fetch `url` once and decode the body whatever the status code.
    pub async fn get_html_any_status(&self, url: &str) -> Result<(u16, String), FetchError> {
        let result = fetch_any_status(&self.http_client, url, &self.opts.headers).await?;
        Ok((result.status, result.text()))
    }

    /// Fetch `url`, retrying transport errors and non-200 responses.
    ///
    /// Makes `retries + 1` attempts, sleeping `backoff(attempt)` between them.
    /// Malformed URLs fail immediately.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<FetchResult, FetchError> {
        let attempts = self.opts.retries.saturating_add(1);
        let mut last_err = None;

        for attempt in 0..attempts {
            match fetch(&self.http_client, url, &self.opts.headers).await {
                Ok(result) => {
                    if result.final_url != url {
                        debug!(url, final_url = %result.final_url, "followed redirect");
                    }
                    debug!(url, attempt, bytes = result.body.len(), "fetched");
                    return Ok(result);
                }
                Err(err) if err.is_invalid_url() => return Err(err),
                Err(err) => {
                    warn!(url, attempt, error = %err, "fetch attempt failed");
                    last_err = Some(err);
                }
            }

            if attempt + 1 < attempts {
                tokio::time::sleep(self.opts.backoff(attempt)).await;
            }
        }

        Err(last_err.unwrap_or_else(|| FetchError::fetch(url, "Fetch")))
    }

    /// Best-effort fetch: the decoded body on HTTP 200, otherwise an empty string.
    pub async fn fetch_text(&self, url: &str) -> String {
        match self.fetch_with_retry(url).await {
            Ok(result) => result.text(),
            Err(err) => {
                warn!(url, error = %err, "giving up on page");
                String::new()
            }
        }
    }

    /// Fetch `url` best-effort and extract its text and headings.
    pub async fn fetch_page(&self, url: &str) -> PageRecord {
        let html = self.fetch_text(url).await;
        PageRecord::from_html(url, html)
    }

    /// HEAD `url` once (redirects followed) and return the final status code.
    pub async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        head_status(&self.http_client, url).await
    }
}
