// ABOUTME: The `ngrams` subcommand: resolve competitor URLs, analyze them and write reports.
// ABOUTME: URLs come from a file or from search results for a keyword.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use seokit_pages::serp::{BING_ENDPOINT, SERPAPI_ENDPOINT};
use seokit_pages::{Client, SerpSource};
use seokit_text::NgramRange;
use tracing::info;

use crate::analysis::analyze_urls;
use crate::report::write_analysis;

#[derive(Args, Debug)]
pub struct NgramsArgs {
    /// Keyword to search; its top results are analyzed
    #[arg(long)]
    pub keyword: Option<String>,

    /// SerpAPI key; Bing scraping is used without one
    #[arg(long = "serpapi_key", visible_alias = "serpapi-key", env = "SERPAPI_KEY")]
    pub serpapi_key: Option<String>,

    /// Number of search results to analyze
    #[arg(long, default_value_t = 3)]
    pub topn: usize,

    /// File with one URL per line; skips the search
    #[arg(long)]
    pub urls: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "results")]
    pub outdir: PathBuf,

    /// Smallest n-gram size
    #[arg(long = "ngram_min", visible_alias = "ngram-min", default_value_t = 1)]
    pub ngram_min: usize,

    /// Largest n-gram size
    #[arg(long = "ngram_max", visible_alias = "ngram-max", default_value_t = 3)]
    pub ngram_max: usize,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Retries after a failed page fetch
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Delay before the first retry, in milliseconds; later retries wait half as long again each time
    #[arg(long = "retry-delay-ms", default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Pause between page fetches, in milliseconds
    #[arg(long = "pause-ms", default_value_t = 1000)]
    pub pause_ms: u64,

    /// SerpAPI search endpoint
    #[arg(long = "serpapi-endpoint", default_value = SERPAPI_ENDPOINT, hide = true)]
    pub serpapi_endpoint: String,

    /// Bing search endpoint
    #[arg(long = "bing-endpoint", default_value = BING_ENDPOINT, hide = true)]
    pub bing_endpoint: String,
}

impl NgramsArgs {
    fn client(&self) -> Client {
        let delay = Duration::from_millis(self.retry_delay_ms);
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .retries(self.retries)
            .retry_delay(delay, delay / 2)
            .build()
    }
}

/// Non-empty trimmed lines of a URL list file.
fn read_url_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("URLs file not found: {}", path.display());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

async fn resolve_urls(args: &NgramsArgs, client: &Client) -> Result<Vec<String>> {
    if let Some(path) = &args.urls {
        return read_url_file(path);
    }
    let Some(keyword) = &args.keyword else {
        bail!("provide --keyword or --urls");
    };
    Ok(SerpSource::new(client)
        .serpapi_endpoint(args.serpapi_endpoint.as_str())
        .bing_endpoint(args.bing_endpoint.as_str())
        .search(keyword, args.serpapi_key.as_deref(), args.topn)
        .await)
}

pub async fn run(args: NgramsArgs) -> Result<()> {
    let range = NgramRange::new(args.ngram_min, args.ngram_max)?;
    let client = args.client();

    let urls = resolve_urls(&args, &client).await?;
    if urls.is_empty() {
        bail!("no URLs found to analyze");
    }
    info!("found {} URLs, starting analysis", urls.len());

    let analysis = analyze_urls(
        &client,
        &urls,
        range,
        Duration::from_millis(args.pause_ms),
    )
    .await;

    let written = write_analysis(&args.outdir, &analysis)?;
    for path in written.iter().rev().take(2) {
        info!("saved {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_url_file_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("urls.txt");
        fs::write(&path, "https://a.example/\n\n   \n  https://b.example/  \n").unwrap();
        assert_eq!(
            read_url_file(&path).unwrap(),
            vec!["https://a.example/", "https://b.example/"]
        );
    }

    #[test]
    fn test_read_url_file_missing() {
        let err = read_url_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("URLs file not found"));
    }
}
