// ABOUTME: Search-engine URL sources: SerpAPI organic results with a Bing HTML scrape fallback.
// ABOUTME: Endpoints are configurable so tests and proxies can stand in for the real services.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::client::Client;
use crate::error::FetchError;

pub const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const BING_ENDPOINT: &str = "https://www.bing.com/search";

static BING_RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.b_algo h2 a").unwrap());

/// Resolves a keyword into the top result URLs.
#[derive(Debug, Clone)]
pub struct SerpSource<'a> {
    client: &'a Client,
    serpapi_endpoint: String,
    bing_endpoint: String,
}

impl<'a> SerpSource<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            serpapi_endpoint: SERPAPI_ENDPOINT.to_string(),
            bing_endpoint: BING_ENDPOINT.to_string(),
        }
    }

    pub fn serpapi_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.serpapi_endpoint = endpoint.into();
        self
    }

    pub fn bing_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.bing_endpoint = endpoint.into();
        self
    }

    /// Top `topn` URLs for `keyword`: SerpAPI first when a key is given, Bing when that yields nothing.
    pub async fn search(&self, keyword: &str, serpapi_key: Option<&str>, topn: usize) -> Vec<String> {
        if let Some(key) = serpapi_key {
            info!(keyword, "searching via SerpAPI");
            match self.serpapi(keyword, key, topn).await {
                Ok(urls) if !urls.is_empty() => return urls,
                Ok(_) => warn!(keyword, "SerpAPI returned no organic results"),
                Err(err) => warn!(keyword, error = %err, "SerpAPI search failed"),
            }
        }
        info!(keyword, "using Bing scraping fallback");
        self.bing(keyword, topn).await
    }

    /// Organic result links from SerpAPI's Google engine.
    pub async fn serpapi(
        &self,
        keyword: &str,
        api_key: &str,
        topn: usize,
    ) -> Result<Vec<String>, FetchError> {
        let num = topn.to_string();
        let url = Url::parse_with_params(
            &self.serpapi_endpoint,
            &[
                ("q", keyword),
                ("engine", "google"),
                ("num", num.as_str()),
                ("api_key", api_key),
            ],
        )
        .map_err(|e| FetchError::invalid_url(&self.serpapi_endpoint, "SerpApi").with_source(e))?;

        let response = self
            .client
            .http()
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&self.serpapi_endpoint, "SerpApi", e))?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::status(&self.serpapi_endpoint, "SerpApi", status));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::extract(&self.serpapi_endpoint, "SerpApi").with_source(e))?;
        Ok(parse_serpapi_results(&body, topn))
    }

    /// Result links scraped from a Bing results page. Empty when the page cannot be fetched.
    pub async fn bing(&self, keyword: &str, topn: usize) -> Vec<String> {
        let count = topn.to_string();
        let url = match Url::parse_with_params(
            &self.bing_endpoint,
            &[("q", keyword), ("count", count.as_str())],
        ) {
            Ok(url) => url,
            Err(err) => {
                warn!(endpoint = %self.bing_endpoint, error = %err, "invalid Bing endpoint");
                return Vec::new();
            }
        };
        let html = self.client.fetch_text(url.as_str()).await;
        if html.is_empty() {
            return Vec::new();
        }
        parse_bing_results(&html, topn)
    }
}

/// Links of the first `topn` entries of `organic_results`.
pub fn parse_serpapi_results(body: &serde_json::Value, topn: usize) -> Vec<String> {
    body.get("organic_results")
        .and_then(|v| v.as_array())
        .map(|results| {
            results
                .iter()
                .take(topn)
                .filter_map(|r| r.get("link").and_then(|l| l.as_str()))
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// hrefs of the first `topn` organic result titles on a Bing page.
pub fn parse_bing_results(html: &str, topn: usize) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&BING_RESULT_SELECTOR)
        .take(topn)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    const BING_HTML: &str = r#"<html><body><ol id="b_results">
        <li class="b_algo"><h2><a href="https://one.example/">One</a></h2></li>
        <li class="b_ad"><h2><a href="https://ad.example/">Ad</a></h2></li>
        <li class="b_algo"><h2><a href="https://two.example/">Two</a></h2></li>
        <li class="b_algo"><h2><a href="https://three.example/">Three</a></h2></li>
        </ol></body></html>"#;

    fn fast_client() -> Client {
        Client::builder()
            .retries(0)
            .retry_delay(Duration::ZERO, Duration::ZERO)
            .build()
    }

    #[test]
    fn test_parse_bing_results() {
        assert_eq!(
            parse_bing_results(BING_HTML, 2),
            vec!["https://one.example/", "https://two.example/"]
        );
    }

    #[test]
    fn test_parse_serpapi_results() {
        let body = json!({
            "organic_results": [
                {"position": 1, "link": "https://a.example/"},
                {"position": 2},
                {"position": 3, "link": "https://c.example/"},
                {"position": 4, "link": "https://d.example/"}
            ]
        });
        assert_eq!(
            parse_serpapi_results(&body, 3),
            vec!["https://a.example/", "https://c.example/"]
        );
        assert!(parse_serpapi_results(&json!({"error": "bad key"}), 3).is_empty());
    }

    #[tokio::test]
    async fn test_search_prefers_serpapi() {
        let server = MockServer::start();
        let serp = server.mock(|when, then| {
            when.method(GET)
                .path("/search.json")
                .query_param("q", "running")
                .query_param("api_key", "k");
            then.status(200)
                .json_body(json!({"organic_results": [{"link": "https://serp.example/"}]}));
        });

        let client = fast_client();
        let urls = SerpSource::new(&client)
            .serpapi_endpoint(server.url("/search.json"))
            .bing_endpoint(server.url("/bing"))
            .search("running", Some("k"), 3)
            .await;
        serp.assert();
        assert_eq!(urls, vec!["https://serp.example/"]);
    }

    #[tokio::test]
    async fn test_search_falls_back_to_bing() {
        let server = MockServer::start();
        let serp = server.mock(|when, then| {
            when.method(GET).path("/search.json");
            then.status(401).json_body(json!({"error": "Invalid API key"}));
        });
        let bing = server.mock(|when, then| {
            when.method(GET)
                .path("/bing")
                .query_param("q", "running")
                .query_param("count", "3");
            then.status(200).body(BING_HTML);
        });

        let client = fast_client();
        let urls = SerpSource::new(&client)
            .serpapi_endpoint(server.url("/search.json"))
            .bing_endpoint(server.url("/bing"))
            .search("running", Some("bad"), 3)
            .await;
        serp.assert();
        bing.assert();
        assert_eq!(
            urls,
            vec![
                "https://one.example/",
                "https://two.example/",
                "https://three.example/"
            ]
        );
    }
}
