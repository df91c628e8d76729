// ABOUTME: Resource handling module for fetching single web resources.
// ABOUTME: Handles one HTTP GET or HEAD attempt with content-length limits and charset decoding.

use std::collections::HashMap;

use bytes::Bytes;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::FetchError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    /// URL of the last response after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using the charset from the content-type header when present.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode with the declared charset when it names a known encoding, else sniff it.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(body, true);
            detector.guess(None, true)
        });
    encoding.decode(body).0.into_owned()
}

/// The lowercased `charset` parameter of a Content-Type value.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim().eq_ignore_ascii_case("charset").then(|| {
            value
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .to_ascii_lowercase()
        })
    })
}

/// Parse `url` and require an http(s) scheme.
pub fn validate_url(url: &str, op: &str) -> Result<url::Url, FetchError> {
    if url.is_empty() {
        return Err(FetchError::invalid_url(url, op));
    }
    let parsed =
        url::Url::parse(url).map_err(|e| FetchError::invalid_url(url, op).with_source(e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::invalid_url(url, op)
            .with_source(anyhow::anyhow!("unsupported scheme {}", other))),
    }
}

fn too_large(url: &str, len: usize) -> FetchError {
    FetchError::fetch(url, "Fetch").with_source(anyhow::anyhow!(
        "content too large: {} bytes (limit {})",
        len,
        MAX_CONTENT_LENGTH
    ))
}

/// Perform a single GET of `url`. Any status other than 200 is an error.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<FetchResult, FetchError> {
    let result = fetch_any_status(client, url, headers).await?;
    if result.status != 200 {
        return Err(FetchError::status(url, "Fetch", result.status));
    }
    Ok(result)
}

/// Perform a single GET of `url` and keep the body whatever the status.
pub async fn fetch_any_status(
    client: &reqwest::Client,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<FetchResult, FetchError> {
    validate_url(url, "Fetch")?;

    let mut request = client.get(url);
    for (key, value) in headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, "Fetch", e))?;

    let status = response.status().as_u16();

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(too_large(url, len as usize));
        }
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::from_reqwest(url, "Fetch", e))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(too_large(url, body.len()));
    }

    Ok(FetchResult {
        status,
        final_url,
        content_type,
        body,
    })
}

/// Perform a single HEAD of `url`, following redirects, and return the final status.
pub async fn head_status(client: &reqwest::Client, url: &str) -> Result<u16, FetchError> {
    validate_url(url, "Head")?;
    let response = client
        .head(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, "Head", e))?;
    Ok(response.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn http() -> reqwest::Client {
        reqwest::Client::builder().build().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_declared_charset() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/latin");
            then.status(200)
                .header("content-type", "text/html; charset=ISO-8859-1")
                .body(b"caf\xe9".to_vec());
        });

        let page = fetch(&http(), &server.url("/latin"), &HashMap::new())
            .await
            .unwrap();
        mock.assert();
        assert_eq!(page.status, 200);
        assert_eq!(page.content_type.as_deref(), Some("text/html; charset=iso-8859-1"));
        assert_eq!(page.text(), "café");
    }

    #[tokio::test]
    async fn test_fetch_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/h").header("x-probe", "1");
            then.status(200).body("ok");
        });

        let mut headers = HashMap::new();
        headers.insert("x-probe".to_string(), "1".to_string());
        let result = fetch(&http(), &server.url("/h"), &headers).await;
        mock.assert();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_rejects_missing_page() {
        let server = MockServer::start();
        let gone = server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("<h1>missing</h1>");
        });
        let err = fetch(&http(), &server.url("/gone"), &HashMap::new())
            .await
            .unwrap_err();
        gone.assert();
        assert!(err.is_status());
        assert!(err.to_string().contains("HTTP status 404"));
    }

    #[tokio::test]
    async fn test_fetch_any_status_keeps_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forbidden");
            then.status(403).body("<p>denied</p>");
        });
        let page = fetch_any_status(&http(), &server.url("/forbidden"), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(page.status, 403);
        assert_eq!(page.text(), "<p>denied</p>");
    }

    #[tokio::test]
    async fn test_fetch_reports_final_url_after_redirect() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/old");
            then.status(301).header("location", "/new");
        });
        server.mock(|when, then| {
            when.method(GET).path("/new");
            then.status(200).body("moved");
        });
        let page = fetch(&http(), &server.url("/old"), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(page.final_url, server.url("/new"));
        assert_eq!(page.text(), "moved");
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_scheme() {
        for url in ["ftp://example.com/x", "", "example.com/no-scheme"] {
            let err = fetch(&http(), url, &HashMap::new()).await.unwrap_err();
            assert!(err.is_invalid_url(), "{url} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_head_status_reports_code() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/gone");
            then.status(410);
        });

        let status = head_status(&http(), &server.url("/gone")).await.unwrap();
        mock.assert();
        assert_eq!(status, 410);
    }

    #[test]
    fn test_decode_sniffs_without_charset() {
        assert_eq!(decode_body("naïve café".as_bytes(), None), "naïve café");
        assert_eq!(
            decode_body(b"plain", Some("text/html; charset=no-such-thing")),
            "plain"
        );
    }

    #[test]
    fn test_extract_charset_variants() {
        let cases = [
            ("text/html; charset=utf-8", Some("utf-8")),
            ("text/html; Charset = \"ISO-8859-1\"", Some("iso-8859-1")),
            ("text/html;charset='windows-1252'", Some("windows-1252")),
            ("text/html", None),
        ];
        for (header, expected) in cases {
            assert_eq!(extract_charset(header).as_deref(), expected, "{header}");
        }
    }
}
