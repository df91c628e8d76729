// ABOUTME: FetchError, the error type shared by page fetching, SERP lookups and status checks.
// ABOUTME: Each error carries a category code, the URL, the failing operation and an optional cause.

use std::fmt;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Status,
    Extract,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Status => "unexpected status",
            ErrorCode::Extract => "extraction error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation on `url` that failed.
#[derive(Debug, thiserror::Error)]
pub struct FetchError {
    pub code: ErrorCode,
    pub url: String,
    /// Short operation name such as `Fetch`, `Head` or `SerpApi`.
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seokit: {} {}: {}", self.op, self.url, self.code)?;
        match &self.source {
            Some(cause) => write!(f, ": {}", cause),
            None => Ok(()),
        }
    }
}

impl FetchError {
    pub fn new(code: ErrorCode, url: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.source = Some(cause.into());
        self
    }

    pub fn invalid_url(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op)
    }

    pub fn fetch(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::Fetch, url, op)
    }

    pub fn extract(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::Extract, url, op)
    }

    /// A response that was not HTTP 200.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorCode::Status, url, op).with_source(anyhow::anyhow!("HTTP status {}", status))
    }

    /// Classify a reqwest transport error; timeouts keep their own code.
    pub fn from_reqwest(url: impl Into<String>, op: impl Into<String>, err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::Timeout
        } else {
            ErrorCode::Fetch
        };
        Self::new(code, url, op).with_source(err)
    }

    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    pub fn is_status(&self) -> bool {
        self.code == ErrorCode::Status
    }

    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::Extract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::status("https://example.com", "Fetch", 503);
        assert_eq!(
            err.to_string(),
            "seokit: Fetch https://example.com: unexpected status: HTTP status 503"
        );
        assert!(err.is_status());
        assert!(!err.is_fetch());
    }

    #[test]
    fn test_message_without_cause() {
        let err = FetchError::invalid_url("", "Head");
        assert_eq!(err.to_string(), "seokit: Head : invalid URL");
        assert!(err.is_invalid_url());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_cause_is_exposed_as_source() {
        let err = FetchError::extract("https://serp.example", "SerpApi")
            .with_source(anyhow::anyhow!("missing organic_results"));
        assert!(err.is_extract());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("missing organic_results"));
    }
}
