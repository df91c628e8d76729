// ABOUTME: Fetch settings shared by every seokit tool: timeout, User-Agent, retry policy and headers.
// ABOUTME: ClientBuilder adjusts FetchOptions fluently and produces a Client.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;

/// Desktop browser User-Agent sent by default; many sites refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Timeout, identity and retry policy for outgoing requests.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra attempts after the first one.
    pub retries: u32,
    /// Sleep before the second attempt.
    pub retry_delay: Duration,
    /// Added to the sleep for each further attempt.
    pub retry_step: Duration,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: 2,
            retry_delay: Duration::from_secs(1),
            retry_step: Duration::from_millis(500),
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

impl FetchOptions {
    /// Sleep that follows failed attempt number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay
            .saturating_add(self.retry_step.saturating_mul(attempt))
    }
}

/// Fluent construction of a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: FetchOptions,
}

impl ClientBuilder {
    /// Start from [`FetchOptions::default`].
    pub fn new() -> Self {
        Self {
            opts: FetchOptions::default(),
        }
    }

    /// Per-request timeout, connect included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Extra attempts after a failed GET.
    pub fn retries(mut self, retries: u32) -> Self {
        self.opts.retries = retries;
        self
    }

    /// Sleep before the first retry, and how much longer each later sleep gets.
    pub fn retry_delay(mut self, delay: Duration, step: Duration) -> Self {
        self.opts.retry_delay = delay;
        self.opts.retry_step = step;
        self
    }

    /// Bring a preconfigured reqwest client; timeout and User-Agent are then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Extra header sent with every GET.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(15));
        assert_eq!(opts.retries, 2);
        assert!(opts.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let opts = FetchOptions::default();
        assert_eq!(opts.backoff(0), Duration::from_millis(1000));
        assert_eq!(opts.backoff(1), Duration::from_millis(1500));
        assert_eq!(opts.backoff(2), Duration::from_millis(2000));
        assert_eq!(
            FetchOptions {
                retry_delay: Duration::MAX,
                ..FetchOptions::default()
            }
            .backoff(u32::MAX),
            Duration::MAX
        );
    }
}
