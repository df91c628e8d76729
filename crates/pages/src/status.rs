// ABOUTME: URL status checking with HEAD requests and human-readable status labels.
// ABOUTME: Also locates the URL column in a tabular header row.

use serde::Serialize;
use tracing::debug;

use crate::client::Client;

/// Header names accepted as the URL column, compared case-insensitively.
pub const URL_COLUMNS: &[&str] = &["url", "urls", "link", "links", "website", "page"];

/// Outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub url: String,
    /// `None` when the request itself failed.
    pub code: Option<u16>,
    pub label: String,
}

impl StatusRow {
    /// The code as written to reports: the number, or `Error`.
    pub fn code_text(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "Error".to_string(),
        }
    }
}

/// Label for an HTTP status code.
pub fn status_label(code: u16) -> String {
    match code {
        200 => "Valid".to_string(),
        404 => "404 Not Found".to_string(),
        other => other.to_string(),
    }
}

/// Index of the first header naming a URL column.
pub fn find_url_column<S: AsRef<str>>(headers: &[S]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.as_ref().trim().to_lowercase();
        URL_COLUMNS.contains(&h.as_str())
    })
}

/// HEAD `url` and label the result.
pub async fn check_url(client: &Client, url: &str) -> StatusRow {
    match client.head_status(url).await {
        Ok(code) => StatusRow {
            url: url.to_string(),
            code: Some(code),
            label: status_label(code),
        },
        Err(err) => {
            debug!(url, error = %err, "status check failed");
            StatusRow {
                url: url.to_string(),
                code: None,
                label: "Invalid / Timeout".to_string(),
            }
        }
    }
}
