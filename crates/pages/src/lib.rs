// ABOUTME: Page fetching and extraction library for seokit.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, FetchOptions, FetchError, PageRecord and the page tools.

//! seokit-pages fetches web pages and pulls the pieces SEO tools care about
//! out of them: visible text, headings, images, tracking tags and status codes.
//!
//! # Example
//!
//! ```no_run
//! use seokit_pages::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::builder().build();
//!     let page = client.fetch_page("https://example.com/").await;
//!     for heading in &page.headings {
//!         println!("{}: {}", heading.tag(), heading.text);
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod extract;
pub mod options;
pub mod page;
pub mod resource;
pub mod serp;
pub mod status;
pub mod tracking;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, FetchError};
pub use crate::extract::{headings, same_host_images, visible_text, Heading};
pub use crate::options::{ClientBuilder, FetchOptions, DEFAULT_USER_AGENT};
pub use crate::page::{domain_of, PageRecord};
pub use crate::serp::SerpSource;
pub use crate::status::{check_url, find_url_column, status_label, StatusRow};
pub use crate::tracking::{
    normalize_target, scan_tracking, Origin, TrackerHit, TrackerMatch, TrackingReport,
};
