// ABOUTME: The `images` subcommand: list images a page serves from its own host.
// ABOUTME: Relative sources are resolved against the page URL.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use seokit_pages::{same_host_images, Client};
use url::Url;

#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Page to inspect
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Print the image URLs as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ImagesArgs) -> Result<()> {
    let page = Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build();
    let html = client.get_html(page.as_str()).await?;
    let images = same_host_images(&html, &page);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }
    for (i, image) in images.iter().enumerate() {
        println!("{}: {}", i + 1, image);
    }
    println!(
        "\nTotal images found from {}: {}",
        page.host_str().unwrap_or_default(),
        images.len()
    );
    Ok(())
}
