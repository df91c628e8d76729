// ABOUTME: The `tracking` subcommand: scan one page for analytics and marketing tags.
// ABOUTME: Prints a line per tracker, or the whole report as JSON.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use seokit_pages::{normalize_target, scan_tracking, Client, TrackingReport};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct TrackingArgs {
    /// Page to scan; https:// is assumed when no scheme is given
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn format_report(report: &TrackingReport) -> String {
    let mut lines = Vec::new();
    for hit in &report.trackers {
        if hit.found() {
            let ids: Vec<String> = hit
                .matches
                .iter()
                .map(|m| format!("{} (origin: {})", m.id, m.origin))
                .collect();
            lines.push(format!("{}: {}", hit.name, ids.join(", ")));
        } else {
            lines.push(format!("{}: not found", hit.name));
        }
    }
    if report.event_pushes > 0 {
        lines.push(format!(
            "dataLayer.push events: {} found",
            report.event_pushes
        ));
        for event in &report.sample_events {
            lines.push(format!("  {}", event));
        }
    } else {
        lines.push("dataLayer.push events: not found".to_string());
    }
    lines.join("\n")
}

pub async fn run(args: TrackingArgs) -> Result<()> {
    let url = normalize_target(&args.url);
    info!("scanning {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build();
    let (status, html) = client.get_html_any_status(&url).await?;
    if status != 200 {
        warn!(status, "page returned an error status, scanning its body anyway");
    }
    let report = scan_tracking(&url, &html);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}
