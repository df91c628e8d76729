// ABOUTME: The `status` subcommand: HEAD-check every URL listed in a CSV file.
// ABOUTME: Writes URL, status code and label per row to an output CSV.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use seokit_pages::{check_url, Client, StatusRow};
use tracing::{debug, info};

use super::read_url_column;

pub const DEFAULT_OUTPUT: &str = "url_check_results.csv";

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// CSV file with a url/link/website column
    pub input: PathBuf,

    /// Output CSV (default: url_check_results.csv next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 5)]
    pub timeout_secs: u64,
}

fn default_output(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_OUTPUT)
}

fn write_rows(path: &Path, rows: &[StatusRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["URL", "Status Code", "Status"])?;
    for row in rows {
        writer.write_record([row.url.as_str(), row.code_text().as_str(), row.label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let urls = read_url_column(&args.input)?;
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build();

    let mut rows = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        let row = check_url(&client, url).await;
        debug!("({}/{}) {} -> {}", i + 1, urls.len(), url, row.label);
        rows.push(row);
    }

    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    write_rows(&output, &rows)?;
    let valid = rows.iter().filter(|r| r.code == Some(200)).count();
    info!(
        "checked {} URLs ({} valid), saved {}",
        rows.len(),
        valid,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_next_to_input() {
        assert_eq!(
            default_output(Path::new("/data/site/urls.csv")),
            PathBuf::from("/data/site/url_check_results.csv")
        );
        assert_eq!(
            default_output(Path::new("urls.csv")),
            PathBuf::from("url_check_results.csv")
        );
    }
}
