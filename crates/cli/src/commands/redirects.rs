// ABOUTME: The `redirects` subcommand: pair each broken URL with its most similar live URL.
// ABOUTME: Similarity is the character sequence-matching ratio; output is a mapping CSV.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use seokit_text::best_match;
use tracing::info;

use super::read_column;

/// Header of the URL column in both input files.
const URL_COLUMN: &str = "URL";

#[derive(Args, Debug)]
pub struct RedirectsArgs {
    /// CSV of broken (404) URLs with a `URL` column
    pub broken: PathBuf,

    /// CSV of live (200) URLs with a `URL` column
    pub live: PathBuf,

    /// Output mapping CSV
    #[arg(short, long)]
    pub output: PathBuf,
}

/// One broken URL and where it should redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectRow {
    pub broken: String,
    pub target: Option<String>,
    pub similarity: f64,
}

pub fn map_redirects(broken: &[String], live: &[String]) -> Vec<RedirectRow> {
    broken
        .iter()
        .map(|url| match best_match(url, live) {
            Some((target, ratio)) => RedirectRow {
                broken: url.clone(),
                target: Some(target.to_string()),
                similarity: ratio,
            },
            None => RedirectRow {
                broken: url.clone(),
                target: None,
                similarity: 0.0,
            },
        })
        .collect()
}

fn write_rows(path: &Path, rows: &[RedirectRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["404_URL", "200_URL", "similarity"])?;
    for row in rows {
        let similarity = match row.target {
            Some(_) => format!("{:.4}", row.similarity),
            None => String::new(),
        };
        writer.write_record([
            row.broken.as_str(),
            row.target.as_deref().unwrap_or_default(),
            similarity.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn run(args: RedirectsArgs) -> Result<()> {
    let broken = read_column(&args.broken, URL_COLUMN)?;
    let live = read_column(&args.live, URL_COLUMN)?;
    let rows = map_redirects(&broken, &live);
    write_rows(&args.output, &rows)?;
    info!(
        "mapped {} broken URLs against {} live URLs, saved {}",
        broken.len(),
        live.len(),
        args.output.display()
    );
    Ok(())
}
