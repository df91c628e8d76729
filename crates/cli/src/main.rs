// ABOUTME: CLI binary for seokit, a toolkit of SEO analysis commands.
// ABOUTME: Dispatches to the n-gram, tracking, status, redirect and image subcommands.

mod analysis;
mod commands;
mod report;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{images, ngrams, redirects, status, tracking};

#[derive(Parser, Debug)]
#[command(name = "seokit")]
#[command(about = "SEO analysis tools: competitor n-grams, tracking tags, status checks, redirects")]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch competitor pages and report their top n-grams and headings
    Ngrams(ngrams::NgramsArgs),
    /// Detect analytics and marketing tags on a page
    Tracking(tracking::TrackingArgs),
    /// HEAD-check every URL in a CSV file
    Status(status::StatusArgs),
    /// Map broken URLs to their most similar live URLs
    Redirects(redirects::RedirectsArgs),
    /// List same-host images referenced by a page
    Images(images::ImagesArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Ngrams(args) => ngrams::run(args).await,
        Command::Tracking(args) => tracking::run(args).await,
        Command::Status(args) => status::run(args).await,
        Command::Redirects(args) => redirects::run(args),
        Command::Images(args) => images::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
