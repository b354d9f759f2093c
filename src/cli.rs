// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl a site and print (and optionally save) its link graph
// - load: print a previously saved graph without touching the network
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use link_cartographer::config::{default_user_agent, DEFAULT_MAX_DEPTH};
use link_cartographer::{CrawlConfig, ExtractorKind};

#[derive(Parser, Debug)]
#[command(
    name = "link-cartographer",
    version,
    about = "Map the link graph of a website",
    long_about = "link-cartographer crawls a website from a seed URL, staying on the seed's origin \
                  and honoring robots.txt, and records every page it visits with its depth plus \
                  every link it sees between pages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print its link graph
    ///
    /// Example: link-cartographer crawl https://example.com --max-depth 2
    Crawl(CrawlArgs),

    /// Print a graph saved earlier with `crawl --output`
    ///
    /// Example: link-cartographer load example.json
    Load {
        /// Path of the saved graph
        file: PathBuf,

        /// Output the graph as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Seed URL to start from (http or https)
    pub seed_url: String,

    /// Maximum crawl depth
    ///
    /// Depth 1 = just the seed page
    /// Depth 2 = the seed + the pages it links to
    /// etc.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of page fetches in flight (unbounded if omitted)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// How links are found in a page
    #[arg(long, value_enum, default_value_t = ExtractorKind::Pattern)]
    pub extractor: ExtractorKind,

    /// Also record edges to links on other origins (they are never crawled)
    #[arg(long)]
    pub external_edges: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Save the graph to this file as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the graph as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            timeout: Duration::from_secs(self.timeout),
            max_concurrency: self.max_concurrency,
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
            extractor: self.extractor,
            external_edges: self.external_edges,
        }
    }
}
