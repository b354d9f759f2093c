// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-bounded traversal starting from a seed URL (seed = depth 1)
// - Same-origin restriction (never leaves the seed's scheme/host/port)
// - robots.txt compliance for the wildcard user agent
// - Concurrent fetching, optionally capped
// - At most one fetch per URL per crawl
//
// Submodules:
// - engine: the recursive exploration
// - state: the shared visited set and edge list
// - stats: counters reported beside the graph
// =============================================================================

mod engine;
mod state;
mod stats;

pub use engine::{parse_seed, CrawlReport, Crawler};
pub use stats::{CrawlStats, FailureCounts};

use url::Url;

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::graph::CrawlGraph;

/// Crawls `seed` with default settings and the given depth limit.
///
/// Only building the HTTP client can fail; the crawl itself always returns
/// a graph, possibly containing just the seed.
pub async fn crawl(seed: &Url, max_depth: u32) -> Result<CrawlGraph> {
    let crawler = Crawler::new(CrawlConfig::default().with_max_depth(max_depth))?;
    Ok(crawler.crawl(seed).await.graph)
}
