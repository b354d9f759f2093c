// src/crawl/engine.rs
// =============================================================================
// This module walks a website and builds its link graph.
//
// How it works:
// 1. Fetch robots.txt once for the seed's origin
// 2. Explore the seed at depth 1
// 3. For each page: skip it if it is too deep, already visited or blocked by
//    robots.txt; otherwise claim it, fetch it, record an edge for every link
//    on it, then explore all unvisited links at depth + 1 *concurrently*
// 4. A page's exploration finishes only when all of its children finish
//
// A page is claimed before it is fetched. A failed fetch still leaves the
// page in the visited set with its depth, and it simply has no outgoing
// edges.
//
// Rust concepts:
// - Recursive async functions need a boxed future (BoxFuture)
// - join_all: wait for a whole batch of futures at once
// - DashMap: a concurrent HashMap (see state.rs)
// =============================================================================

use std::time::Instant;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::Semaphore;
use url::Url;

use super::state::CrawlState;
use super::stats::{CrawlStats, StatsRecorder};
use crate::config::CrawlConfig;
use crate::error::{CartographerError, Result};
use crate::extract::{is_same_origin, LinkExtractor};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::graph::CrawlGraph;
use crate::robots::RobotsRules;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub graph: CrawlGraph,
    pub stats: CrawlStats,
}

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
    extractor: LinkExtractor,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        let extractor = LinkExtractor::new(config.extractor);

        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }

    /// Crawls from `seed` until every reachable page within the depth limit
    /// has been explored. Never fails: unreachable pages are empty pages.
    pub async fn crawl(&self, seed: &Url) -> CrawlReport {
        let started = Instant::now();

        let mut seed = seed.clone();
        seed.set_fragment(None);

        tracing::info!(
            "Crawling {} (max depth {}, concurrency {})",
            seed,
            self.config.max_depth,
            self.config
                .max_concurrency
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );

        let robots = RobotsRules::load(&self.fetcher, &seed).await;

        let run = CrawlRun {
            crawler: self,
            robots,
            state: CrawlState::default(),
            stats: StatsRecorder::default(),
            gate: self.config.max_concurrency.map(Semaphore::new),
        };

        run.explore(seed, 1).await;

        let stats = run.stats.snapshot(started.elapsed());
        let graph = run.state.into_graph();

        tracing::info!(
            "Crawl finished: {} page(s), {} edge(s), {} failed fetch(es) in {:.2}s",
            graph.visited.len(),
            graph.edges.len(),
            stats.failures.total(),
            stats.elapsed.as_secs_f64()
        );

        CrawlReport { graph, stats }
    }
}

// Per-crawl state shared by every branch of the exploration tree
struct CrawlRun<'a> {
    crawler: &'a Crawler,
    robots: RobotsRules,
    state: CrawlState,
    stats: StatsRecorder,
    // Present only when a concurrency cap is configured
    gate: Option<Semaphore>,
}

impl CrawlRun<'_> {
    fn explore(&self, url: Url, depth: u32) -> BoxFuture<'_, ()> {
        async move {
            if depth > self.crawler.config.max_depth || self.state.is_claimed(&url) {
                return;
            }

            if !self.robots.allows(url.as_str()) {
                tracing::debug!("Skipping URL disallowed by robots.txt: {}", url);
                self.stats.robots_rejected();
                return;
            }

            // Another branch may have claimed it since the check above
            if !self.state.claim(&url, depth) {
                return;
            }
            self.stats.page_claimed();

            tracing::info!("Crawling [depth {}]: {}", depth, url);

            let outcome = self.fetch(&url).await;
            self.stats.fetch_finished(&outcome);
            if let Some(failure) = outcome.failure() {
                tracing::warn!("Treating {} as an empty page: {}", url, failure);
            }
            let html = outcome.into_text();

            let (targets, follow) = if self.crawler.config.external_edges {
                let all = self.crawler.extractor.extract_all(&url, &html);
                let follow: Vec<Url> = all
                    .iter()
                    .filter(|link| is_same_origin(&url, link))
                    .cloned()
                    .collect();
                (all.into_iter().collect::<Vec<_>>(), follow)
            } else {
                let links: Vec<Url> = self
                    .crawler
                    .extractor
                    .extract(&url, &html)
                    .into_iter()
                    .collect();
                (links.clone(), links)
            };

            self.state.record_edges(&url, &targets);
            self.stats.links_recorded(targets.len());

            let children: Vec<_> = follow
                .into_iter()
                .filter(|link| !self.state.is_claimed(link))
                .map(|link| self.explore(link, depth + 1))
                .collect();

            join_all(children).await;
        }
        .boxed()
    }

    async fn fetch(&self, url: &Url) -> FetchOutcome {
        // The permit covers the fetch only, never the wait on children,
        // so a small cap cannot deadlock the tree
        let _permit = match &self.gate {
            Some(gate) => gate.acquire().await.ok(),
            None => None,
        };
        self.crawler.fetcher.fetch_page(url).await
    }
}

/// Parses a seed URL and checks that it is something we can crawl
pub fn parse_seed(seed: &str) -> Result<Url> {
    let url = Url::parse(seed).map_err(|source| CartographerError::InvalidSeed {
        url: seed.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(CartographerError::UnsupportedScheme(seed.to_string())),
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is explore() not an `async fn`?
//    - An async fn that calls itself would have an infinitely sized future
//    - Returning BoxFuture puts each level's future on the heap instead
//    - .boxed() also requires the future to be Send
//
// 2. Why check is_claimed() and then claim()?
//    - The first check is a cheap early exit before touching robots.txt
//    - claim() is the real, atomic decision; between the two checks another
//      branch may win the URL, in which case we quietly stop
//
// 3. Why join_all and not tokio::spawn?
//    - All branches run on one task and interleave at network awaits
//    - Borrowing `self` is fine because nothing outlives the crawl
//    - The parent naturally waits for every child it started
// -----------------------------------------------------------------------------
