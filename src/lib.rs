//! Same-origin, robots.txt-aware website crawler that maps a site's link graph.
//!
//! Starting from a seed URL the crawler explores every same-origin page
//! reachable within a depth limit and returns:
//!
//! - the visited set: each page URL with the depth it was discovered at
//!   (the seed is depth 1)
//! - the edge list: every (page, link) pair seen, including links to pages
//!   that were never visited
//!
//! # Usage
//!
//! ```rust,ignore
//! use link_cartographer::{crawl, parse_seed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seed = parse_seed("https://your-target-site.com/")?;
//!     let graph = crawl(&seed, 3).await?;
//!     println!("{} pages, {} edges", graph.visited.len(), graph.edges.len());
//!     graph.save("site.json")?;
//!     Ok(())
//! }
//! ```
//!
//! Fetch failures never surface as errors: a page that cannot be fetched
//! is treated as an empty page. [`CrawlStats`] reports how many fetches
//! failed and why.

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod graph;
pub mod robots;

pub use config::{CrawlConfig, ExtractorKind};
pub use crawl::{crawl, parse_seed, CrawlReport, CrawlStats, Crawler};
pub use error::{CartographerError, Result};
pub use graph::{CrawlGraph, Edge, NodeSummary};
