// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Defaults: depth 3, a 10 second fetch timeout, no cap on concurrent
// fetches, regex-based link extraction and same-origin edges only.
// The CLI maps its flags onto this struct.
// =============================================================================

use std::time::Duration;

use crate::error::{CartographerError, Result};

pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which link extractor to run over fetched pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractorKind {
    /// Case-insensitive `href="..."` / `href='...'` scan over the raw text
    #[default]
    Pattern,
    /// `<a href>` elements found by a full HTML parser
    Dom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Deepest level explored; the seed is depth 1
    pub max_depth: u32,
    /// Per-request timeout, the only bounded wait in a crawl
    pub timeout: Duration,
    /// Maximum number of page fetches in flight. `None` means unbounded.
    pub max_concurrency: Option<usize>,
    pub user_agent: String,
    pub extractor: ExtractorKind,
    /// Record edges to off-origin links (they are never explored)
    pub external_edges: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: None,
            user_agent: default_user_agent(),
            extractor: ExtractorKind::default(),
            external_edges: false,
        }
    }
}

impl CrawlConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(CartographerError::InvalidConfig(
                "max depth must be at least 1 (the seed is depth 1)".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(CartographerError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(CartographerError::InvalidConfig(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
