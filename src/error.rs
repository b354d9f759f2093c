// src/error.rs
// =============================================================================
// Error types for the library API.
//
// Crawling itself never fails: fetch, robots.txt and link errors are
// collapsed where they happen. What can fail is everything around a crawl:
// - building the crawler (bad seed URL, bad configuration, HTTP client)
// - saving and reloading a crawl graph
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartographerError {
    /// The seed could not be parsed as a URL
    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The seed parsed, but it is not something we can crawl
    #[error("Unsupported seed URL '{0}': only http and https are crawled")]
    UnsupportedScheme(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to access graph file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed crawl graph: {0}")]
    Graph(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CartographerError>;
