// src/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// The fetch policy is "fail silent": a page either comes back as HTML text,
// or the crawler treats it as an empty page with no outgoing links. We still
// keep track of *why* a fetch failed so the crawl statistics can report it,
// but the engine only ever sees the collapsed text.
//
// Rules for a page fetch:
// - One GET, no retries, bounded by the configured timeout
// - Status must be exactly 200 OK
// - Content-Type must mention text/html
// =============================================================================

use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::Result;

/// Why a fetch produced no usable body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed")]
    Connect,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("response is not HTML")]
    NotHtml,
    #[error("failed to read response body")]
    Body,
    #[error("request failed")]
    Other,
}

/// The result of a single GET.
///
/// `into_text` is the only way the crawl engine reads an outcome: every
/// failure becomes the empty string, which extracts to zero links. A failed
/// page is therefore indistinguishable from an empty one, and it keeps the
/// depth it was claimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(String),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn failure(&self) -> Option<FetchFailure> {
        match self {
            FetchOutcome::Page(_) => None,
            FetchOutcome::Failed(failure) => Some(*failure),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FetchOutcome::Page(text) => text,
            FetchOutcome::Failed(_) => String::new(),
        }
    }
}

// One shared client per crawl, so connections are pooled across every
// concurrent branch
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// GET an HTML page
    pub async fn fetch_page(&self, url: &Url) -> FetchOutcome {
        self.get(url, true).await
    }

    /// GET any successful text response (robots.txt is served as text/plain)
    pub async fn fetch_text(&self, url: &Url) -> FetchOutcome {
        self.get(url, false).await
    }

    async fn get(&self, url: &Url, require_html: bool) -> FetchOutcome {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(categorize_error(&e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchOutcome::Failed(FetchFailure::Status(status.as_u16()));
        }

        if require_html && !is_html(&response) {
            return FetchOutcome::Failed(FetchFailure::NotHtml);
        }

        match response.text().await {
            Ok(text) => FetchOutcome::Page(text),
            Err(e) => FetchOutcome::Failed(categorize_error(&e)),
        }
    }
}

fn is_html(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("text/html"))
}

// Maps a reqwest error onto the failure kinds we count
fn categorize_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect
    } else if error.is_body() || error.is_decode() {
        FetchFailure::Body
    } else {
        FetchFailure::Other
    }
}
